//! CLI entry point for the shopping trends report.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use trends_report::config::DATASET_ENV_VAR;
use trends_report::{
    CategoricalColumn, DatasetCache, Download, ExportFormat, Page, PageParams, ReportConfig,
    render_page,
};

/// CLI-compatible page enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPage {
    /// Dataset overview, preview and descriptive statistics
    Home,
    /// Charts and tables over the dataset
    Visualisations,
    /// Key findings
    Conclusions,
    /// Description of the dataset
    About,
}

impl From<CliPage> for Page {
    fn from(cli: CliPage) -> Self {
        match cli {
            CliPage::Home => Page::Home,
            CliPage::Visualisations => Page::Visualisations,
            CliPage::Conclusions => Page::Conclusions,
            CliPage::About => Page::About,
        }
    }
}

/// CLI-compatible categorical column enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColumn {
    Gender,
    Location,
    Season,
}

impl From<CliColumn> for CategoricalColumn {
    fn from(cli: CliColumn) -> Self {
        match cli {
            CliColumn::Gender => CategoricalColumn::Gender,
            CliColumn::Location => CategoricalColumn::Location,
            CliColumn::Season => CategoricalColumn::Season,
        }
    }
}

/// CLI-compatible export format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Array of records, one object per row
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl From<CliFormat> for ExportFormat {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Json => ExportFormat::Json,
            CliFormat::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Shopping trends dashboard report",
    long_about = "Descriptive analysis of a retail shopping trends dataset.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  SHOPPING_TRENDS_DATA    Dataset file used when --input is omitted\n\n\
                  EXAMPLES:\n  \
                  # Overview of the dataset\n  \
                  trends-report -i Shopping_trends.csv\n\n  \
                  # Charts for the Location column, top 5 customers\n  \
                  trends-report -i Shopping_trends.csv -p visualisations -c location --top 5\n\n  \
                  # Render model as JSON and write a CSV download\n  \
                  trends-report -i Shopping_trends.csv --json --export outputs --format csv"
)]
struct Args {
    /// Path to the dataset file (CSV or JSON)
    ///
    /// Falls back to SHOPPING_TRENDS_DATA, then to Shopping_trends.csv
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Page to render
    #[arg(short, long, value_enum, default_value = "home")]
    page: CliPage,

    /// Column shown in the categorical value-count chart
    #[arg(short, long, value_enum, default_value = "season")]
    column: CliColumn,

    /// Number of customers in the top-spender chart
    #[arg(long, default_value = "10")]
    top: usize,

    /// Number of rows in the dataset preview
    #[arg(long, default_value = "5")]
    rows: usize,

    /// Output the render model as JSON instead of the text layout
    ///
    /// Disables all logging so stdout only carries JSON.
    #[arg(long)]
    json: bool,

    /// Write the dataset download into this directory
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Format of the dataset download
    #[arg(short, long, value_enum, default_value = "json")]
    format: CliFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the page)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let config = build_config(&args)?;
    debug!("Configuration: {:?}", config);

    let cache = DatasetCache::new();
    let dataset = cache
        .get_or_load(&config.dataset_path)
        .with_context(|| format!("failed to load {}", config.dataset_path.display()))?;

    let page = Page::from(args.page);
    let model = render_page(page, &dataset, &PageParams::from(&config))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print!("{model}");
    }
    info!("Rendered page '{}'", page);

    if args.export.is_some() {
        let download = Download::for_dataset(&dataset, config.export_format)?;
        let path = download.write_to(&config.export_dir)?;
        if !args.json {
            println!("\nDownload written to {}", path.display());
        }
    }

    Ok(())
}

/// Resolve the dataset path and assemble a validated configuration.
fn build_config(args: &Args) -> Result<ReportConfig> {
    let dataset_path = match &args.input {
        Some(path) => path.clone(),
        None => match env::var(DATASET_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => {
                let fallback = ReportConfig::default().dataset_path;
                warn!(
                    "No --input given and {} is not set; using {}",
                    DATASET_ENV_VAR,
                    fallback.display()
                );
                fallback
            }
        },
    };

    if !dataset_path.exists() {
        return Err(anyhow!("Input file not found: {}", dataset_path.display()));
    }

    let mut builder = ReportConfig::builder()
        .dataset_path(dataset_path)
        .default_column(args.column.into())
        .top_n(args.top)
        .preview_rows(args.rows)
        .export_format(args.format.into());

    if let Some(dir) = &args.export {
        builder = builder.export_dir(dir);
    }

    Ok(builder.build()?)
}
