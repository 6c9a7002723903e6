//! Navigation pages of the dashboard.
//!
//! The dashboard is a fixed set of [`Page`]s. Each page is a pure function
//! from the dataset and [`PageParams`] to a [`RenderModel`]: an ordered list
//! of sections (tables, charts, text) that any presentation layer can draw.
//! Navigation state lives with the caller, not here.
//!
//! # Example
//!
//! ```rust,ignore
//! use trends_report::pages::{Page, PageParams, render_page};
//!
//! let model = render_page(Page::Visualisations, &dataset, &PageParams::default())?;
//! println!("{model}");                                  // terminal layout
//! println!("{}", serde_json::to_string_pretty(&model)?); // for a web renderer
//! ```

mod content;
mod terminal;

use crate::config::ReportConfig;
use crate::dataset::{CategoricalColumn, Dataset};
use crate::error::{ReportingError, Result};
use crate::export::{Download, ExportFormat};
use crate::reporting::{BoxSummary, ScatterSeries, SummaryView, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sidebar navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Visualisations,
    Conclusions,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Self::Home,
        Self::Visualisations,
        Self::Conclusions,
        Self::About,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Shopping trends analysis",
            Self::Visualisations => "Visualisations",
            Self::Conclusions => "Conclusions",
            Self::About => "About",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Visualisations => "visualisations",
            Self::Conclusions => "conclusions",
            Self::About => "about",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = ReportingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::ALL
            .into_iter()
            .find(|page| page.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ReportingError::InvalidArgument(format!("unknown page '{s}'")))
    }
}

/// User selections that parameterize the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Column shown in the categorical value-count chart.
    pub column: CategoricalColumn,
    /// Customers shown in the top-spender chart.
    pub top_n: usize,
    pub preview_rows: usize,
    pub export_format: ExportFormat,
}

impl Default for PageParams {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for PageParams {
    fn from(config: &ReportConfig) -> Self {
        Self {
            column: config.default_column,
            top_n: config.top_n,
            preview_rows: config.preview_rows,
            export_format: config.export_format,
        }
    }
}

/// Everything a renderer needs to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub page: Page,
    pub title: String,
    pub sections: Vec<Section>,
}

/// One block of page content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Text {
        heading: String,
        paragraphs: Vec<String>,
    },
    KeyValue {
        heading: String,
        pairs: Vec<(String, String)>,
    },
    Table {
        heading: String,
        table: Table,
    },
    BarChart {
        heading: String,
        view: SummaryView,
    },
    ScatterPlot {
        heading: String,
        series: ScatterSeries,
    },
    BoxPlot {
        heading: String,
        value_label: String,
        boxes: Vec<BoxSummary>,
    },
    PieChart {
        heading: String,
        view: SummaryView,
    },
    Download {
        heading: String,
        download: Download,
    },
}

impl Section {
    pub fn heading(&self) -> &str {
        match self {
            Self::Text { heading, .. }
            | Self::KeyValue { heading, .. }
            | Self::Table { heading, .. }
            | Self::BarChart { heading, .. }
            | Self::ScatterPlot { heading, .. }
            | Self::BoxPlot { heading, .. }
            | Self::PieChart { heading, .. }
            | Self::Download { heading, .. } => heading,
        }
    }
}

/// Build the render model of `page`.
pub fn render_page(page: Page, dataset: &Dataset, params: &PageParams) -> Result<RenderModel> {
    if params.top_n == 0 || params.preview_rows == 0 {
        return Err(ReportingError::InvalidArgument(
            "top-N and preview rows must be at least 1".to_string(),
        ));
    }

    let sections = match page {
        Page::Home => content::home(dataset, params)?,
        Page::Visualisations => content::visualisations(dataset, params)?,
        Page::Conclusions => content::conclusions(dataset)?,
        Page::About => content::about(),
    };
    debug!("Rendered page '{}' with {} sections", page, sections.len());

    Ok(RenderModel {
        page,
        title: page.title().to_string(),
        sections,
    })
}
