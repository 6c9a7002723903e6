//! Reading the dataset file into a polars `DataFrame`.
//!
//! CSV and JSON (array of records) are supported, chosen by file extension.
//! After parsing, the frame is checked against the fixed schema: alias
//! headers are renamed and any missing required column fails the load.

use crate::dataset::schema::Column;
use crate::error::{ReportingError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info};

/// Source file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ReportingError::DatasetLoad(format!(
                "unsupported file extension '{ext}' for {}",
                path.display()
            ))),
        }
    }
}

/// Column types are inferred from every record, so a value that only
/// appears late in the file (a decimal amount after whole numbers) still
/// widens the column.
const INFER_SCHEMA_RECORDS: Option<NonZeroUsize> = None;

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(INFER_SCHEMA_RECORDS.map(NonZeroUsize::get))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
}

/// Load and validate a dataset file.
pub fn load_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ReportingError::DatasetLoad(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let format = SourceFormat::from_path(path)?;
    info!("Loading dataset from: {}", path.display());

    let df = match format {
        SourceFormat::Csv => csv_options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish()),
        SourceFormat::Json => std::fs::File::open(path)
            .map_err(PolarsError::from)
            .and_then(|file| {
                JsonReader::new(file)
                    .infer_schema_len(INFER_SCHEMA_RECORDS)
                    .finish()
            }),
    }
    .map_err(|e| ReportingError::DatasetLoad(format!("{}: {e}", path.display())))?;

    let df = normalize_schema(df)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Parse CSV text (with header) into a validated frame.
pub fn frame_from_csv_str(text: &str) -> Result<DataFrame> {
    let df = csv_options()
        .into_reader_with_file_handle(Cursor::new(text.to_owned()))
        .finish()
        .map_err(|e| ReportingError::DatasetLoad(format!("invalid CSV: {e}")))?;
    normalize_schema(df)
}

/// Parse a JSON array of records into a validated frame.
pub fn frame_from_json_str(text: &str) -> Result<DataFrame> {
    let df = JsonReader::new(Cursor::new(text.to_owned()))
        .infer_schema_len(INFER_SCHEMA_RECORDS)
        .finish()
        .map_err(|e| ReportingError::DatasetLoad(format!("invalid JSON: {e}")))?;
    normalize_schema(df)
}

/// Rename alias headers and verify every required column is present.
pub(crate) fn normalize_schema(mut df: DataFrame) -> Result<DataFrame> {
    let mut missing = Vec::new();

    for column in Column::ALL {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        if names.iter().any(|name| name == column.header()) {
            continue;
        }

        match names
            .iter()
            .find(|name| column.aliases().contains(&name.as_str()))
        {
            Some(alias) => {
                debug!("Renaming column '{}' to '{}'", alias, column.header());
                df.rename(alias, column.header().into())?;
            }
            None => missing.push(column.header()),
        }
    }

    if !missing.is_empty() {
        return Err(ReportingError::DatasetLoad(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    Ok(df)
}
