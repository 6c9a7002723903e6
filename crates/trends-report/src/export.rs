//! Exporting the full dataset as a downloadable artifact.
//!
//! JSON output is an array of records, one object per row, keyed by the
//! source column names. CSV output keeps the header row.

use crate::dataset::Dataset;
use crate::error::{ReportingError, Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// One dataset row keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Base name of downloaded files.
pub const DOWNLOAD_STEM: &str = "shopping_trends";

/// Serialization formats offered for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ReportingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ReportingError::UnsupportedFormat(format!(
                "'{other}' (supported: json, csv)"
            ))),
        }
    }
}

/// Serialize the whole dataset.
pub fn serialize(dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>> {
    write_frame(dataset.frame(), format)
}

/// Serialize a format given by name; unknown names fail with `UnsupportedFormat`.
pub fn serialize_as(dataset: &Dataset, format: &str) -> Result<Vec<u8>> {
    serialize(dataset, format.parse()?)
}

/// The dataset as a list of records.
pub fn records(dataset: &Dataset) -> Result<Vec<Record>> {
    frame_to_records(dataset.frame())
}

pub(crate) fn frame_to_records(frame: &DataFrame) -> Result<Vec<Record>> {
    let bytes = write_frame(frame, ExportFormat::Json)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_frame(frame: &DataFrame, format: ExportFormat) -> Result<Vec<u8>> {
    // Writers take the frame mutably to rechunk it
    let mut frame = frame.clone();
    let mut buffer = Vec::new();

    match format {
        ExportFormat::Json => JsonWriter::new(&mut buffer)
            .with_json_format(JsonFormat::Json)
            .finish(&mut frame)
            .context("Failed to write JSON")?,
        ExportFormat::Csv => CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut frame)
            .context("Failed to write CSV")?,
    }

    Ok(buffer)
}

/// A serialized dataset offered to the user as a file download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub size_bytes: usize,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl Download {
    pub fn for_dataset(dataset: &Dataset, format: ExportFormat) -> Result<Self> {
        let data = serialize(dataset, format)?;
        Ok(Self {
            file_name: format!("{DOWNLOAD_STEM}.{}", format.extension()),
            mime_type: format.mime_type(),
            size_bytes: data.len(),
            data,
        })
    }

    /// Write the payload into `dir`, creating it if needed.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.data)?;
        info!(
            "Download written to: {} ({} bytes)",
            path.display(),
            self.size_bytes
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Customer ID,Age,Gender,Category,Purchase Amount (USD),Location,Season,Review Rating,Subscription Status,Previous Purchases,Frequency of Purchases\n\
                          1,55,Male,Clothing,53,Kentucky,Winter,3.1,Yes,14,Fortnightly\n\
                          2,19,Female,Footwear,64,Maine,Spring,4.5,No,2,Weekly\n";

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ReportingError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_serialize_as_unknown_format() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let err = serialize_as(&dataset, "parquet").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_json_is_array_of_records() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let bytes = serialize(&dataset, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Gender"], "Male");
        assert_eq!(rows[1]["Purchase Amount (USD)"], 64);
        assert_eq!(rows[1]["Review Rating"], 4.5);
    }

    #[test]
    fn test_csv_keeps_header() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let bytes = serialize(&dataset, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Customer ID,Age,Gender"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_download_metadata() {
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let download = Download::for_dataset(&dataset, ExportFormat::Json).unwrap();
        assert_eq!(download.file_name, "shopping_trends.json");
        assert_eq!(download.mime_type, "application/json");
        assert_eq!(download.size_bytes, download.data.len());
    }

    #[test]
    fn test_download_write_to() {
        let dir = std::env::temp_dir().join(format!("trends-report-export-{}", std::process::id()));
        let dataset = Dataset::from_csv_str(SAMPLE).unwrap();
        let download = Download::for_dataset(&dataset, ExportFormat::Csv).unwrap();

        let path = download.write_to(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "shopping_trends.csv");
        assert_eq!(fs::read(&path).unwrap(), download.data);

        fs::remove_dir_all(&dir).unwrap();
    }
}
