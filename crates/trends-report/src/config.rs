//! Configuration for report rendering and export.
//!
//! Uses the builder pattern; [`ReportConfigBuilder::build`] validates the
//! values before handing out a [`ReportConfig`].

use crate::dataset::CategoricalColumn;
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the default dataset file.
pub const DATASET_ENV_VAR: &str = "SHOPPING_TRENDS_DATA";

/// Settings shared by the pages and the exporter.
///
/// Use [`ReportConfig::builder()`] to create a configuration with the fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use trends_report::{CategoricalColumn, ReportConfig};
///
/// let config = ReportConfig::builder()
///     .dataset_path("data/shopping_trends.csv")
///     .default_column(CategoricalColumn::Gender)
///     .top_n(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Dataset file to load (CSV or JSON).
    /// Default: "Shopping_trends.csv"
    pub dataset_path: PathBuf,

    /// Column pre-selected in the categorical value-count view.
    /// Default: Season
    pub default_column: CategoricalColumn,

    /// Number of customers shown in the top-spender chart.
    /// Default: 10
    pub top_n: usize,

    /// Number of rows in the dataset preview.
    /// Default: 5
    pub preview_rows: usize,

    /// Directory the download artifact is written to.
    /// Default: "outputs"
    pub export_dir: PathBuf,

    /// Format of the download artifact.
    /// Default: Json
    pub export_format: ExportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("Shopping_trends.csv"),
            default_column: CategoricalColumn::default(),
            top_n: 10,
            preview_rows: 5,
            export_dir: PathBuf::from("outputs"),
            export_format: ExportFormat::default(),
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "top_n".to_string(),
                value: self.top_n,
            });
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "preview_rows".to_string(),
                value: self.preview_rows,
            });
        }

        if self.dataset_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDatasetPath);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },

    #[error("Dataset path must not be empty")]
    EmptyDatasetPath,
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    dataset_path: Option<PathBuf>,
    default_column: Option<CategoricalColumn>,
    top_n: Option<usize>,
    preview_rows: Option<usize>,
    export_dir: Option<PathBuf>,
    export_format: Option<ExportFormat>,
}

impl ReportConfigBuilder {
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Set the column pre-selected in the value-count view.
    pub fn default_column(mut self, column: CategoricalColumn) -> Self {
        self.default_column = Some(column);
        self
    }

    /// Set how many top customers are charted.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    pub fn export_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(path.into());
        self
    }

    pub fn export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let defaults = ReportConfig::default();
        let config = ReportConfig {
            dataset_path: self.dataset_path.unwrap_or(defaults.dataset_path),
            default_column: self.default_column.unwrap_or(defaults.default_column),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            export_dir: self.export_dir.unwrap_or(defaults.export_dir),
            export_format: self.export_format.unwrap_or(defaults.export_format),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.default_column, CategoricalColumn::Season);
        assert_eq!(config.export_format, ExportFormat::Json);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .dataset_path("data/trends.json")
            .default_column(CategoricalColumn::Location)
            .top_n(3)
            .export_format(ExportFormat::Csv)
            .build()
            .unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("data/trends.json"));
        assert_eq!(config.default_column, CategoricalColumn::Location);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_validation_zero_top_n() {
        let result = ReportConfig::builder().top_n(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidCount { .. }
        ));
    }

    #[test]
    fn test_validation_empty_path() {
        let result = ReportConfig::builder().dataset_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyDatasetPath
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "dataset_path": "Shopping_trends.json",
            "default_column": "Gender",
            "top_n": 7,
            "preview_rows": 3,
            "export_dir": "downloads",
            "export_format": "csv"
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.default_column, CategoricalColumn::Gender);
        assert_eq!(config.top_n, 7);
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert_eq!(config.export_dir, PathBuf::from("downloads"));
    }
}
