//! Shopping Trends Reporting Library
//!
//! Descriptive analysis of a retail shopping trends dataset, built on Polars.
//!
//! # Overview
//!
//! Each row of the dataset is one purchase: customer demographics, the item
//! category, the amount spent, the season and the customer's purchase habits.
//! The library provides:
//!
//! - **Dataset loading**: CSV or JSON input, schema checks and a shared read-through cache
//! - **Summary views**: value counts, grouped sums and means, top-N, cross-tabulations,
//!   one-hot encodings and descriptive statistics
//! - **Export**: the full dataset as a JSON or CSV download
//! - **Pages**: the Home, Visualisations, Conclusions and About pages as renderer-neutral models
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use trends_report::{CategoricalColumn, DatasetCache, Reporter};
//!
//! let cache = DatasetCache::new();
//! let dataset = cache.get_or_load("Shopping_trends.csv")?;
//! let reporter = Reporter::new(&dataset);
//!
//! println!("{:?}", reporter.shape());
//! for entry in reporter.value_counts(CategoricalColumn::Season)?.entries {
//!     println!("{}: {}", entry.label, entry.value);
//! }
//! ```
//!
//! # Pages
//!
//! ```rust,ignore
//! use trends_report::{Page, PageParams, render_page};
//!
//! let model = render_page(Page::Home, &dataset, &PageParams::default())?;
//! println!("{model}");
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod pages;
pub mod reporting;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use dataset::{CategoricalColumn, Column, Dataset, DatasetCache, NumericColumn};
pub use error::{ReportingError, Result as ReportingResult, ResultExt};
pub use export::{Download, ExportFormat, Record};
pub use pages::{Page, PageParams, RenderModel, Section, render_page};
pub use reporting::{
    BoxSummary, ColumnStatistics, CrossTab, IndicatorColumn, OneHotEncoding, Reporter,
    ScatterSeries, SummaryView, Table, ValueCounts, ViewEntry,
};
