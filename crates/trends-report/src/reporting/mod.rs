//! Summary views over the shopping trends dataset.
//!
//! [`Reporter`] borrows a [`Dataset`](crate::dataset::Dataset) and computes
//! named, parameterized views: value counts, grouped sums and means,
//! cross-tabulations, one-hot encodings, descriptive statistics and the
//! chart series used by the pages.
//!
//! # Ordering
//!
//! Sorts are stable. Ties keep the order in which the group first appears
//! in the dataset, and groups without records never appear.
//!
//! # Example
//!
//! ```rust,ignore
//! use trends_report::{CategoricalColumn, Dataset, Reporter};
//!
//! let dataset = Dataset::load("data/shopping_trends.csv")?;
//! let reporter = Reporter::new(&dataset);
//!
//! let seasons = reporter.value_counts(CategoricalColumn::Season)?;
//! let top_customers = reporter.total_purchase_per_customer()?.top_n(10)?;
//! ```

mod reporter;
mod statistics;
mod views;

pub use reporter::Reporter;
pub use statistics::{BoxSummary, ColumnStatistics};
pub use views::{
    CrossTab, IndicatorColumn, OneHotEncoding, ScatterSeries, SummaryView, Table, ValueCounts,
    ViewEntry,
};
