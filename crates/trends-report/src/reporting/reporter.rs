use super::statistics::{BoxSummary, ColumnStatistics};
use super::views::{
    CrossTab, IndicatorColumn, OneHotEncoding, ScatterSeries, SummaryView, ValueCounts, ViewEntry,
};
use crate::dataset::{CategoricalColumn, Column, Dataset, NumericColumn};
use crate::error::{ReportingError, Result, ResultExt};
use crate::export::{self, ExportFormat, Record};
use crate::utils::is_numeric_dtype;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Computes summary views over a borrowed [`Dataset`].
///
/// Every method is a pure function of the dataset and its arguments.
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'a> {
    dataset: &'a Dataset,
}

impl<'a> Reporter<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// (row count, column count)
    pub fn shape(&self) -> (usize, usize) {
        (self.dataset.height(), self.dataset.width())
    }

    /// First `n` rows as records, for a dataset preview.
    pub fn head(&self, n: usize) -> Result<Vec<Record>> {
        let head = self.dataset.frame().head(Some(n));
        export::frame_to_records(&head)
    }

    /// Descriptive statistics for every numeric column, in dataset order.
    pub fn describe(&self) -> Result<Vec<ColumnStatistics>> {
        let frame = self.dataset.frame();
        let mut stats = Vec::new();

        for column in frame.get_columns() {
            if !is_numeric_dtype(column.dtype()) {
                continue;
            }
            let casted = column
                .as_materialized_series()
                .cast(&polars::prelude::DataType::Float64)
                .context(format!("While describing column '{}'", column.name()))?;
            let values: Vec<f64> = casted.f64()?.into_iter().flatten().collect();
            stats.push(ColumnStatistics::from_values(column.name().as_str(), &values));
        }

        Ok(stats)
    }

    /// Occurrences of each category, most frequent first.
    pub fn value_counts(&self, column: CategoricalColumn) -> Result<ValueCounts> {
        self.count_by(column.column(), format!("Value counts of {column}"))
    }

    /// Like [`Reporter::value_counts`] for a column chosen by name.
    pub fn value_counts_by_name(&self, column: &str) -> Result<ValueCounts> {
        self.value_counts(column.parse()?)
    }

    /// Fraction of rows in each category, largest first (pie chart data).
    pub fn share(&self, column: Column) -> Result<SummaryView> {
        let rows = self.dataset.height();
        let counts = self.count_by(column, format!("Share of {column}"))?;
        Ok(counts.map_values(|count| {
            if rows == 0 {
                0.0
            } else {
                count as f64 / rows as f64
            }
        }))
    }

    /// Sum of `value_key` per group, largest first.
    pub fn group_sum(&self, group_key: Column, value_key: NumericColumn) -> Result<SummaryView> {
        let mut view = self.aggregate(group_key, value_key, |values| values.iter().sum())?;
        view.title = format!("Total {value_key} per {group_key}");
        sort_stable(&mut view.entries, |a, b| b.total_cmp(a));
        Ok(view)
    }

    /// Mean of `value_key` per group, smallest first.
    pub fn group_mean(&self, group_key: Column, value_key: NumericColumn) -> Result<SummaryView> {
        let mut view = self.aggregate(group_key, value_key, |values| {
            values.iter().sum::<f64>() / values.len() as f64
        })?;
        view.title = format!("Average {value_key} per {group_key}");
        sort_stable(&mut view.entries, f64::total_cmp);
        Ok(view)
    }

    /// Total purchase amount per customer, highest first.
    pub fn total_purchase_per_customer(&self) -> Result<SummaryView> {
        self.group_sum(Column::CustomerId, NumericColumn::PurchaseAmount)
    }

    /// Average purchase amount per category, lowest first.
    pub fn average_purchase_per_category(&self) -> Result<SummaryView> {
        self.group_mean(Column::Category, NumericColumn::PurchaseAmount)
    }

    /// Indicator columns `<column>_<category>` for each distinct category.
    ///
    /// Categories are ordered lexicographically; row order is preserved and
    /// a null source value yields a row with no indicator set.
    pub fn one_hot_encode(&self, column: Column) -> Result<OneHotEncoding> {
        let labels = self.dataset.labels(column).map_err(|e| {
            ReportingError::InvalidColumn(format!("{column} cannot be encoded: {e}"))
        })?;

        let categories: BTreeSet<&str> = labels.iter().flatten().map(String::as_str).collect();
        let columns = categories
            .into_iter()
            .map(|category| IndicatorColumn {
                name: format!("{}_{category}", column.header()),
                category: category.to_string(),
                values: labels
                    .iter()
                    .map(|label| label.as_deref() == Some(category))
                    .collect(),
            })
            .collect();

        Ok(OneHotEncoding {
            source: column.header().to_string(),
            columns,
        })
    }

    pub fn one_hot_encode_by_name(&self, column: &str) -> Result<OneHotEncoding> {
        self.one_hot_encode(column.parse()?)
    }

    /// Record counts for every (row_key, col_key) value pair.
    ///
    /// Labels appear in first-seen order; combinations without records are 0.
    pub fn cross_tab(&self, row_key: Column, col_key: Column) -> Result<CrossTab> {
        let rows = self.dataset.labels(row_key)?;
        let cols = self.dataset.labels(col_key)?;

        let mut row_index = LabelIndex::default();
        let mut col_index = LabelIndex::default();
        let mut pairs = Vec::with_capacity(rows.len());

        for (row, col) in rows.iter().zip(&cols) {
            if let (Some(row), Some(col)) = (row, col) {
                pairs.push((row_index.insert(row), col_index.insert(col)));
            }
        }

        let mut counts = vec![vec![0usize; col_index.len()]; row_index.len()];
        for (r, c) in pairs {
            if let Some(cell) = counts.get_mut(r).and_then(|row| row.get_mut(c)) {
                *cell += 1;
            }
        }

        Ok(CrossTab {
            row_key: row_key.header().to_string(),
            col_key: col_key.header().to_string(),
            row_labels: row_index.into_labels(),
            col_labels: col_index.into_labels(),
            counts,
        })
    }

    /// Paired (x, y) values, skipping rows where either is missing.
    pub fn scatter(&self, x: NumericColumn, y: NumericColumn) -> Result<ScatterSeries> {
        let xs = self.dataset.numbers(x.column())?;
        let ys = self.dataset.numbers(y.column())?;
        let points = xs
            .into_iter()
            .zip(ys)
            .filter_map(|pair| match pair {
                (Some(x), Some(y)) => Some([x, y]),
                _ => None,
            })
            .collect();

        Ok(ScatterSeries {
            x_label: x.to_string(),
            y_label: y.to_string(),
            points,
        })
    }

    /// Five-number summary of `value_key` per group, in first-seen group order.
    pub fn box_summary(
        &self,
        group_key: Column,
        value_key: NumericColumn,
    ) -> Result<Vec<BoxSummary>> {
        Ok(self
            .grouped_values(group_key, value_key)?
            .into_iter()
            .filter_map(|(group, values)| BoxSummary::from_values(group, &values))
            .collect())
    }

    /// The full dataset as bytes in `format`.
    pub fn serialize(&self, format: ExportFormat) -> Result<Vec<u8>> {
        export::serialize(self.dataset, format)
    }

    fn count_by(&self, column: Column, title: String) -> Result<ValueCounts> {
        let labels = self.dataset.labels(column)?;
        let mut index = LabelIndex::default();
        let mut counts: Vec<usize> = Vec::new();

        for label in labels.iter().flatten() {
            let i = index.insert(label);
            if i == counts.len() {
                counts.push(0);
            }
            if let Some(count) = counts.get_mut(i) {
                *count += 1;
            }
        }

        let mut entries: Vec<ViewEntry<usize>> = index
            .into_labels()
            .into_iter()
            .zip(counts)
            .map(|(label, value)| ViewEntry { label, value })
            .collect();
        sort_stable(&mut entries, |a, b| b.cmp(a));

        debug!("Counted {} categories in '{}'", entries.len(), column);
        Ok(SummaryView {
            title,
            key: column.header().to_string(),
            measure: "count".to_string(),
            entries,
        })
    }

    fn aggregate(
        &self,
        group_key: Column,
        value_key: NumericColumn,
        reduce: impl Fn(&[f64]) -> f64,
    ) -> Result<SummaryView> {
        let entries = self
            .grouped_values(group_key, value_key)?
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(label, values)| ViewEntry {
                label,
                value: reduce(&values),
            })
            .collect();

        Ok(SummaryView {
            title: String::new(),
            key: group_key.header().to_string(),
            measure: value_key.to_string(),
            entries,
        })
    }

    /// Non-null values of `value_key` for each non-null group, first-seen order.
    fn grouped_values(
        &self,
        group_key: Column,
        value_key: NumericColumn,
    ) -> Result<Vec<(String, Vec<f64>)>> {
        let keys = self.dataset.labels(group_key)?;
        let values = self.dataset.numbers(value_key.column())?;

        let mut index = LabelIndex::default();
        let mut groups: Vec<Vec<f64>> = Vec::new();

        for (key, value) in keys.iter().zip(values) {
            let Some(key) = key else { continue };
            let i = index.insert(key);
            if i == groups.len() {
                groups.push(Vec::new());
            }
            if let (Some(value), Some(group)) = (value, groups.get_mut(i)) {
                group.push(value);
            }
        }

        Ok(index.into_labels().into_iter().zip(groups).collect())
    }
}

/// Assigns dense indices to labels in first-seen order.
#[derive(Debug, Default)]
struct LabelIndex {
    positions: HashMap<String, usize>,
    labels: Vec<String>,
}

impl LabelIndex {
    fn insert(&mut self, label: &str) -> usize {
        if let Some(&i) = self.positions.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.positions.insert(label.to_string(), i);
        self.labels.push(label.to_string());
        i
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn into_labels(self) -> Vec<String> {
        self.labels
    }
}

/// Stable sort by value; equal values keep first-seen order.
fn sort_stable<V>(entries: &mut [ViewEntry<V>], cmp: impl Fn(&V, &V) -> std::cmp::Ordering) {
    entries.sort_by(|a, b| cmp(&a.value, &b.value));
}
