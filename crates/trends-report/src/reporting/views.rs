//! Summary view types handed to the presentation layer.
//!
//! All views are plain owned data with no reference back to the dataset,
//! so they serialize directly into a render model.

use crate::error::{ReportingError, Result};
use serde::{Deserialize, Serialize};

/// One labelled entry of a [`SummaryView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEntry<V> {
    pub label: String,
    pub value: V,
}

/// An ordered label → value mapping produced by one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView<V = f64> {
    pub title: String,
    /// Header of the column the labels come from.
    pub key: String,
    /// What the values measure (a column header or `count`).
    pub measure: String,
    pub entries: Vec<ViewEntry<V>>,
}

/// Category → occurrence count.
pub type ValueCounts = SummaryView<usize>;

impl<V> SummaryView<V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value for `label`, if present.
    pub fn get(&self, label: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Convert entry values, keeping labels and order.
    pub fn map_values<W>(self, f: impl Fn(V) -> W) -> SummaryView<W> {
        SummaryView {
            title: self.title,
            key: self.key,
            measure: self.measure,
            entries: self
                .entries
                .into_iter()
                .map(|entry| ViewEntry {
                    label: entry.label,
                    value: f(entry.value),
                })
                .collect(),
        }
    }
}

impl<V: Clone> SummaryView<V> {
    /// First `n` entries of the view.
    ///
    /// The whole view is returned when `n` exceeds its length.
    pub fn top_n(&self, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(ReportingError::InvalidArgument(
                "top-N must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            title: self.title.clone(),
            key: self.key.clone(),
            measure: self.measure.clone(),
            entries: self.entries.iter().take(n).cloned().collect(),
        })
    }
}

/// Count matrix of two categorical columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTab {
    pub row_key: String,
    pub col_key: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[row][col]`, aligned with the label vectors.
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn get(&self, row: &str, col: &str) -> Option<usize> {
        let r = self.row_labels.iter().position(|label| label == row)?;
        let c = self.col_labels.iter().position(|label| label == col)?;
        self.counts.get(r)?.get(c).copied()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Boolean indicator column produced by one-hot encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorColumn {
    /// `<column>_<category>`
    pub name: String,
    pub category: String,
    pub values: Vec<bool>,
}

/// One-hot encoding of a column, one indicator per distinct category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoding {
    pub source: String,
    pub columns: Vec<IndicatorColumn>,
}

impl OneHotEncoding {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Indicator values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<bool>> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).copied())
            .collect()
    }
}

/// Paired numeric observations for a scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

/// Rectangular table of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view(values: &[(&str, f64)]) -> SummaryView {
        SummaryView {
            title: "test".to_string(),
            key: "Category".to_string(),
            measure: "Purchase Amount (USD)".to_string(),
            entries: values
                .iter()
                .map(|(label, value)| ViewEntry {
                    label: label.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_top_n_prefix() {
        let v = view(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
        let top = v.top_n(2).unwrap();
        assert_eq!(top.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(top.entries[..], v.entries[..2]);
    }

    #[test]
    fn test_top_n_larger_than_view() {
        let v = view(&[("a", 3.0), ("b", 2.0)]);
        assert_eq!(v.top_n(10).unwrap(), v);
    }

    #[test]
    fn test_top_n_zero_is_invalid() {
        let v = view(&[("a", 3.0)]);
        assert!(matches!(
            v.top_n(0),
            Err(ReportingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_map_values_keeps_order() {
        let v = view(&[("a", 3.0), ("b", 2.0)]).map_values(|x| x * 2.0);
        assert_eq!(v.get("a"), Some(&6.0));
        assert_eq!(v.labels().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_cross_tab_lookup() {
        let tab = CrossTab {
            row_key: "Gender".to_string(),
            col_key: "Season".to_string(),
            row_labels: vec!["M".to_string(), "F".to_string()],
            col_labels: vec!["Spring".to_string(), "Winter".to_string()],
            counts: vec![vec![1, 1], vec![1, 0]],
        };
        assert_eq!(tab.get("F", "Winter"), Some(0));
        assert_eq!(tab.get("X", "Winter"), None);
        assert_eq!(tab.total(), 3);
    }
}
