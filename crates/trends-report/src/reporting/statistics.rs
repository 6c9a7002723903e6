//! Descriptive statistics over numeric columns.

use serde::{Deserialize, Serialize};

/// Count, mean, spread and quartiles of one numeric column.
///
/// Nulls are excluded. Every statistic except `count` is `None` when the
/// column has no values; `std` is also `None` for a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStatistics {
    /// Labels of the statistic rows, in display order.
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let sorted = sorted_copy(values);
        Self {
            column: column.into(),
            count: values.len(),
            mean: calculate_mean(values),
            std: calculate_std(values),
            min: sorted.first().copied(),
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }

    /// Statistic values aligned with [`ColumnStatistics::LABELS`].
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Five-number summary of one group, with Tukey whiskers for a box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Build the summary; `None` when the group has no values.
    pub fn from_values(group: impl Into<String>, values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;

        let iqr = q3 - q1;
        let lower_bound = q1 - 1.5 * iqr;
        let upper_bound = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= lower_bound)
            .unwrap_or(min);
        let upper_whisker = sorted
            .iter()
            .copied()
            .rev()
            .find(|v| *v <= upper_bound)
            .unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_bound || *v > upper_bound)
            .collect();

        Some(Self {
            group: group.into(),
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

pub(crate) fn calculate_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = calculate_mean(values)?;
    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    Some(variance.sqrt())
}

/// Quantile of sorted data using linear interpolation between closest ranks.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    Some(low + (high - low) * fraction)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== calculate_std tests ====================

    #[test]
    fn test_calculate_std_basic() {
        // Variance = 10 / 4 = 2.5
        let std = calculate_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_std_single_value() {
        assert_eq!(calculate_std(&[5.0]), None);
    }

    #[test]
    fn test_calculate_std_identical_values() {
        assert_eq!(calculate_std(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
    }

    #[test]
    fn test_quantile_bounds() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(quantile(&sorted, 0.0), Some(10.0));
        assert_eq!(quantile(&sorted, 1.0), Some(30.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    // ==================== ColumnStatistics tests ====================

    #[test]
    fn test_column_statistics() {
        let stats = ColumnStatistics::from_values("Age", &[55.0, 19.0, 50.0, 21.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, Some(36.25));
        assert_eq!(stats.min, Some(19.0));
        assert_eq!(stats.max, Some(55.0));
        assert_eq!(stats.median, Some(35.5));
        assert_eq!(stats.values()[0], Some(4.0));
    }

    #[test]
    fn test_column_statistics_empty() {
        let stats = ColumnStatistics::from_values("Age", &[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_none());
        assert!(stats.min.is_none());
        assert!(stats.q75.is_none());
    }

    // ==================== BoxSummary tests ====================

    #[test]
    fn test_box_summary_with_outlier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let summary = BoxSummary::from_values("Clothing", &values).unwrap();
        assert_eq!(summary.count, 10);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.upper_whisker, 9.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.lower_whisker, 1.0);
    }

    #[test]
    fn test_box_summary_empty_group() {
        assert!(BoxSummary::from_values("Footwear", &[]).is_none());
    }
}
