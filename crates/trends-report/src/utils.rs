//! Shared helpers for dtype checks and text formatting.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Format a statistic for display: integers without decimals, others with two.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Format an optional statistic, using `-` for missing values.
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to `max_len` characters with an ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Format a fraction (0.0 - 1.0) as a percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(53.0), "53");
        assert_eq!(format_number(3.14159), "3.14");
        assert_eq!(format_number(-2.5), "-2.50");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(None), "-");
        assert_eq!(format_optional(Some(1.5)), "1.50");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Kentucky", 10), "Kentucky");
        assert_eq!(truncate_str("Massachusetts", 8), "Massa...");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.273), "27.3%");
    }
}
