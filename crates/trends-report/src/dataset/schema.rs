//! Closed column enumerations for the shopping trends schema.
//!
//! Column names coming from a user (dropdowns, CLI flags) are parsed into
//! these enums before any computation, so an unknown name fails fast with
//! [`ReportingError::InvalidColumn`].

use crate::error::ReportingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every column of the fixed dataset schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    CustomerId,
    Age,
    Gender,
    Category,
    PurchaseAmount,
    Location,
    Season,
    ReviewRating,
    SubscriptionStatus,
    PreviousPurchases,
    FrequencyOfPurchases,
}

impl Column {
    /// All required columns, in the order of the published dataset.
    pub const ALL: [Column; 11] = [
        Column::CustomerId,
        Column::Age,
        Column::Gender,
        Column::Category,
        Column::PurchaseAmount,
        Column::Location,
        Column::Season,
        Column::ReviewRating,
        Column::SubscriptionStatus,
        Column::PreviousPurchases,
        Column::FrequencyOfPurchases,
    ];

    /// Header name as it appears in the source file.
    pub const fn header(self) -> &'static str {
        match self {
            Self::CustomerId => "Customer ID",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Category => "Category",
            Self::PurchaseAmount => "Purchase Amount (USD)",
            Self::Location => "Location",
            Self::Season => "Season",
            Self::ReviewRating => "Review Rating",
            Self::SubscriptionStatus => "Subscription Status",
            Self::PreviousPurchases => "Previous Purchases",
            Self::FrequencyOfPurchases => "Frequency of Purchases",
        }
    }

    /// Alternative headers accepted at load time and normalized to [`Column::header`].
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::PurchaseAmount => &["Purchase Amount"],
            _ => &[],
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Age | Self::PurchaseAmount | Self::ReviewRating | Self::PreviousPurchases
        )
    }

    pub const fn is_categorical(self) -> bool {
        matches!(
            self,
            Self::Gender
                | Self::Location
                | Self::Season
                | Self::Category
                | Self::SubscriptionStatus
                | Self::FrequencyOfPurchases
        )
    }

    fn matches_name(self, name: &str) -> bool {
        let name = name.trim();
        self.header().eq_ignore_ascii_case(name)
            || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = ReportingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.matches_name(s))
            .ok_or_else(|| ReportingError::InvalidColumn(format!("'{s}' is not a dataset column")))
    }
}

/// Columns offered by the categorical value-count selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoricalColumn {
    Gender,
    Location,
    #[default]
    Season,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 3] = [Self::Gender, Self::Location, Self::Season];

    pub const fn column(self) -> Column {
        match self {
            Self::Gender => Column::Gender,
            Self::Location => Column::Location,
            Self::Season => Column::Season,
        }
    }
}

impl From<CategoricalColumn> for Column {
    fn from(c: CategoricalColumn) -> Self {
        c.column()
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().header())
    }
}

impl FromStr for CategoricalColumn {
    type Err = ReportingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ReportingError::InvalidColumn(format!(
                "'{s}' is not one of Gender, Location, Season"
            ))
        };
        let column = s.parse::<Column>().map_err(|_| invalid())?;
        CategoricalColumn::ALL
            .into_iter()
            .find(|c| c.column() == column)
            .ok_or_else(invalid)
    }
}

/// Columns that may be aggregated (summed, averaged, plotted on an axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericColumn {
    Age,
    PurchaseAmount,
    ReviewRating,
    PreviousPurchases,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 4] = [
        Self::Age,
        Self::PurchaseAmount,
        Self::ReviewRating,
        Self::PreviousPurchases,
    ];

    pub const fn column(self) -> Column {
        match self {
            Self::Age => Column::Age,
            Self::PurchaseAmount => Column::PurchaseAmount,
            Self::ReviewRating => Column::ReviewRating,
            Self::PreviousPurchases => Column::PreviousPurchases,
        }
    }
}

impl From<NumericColumn> for Column {
    fn from(c: NumericColumn) -> Self {
        c.column()
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().header())
    }
}

impl FromStr for NumericColumn {
    type Err = ReportingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let column = s.parse::<Column>()?;
        NumericColumn::ALL
            .into_iter()
            .find(|c| c.column() == column)
            .ok_or_else(|| ReportingError::InvalidColumn(format!("'{s}' is not a numeric column")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_from_header() {
        assert_eq!("Season".parse::<Column>().unwrap(), Column::Season);
        assert_eq!("customer id".parse::<Column>().unwrap(), Column::CustomerId);
        assert_eq!(
            "Purchase Amount (USD)".parse::<Column>().unwrap(),
            Column::PurchaseAmount
        );
    }

    #[test]
    fn test_column_alias() {
        assert_eq!(
            "Purchase Amount".parse::<Column>().unwrap(),
            Column::PurchaseAmount
        );
    }

    #[test]
    fn test_unknown_column_is_invalid() {
        let err = "Price".parse::<Column>().unwrap_err();
        assert!(matches!(err, ReportingError::InvalidColumn(_)));
    }

    #[test]
    fn test_categorical_restricted_set() {
        assert_eq!(
            "Gender".parse::<CategoricalColumn>().unwrap(),
            CategoricalColumn::Gender
        );
        // A real column, but not offered by the selector
        let err = "Category".parse::<CategoricalColumn>().unwrap_err();
        assert!(matches!(err, ReportingError::InvalidColumn(_)));
        let err = "Price".parse::<CategoricalColumn>().unwrap_err();
        assert!(matches!(err, ReportingError::InvalidColumn(_)));
    }

    #[test]
    fn test_numeric_restricted_set() {
        assert_eq!(
            "Review Rating".parse::<NumericColumn>().unwrap(),
            NumericColumn::ReviewRating
        );
        assert!("Gender".parse::<NumericColumn>().is_err());
    }

    #[test]
    fn test_column_kinds() {
        assert!(Column::Age.is_numeric());
        assert!(!Column::CustomerId.is_numeric());
        assert!(!Column::CustomerId.is_categorical());
        assert!(Column::SubscriptionStatus.is_categorical());
    }
}
