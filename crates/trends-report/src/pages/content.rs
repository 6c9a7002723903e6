//! Section builders for each page.

use super::{PageParams, Section};
use crate::dataset::{CategoricalColumn, Column, Dataset, NumericColumn};
use crate::error::Result;
use crate::export::{Download, Record};
use crate::reporting::{ColumnStatistics, CrossTab, OneHotEncoding, Reporter, Table};
use crate::utils::{format_number, format_optional, format_percent};

pub(super) fn home(dataset: &Dataset, params: &PageParams) -> Result<Vec<Section>> {
    let reporter = Reporter::new(dataset);
    let (rows, columns) = reporter.shape();

    let mut overview = vec![
        ("Rows".to_string(), rows.to_string()),
        ("Columns".to_string(), columns.to_string()),
    ];
    if let Some(source) = dataset.source() {
        overview.push(("Source".to_string(), source.display().to_string()));
    }

    Ok(vec![
        Section::KeyValue {
            heading: "Dataset overview".to_string(),
            pairs: overview,
        },
        Section::Table {
            heading: "Preview".to_string(),
            table: records_table(&dataset.column_names(), &reporter.head(params.preview_rows)?),
        },
        Section::Table {
            heading: "Descriptive statistics".to_string(),
            table: statistics_table(&reporter.describe()?),
        },
    ])
}

pub(super) fn visualisations(dataset: &Dataset, params: &PageParams) -> Result<Vec<Section>> {
    let reporter = Reporter::new(dataset);

    let counts = reporter.value_counts(params.column)?;
    let top_customers = reporter.total_purchase_per_customer()?.top_n(params.top_n)?;

    Ok(vec![
        Section::BarChart {
            heading: format!("Categorical analysis: {}", params.column),
            view: counts.map_values(|count| count as f64),
        },
        Section::BarChart {
            heading: format!("Top {} customers by total purchase amount", params.top_n),
            view: top_customers,
        },
        Section::BarChart {
            heading: "Average purchase amount per category".to_string(),
            view: reporter.average_purchase_per_category()?,
        },
        Section::ScatterPlot {
            heading: "Age vs purchase amount".to_string(),
            series: reporter.scatter(NumericColumn::Age, NumericColumn::PurchaseAmount)?,
        },
        Section::BoxPlot {
            heading: "Purchase amount by category".to_string(),
            value_label: NumericColumn::PurchaseAmount.to_string(),
            boxes: reporter.box_summary(Column::Category, NumericColumn::PurchaseAmount)?,
        },
        Section::PieChart {
            heading: "Subscription status".to_string(),
            view: reporter.share(Column::SubscriptionStatus)?,
        },
        Section::Table {
            heading: "Gender by season".to_string(),
            table: cross_tab_table(&reporter.cross_tab(Column::Gender, Column::Season)?),
        },
        Section::Table {
            heading: "One-hot encoding of Season".to_string(),
            table: one_hot_table(
                &reporter.one_hot_encode(Column::Season)?,
                params.preview_rows,
            ),
        },
        Section::Download {
            heading: "Download the data".to_string(),
            download: Download::for_dataset(dataset, params.export_format)?,
        },
    ])
}

pub(super) fn conclusions(dataset: &Dataset) -> Result<Vec<Section>> {
    let reporter = Reporter::new(dataset);
    let mut findings = Vec::new();

    let averages = reporter.average_purchase_per_category()?;
    if let (Some(lowest), Some(highest)) = (averages.entries.first(), averages.entries.last()) {
        findings.push(format!(
            "{} has the highest average purchase amount ({} USD); {} has the lowest ({} USD).",
            highest.label,
            format_number(highest.value),
            lowest.label,
            format_number(lowest.value)
        ));
    }

    let seasons = reporter.value_counts(CategoricalColumn::Season)?;
    if let Some(busiest) = seasons.entries.first() {
        findings.push(format!(
            "{} is the busiest season with {} purchases.",
            busiest.label, busiest.value
        ));
    }

    let customers = reporter.total_purchase_per_customer()?;
    if let Some(top) = customers.entries.first() {
        findings.push(format!(
            "Customer {} is the top spender with {} USD in total.",
            top.label,
            format_number(top.value)
        ));
    }

    let subscriptions = reporter.share(Column::SubscriptionStatus)?;
    if let Some(share) = subscriptions.get("Yes") {
        findings.push(format!(
            "{} of purchases come from subscribed customers.",
            format_percent(*share)
        ));
    }

    let genders = reporter.share(Column::Gender)?;
    if let Some(leading) = genders.entries.first() {
        findings.push(format!(
            "{} customers account for {} of purchases.",
            leading.label,
            format_percent(leading.value)
        ));
    }

    if findings.is_empty() {
        findings.push("The dataset is empty; there is nothing to conclude.".to_string());
    }

    Ok(vec![Section::Text {
        heading: "Key findings".to_string(),
        paragraphs: findings,
    }])
}

pub(super) fn about() -> Vec<Section> {
    let columns = Column::ALL
        .into_iter()
        .map(|column| {
            let kind = if column.is_numeric() {
                "numeric"
            } else if column.is_categorical() {
                "categorical"
            } else {
                "identifier"
            };
            (column.header().to_string(), kind.to_string())
        })
        .collect();

    vec![
        Section::Text {
            heading: "About this dashboard".to_string(),
            paragraphs: vec![
                "Descriptive analysis of a retail shopping trends dataset: one row per purchase, with customer demographics, the item category, the amount spent, the season and the customer's purchase habits.".to_string(),
                "Use the Visualisations page to compare categories and seasons, and the Conclusions page for a summary of the main findings.".to_string(),
            ],
        },
        Section::KeyValue {
            heading: "Columns".to_string(),
            pairs: columns,
        },
    ]
}

fn records_table(headers: &[String], records: &[Record]) -> Table {
    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| match record.get(header) {
                    None | Some(serde_json::Value::Null) => String::new(),
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    Table {
        headers: headers.to_vec(),
        rows,
    }
}

fn statistics_table(stats: &[ColumnStatistics]) -> Table {
    let mut headers = vec![String::new()];
    headers.extend(stats.iter().map(|s| s.column.clone()));

    let values: Vec<_> = stats.iter().map(ColumnStatistics::values).collect();
    let rows = ColumnStatistics::LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.to_string()];
            row.extend(
                values
                    .iter()
                    .map(|column| format_optional(column.get(i).copied().flatten())),
            );
            row
        })
        .collect();

    Table { headers, rows }
}

fn cross_tab_table(tab: &CrossTab) -> Table {
    let mut headers = vec![format!("{} / {}", tab.row_key, tab.col_key)];
    headers.extend(tab.col_labels.iter().cloned());

    let rows = tab
        .row_labels
        .iter()
        .zip(&tab.counts)
        .map(|(label, counts)| {
            let mut row = vec![label.clone()];
            row.extend(counts.iter().map(usize::to_string));
            row
        })
        .collect();

    Table { headers, rows }
}

fn one_hot_table(encoding: &OneHotEncoding, limit: usize) -> Table {
    let rows = (0..encoding.row_count().min(limit))
        .filter_map(|i| encoding.row(i))
        .map(|row| row.iter().map(bool::to_string).collect())
        .collect();

    Table {
        headers: encoding
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        rows,
    }
}
