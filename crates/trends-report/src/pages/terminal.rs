//! Plain-text layout of a render model, used by the command-line front end.

use super::{RenderModel, Section};
use crate::reporting::{BoxSummary, ScatterSeries, SummaryView, Table};
use crate::utils::{format_number, format_percent, truncate_str};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 80;
const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 24;
const CELL_WIDTH: usize = 22;

impl fmt::Display for RenderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "{}", self.title.to_uppercase())?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading())?;
            writeln!(f, "{}", "-".repeat(section.heading().chars().count().max(40)))?;
            write_section(f, section)?;
        }

        Ok(())
    }
}

fn write_section(out: &mut impl Write, section: &Section) -> fmt::Result {
    match section {
        Section::Text { paragraphs, .. } => {
            for paragraph in paragraphs {
                writeln!(out, "  - {paragraph}")?;
            }
            Ok(())
        }
        Section::KeyValue { pairs, .. } => {
            for (key, value) in pairs {
                writeln!(out, "  {:<LABEL_WIDTH$} {value}", format!("{key}:"))?;
            }
            Ok(())
        }
        Section::Table { table, .. } => write_table(out, table),
        Section::BarChart { view, .. } => write_bars(out, view),
        Section::ScatterPlot { series, .. } => write_scatter(out, series),
        Section::BoxPlot { boxes, .. } => write_boxes(out, boxes),
        Section::PieChart { view, .. } => {
            for entry in &view.entries {
                writeln!(
                    out,
                    "  {:<LABEL_WIDTH$} {:>7}",
                    truncate_str(&entry.label, LABEL_WIDTH),
                    format_percent(entry.value)
                )?;
            }
            Ok(())
        }
        Section::Download { download, .. } => writeln!(
            out,
            "  {} ({}, {} bytes)",
            download.file_name, download.mime_type, download.size_bytes
        ),
    }
}

fn write_table(out: &mut impl Write, table: &Table) -> fmt::Result {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(header))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .min(CELL_WIDTH)
        })
        .collect();

    write_row(out, &table.headers, &widths)?;
    for row in &table.rows {
        write_row(out, row, &widths)?;
    }
    if table.rows.is_empty() {
        writeln!(out, "  (no rows)")?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> fmt::Result {
    write!(out, " ")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, " {:<width$}", truncate_str(cell, *width), width = *width)?;
    }
    writeln!(out)
}

fn write_bars(out: &mut impl Write, view: &SummaryView) -> fmt::Result {
    let max = view
        .entries
        .iter()
        .map(|entry| entry.value)
        .fold(0.0_f64, f64::max);

    for entry in &view.entries {
        let filled = if max > 0.0 {
            ((entry.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:<BAR_WIDTH$} {}",
            truncate_str(&entry.label, LABEL_WIDTH),
            "#".repeat(filled),
            format_number(entry.value)
        )?;
    }
    if view.is_empty() {
        writeln!(out, "  (no data)")?;
    }
    Ok(())
}

fn write_scatter(out: &mut impl Write, series: &ScatterSeries) -> fmt::Result {
    let range = |axis: usize| {
        series
            .points
            .iter()
            .filter_map(|point| point.get(axis).copied())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
    };

    writeln!(out, "  {} points", series.points.len())?;
    for (axis, label) in [(0, &series.x_label), (1, &series.y_label)] {
        if let Some((lo, hi)) = range(axis) {
            writeln!(
                out,
                "  {:<LABEL_WIDTH$} {} .. {}",
                format!("{label}:"),
                format_number(lo),
                format_number(hi)
            )?;
        }
    }
    Ok(())
}

fn write_boxes(out: &mut impl Write, boxes: &[BoxSummary]) -> fmt::Result {
    writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9}",
        "Group", "min", "q1", "median", "q3", "max", "outliers"
    )?;
    for b in boxes {
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9}",
            truncate_str(&b.group, LABEL_WIDTH),
            format_number(b.min),
            format_number(b.q1),
            format_number(b.median),
            format_number(b.q3),
            format_number(b.max),
            b.outliers.len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Page;
    use crate::reporting::ViewEntry;

    fn model(sections: Vec<Section>) -> RenderModel {
        RenderModel {
            page: Page::Visualisations,
            title: "Visualisations".to_string(),
            sections,
        }
    }

    #[test]
    fn test_bar_chart_scales_to_largest_value() {
        let view = SummaryView {
            title: "Totals".to_string(),
            key: "Category".to_string(),
            measure: "count".to_string(),
            entries: vec![
                ViewEntry {
                    label: "Clothing".to_string(),
                    value: 10.0,
                },
                ViewEntry {
                    label: "Footwear".to_string(),
                    value: 5.0,
                },
            ],
        };
        let text = model(vec![Section::BarChart {
            heading: "Counts".to_string(),
            view,
        }])
        .to_string();

        assert!(text.contains("VISUALISATIONS"));
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
        assert!(text.contains(&format!("{} ", "#".repeat(BAR_WIDTH / 2))));
    }

    #[test]
    fn test_table_renders_headers_and_rows() {
        let table = Table {
            headers: vec!["Gender".to_string(), "Spring".to_string()],
            rows: vec![vec!["Male".to_string(), "12".to_string()]],
        };
        let text = model(vec![Section::Table {
            heading: "Cross tab".to_string(),
            table,
        }])
        .to_string();

        assert!(text.contains("Gender"));
        assert!(text.contains("Male"));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_empty_table_notice() {
        let text = model(vec![Section::Table {
            heading: "Preview".to_string(),
            table: Table::default(),
        }])
        .to_string();
        assert!(text.contains("(no rows)"));
    }
}
