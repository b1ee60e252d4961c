// ABOUTME: Text renderers for report, batch report, pivot and batch pivot responses
// ABOUTME: Produces fixed-width tables padded to the widest header or cell plus two spaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Analytics MCP Server Contributors

use std::fmt::Write as _;

use super::section_separator;
use crate::constants::limits::PIVOT_SUMMARY_ROWS;
use crate::models::{
    BatchRunPivotReportsResponse, BatchRunReportsResponse, MetricValue, Row, RunPivotReportResponse,
    RunReportResponse,
};

/// Sentinel for a report with no rows
pub const NO_REPORT_DATA: &str = "No data available for this report.";
/// Sentinel for a batch with no reports
pub const NO_BATCH_DATA: &str = "No data available for these reports.";
/// Sentinel for a pivot report with no rows
pub const NO_PIVOT_DATA: &str = "No data available for this pivot report.";
/// Sentinel for a batch with no pivot reports
pub const NO_BATCH_PIVOT_DATA: &str = "No data available for these pivot reports.";

fn cell_values(row: &Row) -> Vec<&str> {
    row.dimension_values
        .iter()
        .map(|v| v.value.as_deref().unwrap_or_default())
        .chain(
            row.metric_values
                .iter()
                .map(|v| v.value.as_deref().unwrap_or_default()),
        )
        .collect()
}

fn total_rows(declared: Option<i64>, returned: usize) -> String {
    declared.map_or_else(|| returned.to_string(), |count| count.to_string())
}

fn joined(values: &[MetricValue]) -> String {
    values
        .iter()
        .map(|v| v.value.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a report as a fixed-width table.
///
/// Dimension columns come first, then metric columns, each in header order.
/// Every column is `max(header chars, widest cell chars) + 2` wide and cells
/// are left-aligned. `Total rows` reports upstream's `rowCount`, or the
/// number of returned rows when upstream omits it.
#[must_use]
pub fn format_report(report: &RunReportResponse) -> String {
    if report.rows.is_empty() {
        return NO_REPORT_DATA.to_owned();
    }

    let headers: Vec<&str> = report
        .dimension_headers
        .iter()
        .map(|h| h.name.as_str())
        .chain(report.metric_headers.iter().map(|h| h.name.as_str()))
        .collect();
    let rows: Vec<Vec<&str>> = report.rows.iter().map(cell_values).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .map(|row| row.get(index).map_or(0, |cell| cell.chars().count()))
                .fold(header.chars().count(), usize::max)
                + 2
        })
        .collect();

    let render = |cells: &dyn Fn(usize) -> String| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(index, &width)| format!("{:<width$}", cells(index)))
            .collect()
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(format!(
        "Total rows: {}",
        total_rows(report.row_count, report.rows.len())
    ));
    lines.push(String::new());
    lines.push(render(&|index| headers[index].to_owned()));
    lines.push(widths.iter().map(|width| "-".repeat(*width)).collect());
    for row in &rows {
        lines.push(render(&|index| {
            row.get(index).copied().unwrap_or_default().to_owned()
        }));
    }

    lines.join("\n")
}

/// Render each report as `Report #k:` followed by its table, separated by a
/// 40-dash line
#[must_use]
pub fn format_batch_reports(batch: &BatchRunReportsResponse) -> String {
    if batch.reports.is_empty() {
        return NO_BATCH_DATA.to_owned();
    }

    batch
        .reports
        .iter()
        .enumerate()
        .map(|(index, report)| format!("Report #{}:\n{}", index + 1, format_report(report)))
        .collect::<Vec<_>>()
        .join(&section_separator())
}

/// Summarise a pivot report: field names, then the first rows with their
/// dimension values, metric values and pivot regions
#[must_use]
pub fn format_pivot_report(report: &RunPivotReportResponse) -> String {
    if report.rows.is_empty() {
        return NO_PIVOT_DATA.to_owned();
    }

    let row_count = total_rows(report.row_count, report.rows.len());
    let mut out = format!("Pivot Report ({row_count} rows)\n\n");

    out.push_str("Dimensions:\n");
    for header in &report.dimension_headers {
        let _ = writeln!(out, "- {}", header.name);
    }

    out.push_str("\nMetrics:\n");
    for header in &report.metric_headers {
        let _ = writeln!(out, "- {}", header.name);
    }

    let _ = writeln!(out, "\nData (first {PIVOT_SUMMARY_ROWS} rows):");
    for (index, row) in report.rows.iter().take(PIVOT_SUMMARY_ROWS).enumerate() {
        let dimensions = row
            .dimension_values
            .iter()
            .map(|v| v.value.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(
            out,
            "\nRow {}:\n  Dimensions: {dimensions}\n  Metrics: {}",
            index + 1,
            joined(&row.metric_values)
        );

        if !row.pivot_value_regions.is_empty() {
            out.push_str("\n  Pivot Values:");
            for (region_index, region) in row.pivot_value_regions.iter().enumerate() {
                let _ = write!(
                    out,
                    "\n    Region {}: {}",
                    region_index + 1,
                    joined(&region.values)
                );
            }
        }
    }

    out
}

/// Render each pivot report as `Pivot Report #k:` followed by its summary
#[must_use]
pub fn format_batch_pivot_reports(batch: &BatchRunPivotReportsResponse) -> String {
    if batch.pivot_reports.is_empty() {
        return NO_BATCH_PIVOT_DATA.to_owned();
    }

    batch
        .pivot_reports
        .iter()
        .enumerate()
        .map(|(index, report)| {
            format!(
                "Pivot Report #{}:\n{}",
                index + 1,
                format_pivot_report(report)
            )
        })
        .collect::<Vec<_>>()
        .join(&section_separator())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    type Cells<'a> = (&'a [&'a str], &'a [&'a str]);

    fn report(dimensions: &[&str], metrics: &[&str], rows: &[Cells<'_>]) -> RunReportResponse {
        let rows: Vec<Value> = rows
            .iter()
            .map(|(dims, mets)| {
                json!({
                    "dimensionValues": dims.iter().map(|v| json!({"value": v})).collect::<Vec<_>>(),
                    "metricValues": mets.iter().map(|v| json!({"value": v})).collect::<Vec<_>>(),
                })
            })
            .collect();
        serde_json::from_value(json!({
            "dimensionHeaders": dimensions.iter().map(|n| json!({"name": n})).collect::<Vec<_>>(),
            "metricHeaders": metrics.iter().map(|n| json!({"name": n, "type": "TYPE_INTEGER"})).collect::<Vec<_>>(),
            "rows": rows,
        }))
        .unwrap()
    }

    fn country_report() -> RunReportResponse {
        RunReportResponse {
            row_count: Some(5),
            ..report(
                &["country"],
                &["activeUsers"],
                &[(&["United States"], &["1200"]), (&["Germany"], &["85"])],
            )
        }
    }

    #[test]
    fn test_report_without_rows_is_sentinel() {
        let empty = report(&["country"], &["activeUsers"], &[]);
        assert_eq!(format_report(&empty), NO_REPORT_DATA);
    }

    #[test]
    fn test_single_row_table() {
        let single = report(&["country"], &["activeUsers"], &[(&["France"], &["42"])]);

        assert_eq!(
            format_report(&single),
            concat!(
                "Total rows: 1\n",
                "\n",
                "country  activeUsers  \n",
                "----------------------\n",
                "France   42           ",
            )
        );
    }

    #[test]
    fn test_multi_row_table_uses_declared_row_count() {
        assert_eq!(
            format_report(&country_report()),
            concat!(
                "Total rows: 5\n",
                "\n",
                "country        activeUsers  \n",
                "----------------------------\n",
                "United States  1200         \n",
                "Germany        85           ",
            )
        );
    }

    #[test]
    fn test_column_width_is_widest_value_plus_two() {
        let wide = report(
            &["city", "deviceCategory"],
            &["sessions"],
            &[
                (&["São Paulo", "mobile"], &["7"]),
                (&["Rio", "desktop"], &["1234567890"]),
            ],
        );

        let text = format_report(&wide);
        let lines: Vec<&str> = text.lines().collect();

        let city = "São Paulo".chars().count() + 2;
        let device = "deviceCategory".len() + 2;
        let sessions = "1234567890".len() + 2;
        assert_eq!(lines[3], "-".repeat(city + device + sessions));
        for line in &lines[2..] {
            assert_eq!(line.chars().count(), city + device + sessions, "{line:?}");
        }
        assert!(lines[2].starts_with(&format!("{:<city$}{:<device$}", "city", "deviceCategory")));
        assert!(lines[4].starts_with("São Paulo  mobile"));
    }

    #[test]
    fn test_batch_sections_match_single_reports() {
        let first = country_report();
        let second = report(&[], &["sessions"], &[(&[], &["9"])]);
        let batch = BatchRunReportsResponse {
            reports: vec![first.clone(), second.clone()],
        };

        let text = format_batch_reports(&batch);
        let sections: Vec<&str> = text.split(section_separator().as_str()).collect();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], format!("Report #1:\n{}", format_report(&first)));
        assert_eq!(sections[1], format!("Report #2:\n{}", format_report(&second)));
    }

    #[test]
    fn test_batch_with_empty_member_and_empty_batch() {
        let batch = BatchRunReportsResponse {
            reports: vec![report(&["country"], &["activeUsers"], &[])],
        };
        assert_eq!(
            format_batch_reports(&batch),
            format!("Report #1:\n{NO_REPORT_DATA}")
        );
        assert_eq!(
            format_batch_reports(&BatchRunReportsResponse::default()),
            NO_BATCH_DATA
        );
    }

    #[test]
    fn test_pivot_summary_lists_regions() {
        let pivot: RunPivotReportResponse = serde_json::from_value(json!({
            "dimensionHeaders": [{"name": "country"}],
            "metricHeaders": [{"name": "activeUsers"}],
            "rows": [{
                "dimensionValues": [{"value": "France"}],
                "metricValues": [{"value": "42"}],
                "pivotValueRegions": [{"values": [{"value": "10"}, {"value": "32"}]}]
            }]
        }))
        .unwrap();

        assert_eq!(
            format_pivot_report(&pivot),
            format!(
                "Pivot Report (1 rows)\n\nDimensions:\n- country\n\nMetrics:\n- activeUsers\n\n\
                 Data (first {PIVOT_SUMMARY_ROWS} rows):\n\nRow 1:\n  Dimensions: France\n  \
                 Metrics: 42\n  Pivot Values:\n    Region 1: 10, 32"
            )
        );
    }

    #[test]
    fn test_pivot_summary_stops_after_summary_rows() {
        let rows: Vec<Value> = (1..=PIVOT_SUMMARY_ROWS + 2)
            .map(|n| json!({"dimensionValues": [{"value": format!("d{n}")}], "metricValues": [{"value": n.to_string()}]}))
            .collect();
        let pivot: RunPivotReportResponse = serde_json::from_value(json!({
            "dimensionHeaders": [{"name": "day"}],
            "metricHeaders": [{"name": "sessions"}],
            "rows": rows,
            "rowCount": 40
        }))
        .unwrap();

        let text = format_pivot_report(&pivot);

        assert!(text.starts_with("Pivot Report (40 rows)"));
        assert!(text.contains(&format!("Row {PIVOT_SUMMARY_ROWS}:")));
        assert!(!text.contains(&format!("Row {}:", PIVOT_SUMMARY_ROWS + 1)));
        assert_eq!(
            format_pivot_report(&RunPivotReportResponse::default()),
            NO_PIVOT_DATA
        );
    }

    #[test]
    fn test_batch_pivot_sections_match_single_reports() {
        let empty = RunPivotReportResponse::default();
        let batch = BatchRunPivotReportsResponse {
            pivot_reports: vec![empty.clone(), empty],
        };

        assert_eq!(
            format_batch_pivot_reports(&batch),
            format!(
                "Pivot Report #1:\n{NO_PIVOT_DATA}{}Pivot Report #2:\n{NO_PIVOT_DATA}",
                section_separator()
            )
        );
        assert_eq!(
            format_batch_pivot_reports(&BatchRunPivotReportsResponse::default()),
            NO_BATCH_PIVOT_DATA
        );
    }
}
