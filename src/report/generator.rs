//! Averaging, console table rendering and CSV report output.

use crate::models::{AveragedResult, Grouping};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Header row of the CSV report.
pub const REPORT_HEADER: [&str; 2] = ["position", "average_performance"];

const TABLE_HEADERS: [&str; 2] = ["Position", "Average Performance"];

/// Reduce each position to its mean, highest mean first.
///
/// The sort is stable: positions with equal means keep the grouping's
/// first-seen order.
pub fn compute_averages(grouping: Grouping) -> Vec<AveragedResult> {
    let mut results: Vec<AveragedResult> = grouping
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(position, values)| {
            // Adding 0.0 turns a -0.0 mean into 0.0.
            let average = values.iter().sum::<f64>() / values.len() as f64 + 0.0;
            AveragedResult { position, average }
        })
        .collect();

    // NaN means sort last so the comparison stays a total order.
    results.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or_else(|| a.average.is_nan().cmp(&b.average.is_nan()))
    });

    results
}

/// Render results as a GitHub-flavoured markdown table.
pub fn render_table(results: &[AveragedResult], precision: usize) -> String {
    let rows: Vec<[String; 2]> = results
        .iter()
        .map(|r| [r.position.clone(), format!("{:.*}", precision, r.average)])
        .collect();

    // Header cells carry two columns of padding.
    let mut widths = TABLE_HEADERS.map(|h| h.chars().count() + 2);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();

    table.push_str(&format!(
        "| {:<w0$} | {:>w1$} |\n",
        TABLE_HEADERS[0],
        TABLE_HEADERS[1],
        w0 = widths[0],
        w1 = widths[1]
    ));
    table.push_str(&format!(
        "|:{}|{}:|\n",
        "-".repeat(widths[0] + 1),
        "-".repeat(widths[1] + 1)
    ));

    for [position, average] in &rows {
        table.push_str(&format!(
            "| {:<w0$} | {:>w1$} |\n",
            position,
            average,
            w0 = widths[0],
            w1 = widths[1]
        ));
    }

    table
}

/// Write `<name>.csv` and return its path. An existing file is replaced.
pub fn write_report(name: &str, results: &[AveragedResult], precision: usize) -> Result<PathBuf> {
    let path = PathBuf::from(format!("{}.csv", name));

    // Rows end in a bare `\n` on every platform.
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;

    writer
        .write_record(REPORT_HEADER)
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    for result in results {
        let average = format!("{:.*}", precision, result.average);
        writer
            .write_record([result.position.as_str(), average.as_str()])
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write report {}", path.display()))?;

    Ok(path)
}
