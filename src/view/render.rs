//! Output renderers for the derived view

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

use super::derived::{format_total, CategoryTotal, ExpenseRow, ExpenseView};

const TABLE_HEADERS: [&str; 5] = ["DATE", "TYPE", "AMOUNT ($)", "DESCRIPTION", "ID"];
const CHART_WIDTH: usize = 40;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render the view in the requested format
pub fn render(view: &ExpenseView, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Csv => render_csv(view),
    }
}

/// Plain-text table followed by the total line
pub fn render_table(view: &ExpenseView) -> String {
    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &view.rows {
        let cells = row_cells(row);
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADERS, &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if view.rows.is_empty() {
        out.push_str("No expenses recorded.\n");
    }
    for row in &view.rows {
        push_line(&mut out, &row_cells(row), &widths);
    }

    out.push('\n');
    let _ = writeln!(out, "Total: ${}", view.total);
    out
}

/// CSV with a header row; the total is not included
pub fn render_csv(view: &ExpenseView) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "type", "amount", "description", "id"])?;
    for row in &view.rows {
        writer.write_record(row_cells(row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Horizontal bar chart of per-category totals
pub fn render_chart(breakdown: &[CategoryTotal]) -> String {
    if breakdown.is_empty() {
        return "No expenses to chart.\n".to_string();
    }

    let max = breakdown.iter().map(|c| c.total).fold(0.0_f64, f64::max);
    let label_width = breakdown
        .iter()
        .map(|c| c.category.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in breakdown {
        let bar_len = if max > 0.0 {
            ((entry.total / max) * CHART_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:<bar_width$}  ${}",
            entry.category.as_str(),
            "#".repeat(bar_len),
            format_total(entry.total),
            width = label_width,
            bar_width = CHART_WIDTH,
        );
    }
    out
}

fn row_cells(row: &ExpenseRow) -> [&str; 5] {
    [
        row.date.as_str(),
        row.category.as_str(),
        row.amount.as_str(),
        row.description.as_str(),
        row.id.as_str(),
    ]
}

fn push_line(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
