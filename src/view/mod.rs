//! Derived View
//!
//! - **derived**: Sorted, formatted rows, the running total and chart data
//! - **render**: Table, JSON, CSV and bar chart output

pub mod derived;
pub mod render;

pub use derived::{
    category_breakdown, format_amount, format_total, sorted_by_date, CategoryTotal, ExpenseRow,
    ExpenseView,
};
pub use render::{render, render_chart, render_csv, render_table, OutputFormat, RenderError};
