//! Output formatting for calculation results.
//!
//! - [`csv`] - CSV output for blocks and tier allocations
//! - [`terminal`] - terminal output with colours

mod csv;
mod terminal;

pub use csv::{allocations_csv, blocks_csv};
pub use terminal::{format_field, render_estimate, render_plan, render_report};
