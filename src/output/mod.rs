//! Output formatting for subnet results.
//!
//! This module handles presenting results:
//! - [`csv`] - CSV export
//! - [`json`] - JSON payload
//! - [`terminal`] - Terminal tables with colors

mod csv;
mod json;
mod terminal;

pub use csv::{escape_csv_field, export_file_name, split_csv, subnet_csv, vlsm_csv, write_export};
pub use json::to_json;
pub use terminal::{format_field, split_table, subnet_details, unplaced_lines, vlsm_table};
