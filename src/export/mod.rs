// src/export/mod.rs

mod csv;
mod fs_utils;
mod model;

pub use self::csv::{export_records_csv, write_records_csv};
pub use fs_utils::ensure_writable;
pub use model::{CSV_HEADERS, export_file_name, record_to_row};

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion line for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}
