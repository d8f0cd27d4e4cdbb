// src/export/csv.rs

use super::model::{CSV_HEADERS, export_file_name, record_to_row};
use super::{ensure_writable, notify_export_success};
use crate::errors::AppResult;
use crate::models::WorkRecord;
use crate::ui::messages::info;
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the records as BOM-prefixed UTF-8 CSV.
///
/// Every non-numeric field is double-quoted, so the free-text columns are
/// always quoted and the duration column never is.
pub fn write_records_csv<W: Write>(mut out: W, records: &[WorkRecord]) -> AppResult<()> {
    out.write_all(UTF8_BOM)?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(out);

    wtr.write_record(CSV_HEADERS)?;
    for r in records {
        wtr.write_record(record_to_row(r))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export into `dir/work_histories_<date>.csv` and return the file path.
pub fn export_records_csv(
    records: &[WorkRecord],
    dir: &Path,
    date: NaiveDate,
    force: bool,
) -> AppResult<PathBuf> {
    let path = dir.join(export_file_name(date));
    ensure_writable(&path, force)?;

    info(format!("Exporting to CSV: {}", path.display()));
    let file = File::create(&path)?;
    write_records_csv(BufWriter::new(file), records)?;

    notify_export_success("CSV", &path);
    Ok(path)
}
