//! Tabular export of records.
//!
//! One CSV row per record, header first, columns in a fixed order:
//! `id, name, title, description` and, unless disabled, `url`.

use crate::error::CoreResult;
use crate::record::Record;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Export column names, in order.
pub const EXPORT_COLUMNS: [&str; 5] = ["id", "name", "title", "description", "url"];

/// Options controlling an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Whether the `url` column is written.
    pub include_url: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { include_url: true }
    }
}

impl ExportOptions {
    fn columns(self) -> &'static [&'static str] {
        if self.include_url {
            &EXPORT_COLUMNS
        } else {
            &EXPORT_COLUMNS[..4]
        }
    }
}

/// Writes `records` as CSV to `writer`.
///
/// Returns the number of data rows written (the header is not counted).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn export_records<W: Write>(
    records: &[Record],
    writer: W,
    options: ExportOptions,
) -> CoreResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(options.columns())?;

    for record in records {
        let id = record.id().to_string();
        let mut row = vec![
            id.as_str(),
            record.name(),
            record.title(),
            record.description(),
        ];
        if options.include_url {
            row.push(record.url());
        }
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(records.len())
}

/// Writes `records` as CSV to a new file at `path`, replacing any existing
/// file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_to_path(
    records: &[Record],
    path: &Path,
    options: ExportOptions,
) -> CoreResult<usize> {
    let file = File::create(path)?;
    let rows = export_records(records, file, options)?;
    info!(path = %path.display(), rows, "exported records");
    Ok(rows)
}
