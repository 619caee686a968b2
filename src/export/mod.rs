//! CSV export of the mood log.
//!
//! One file per export date, `Date,Mood` header, rows in ascending date order.
//! An existing file with the same name is overwritten.

use crate::constants;
use crate::errors::{AppResult, ExportError};
use crate::store::MoodLog;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The log was empty; no file was written.
    NothingToExport,
    /// The log was written to `path`.
    Written { path: PathBuf, rows: usize },
}

/// File name of the export produced on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        constants::EXPORT_FILE_PREFIX,
        today.format(constants::DATE_FORMAT_ISO),
        constants::EXPORT_FILE_EXTENSION
    )
}

/// Writes `log` as CSV into `out_dir`.
///
/// # Errors
///
/// Returns `ExportError::WriteFailed` carrying the file path and the
/// underlying I/O error when the file cannot be created or written.
///
/// # Examples
///
/// ```no_run
/// use moodpet::export::{export_moods, ExportOutcome};
/// use moodpet::store::MoodLog;
/// use chrono::Local;
/// use std::path::Path;
///
/// let outcome = export_moods(&MoodLog::new(), Path::new("/tmp"), Local::now().date_naive()).unwrap();
/// assert_eq!(outcome, ExportOutcome::NothingToExport);
/// ```
pub fn export_moods(log: &MoodLog, out_dir: &Path, today: NaiveDate) -> AppResult<ExportOutcome> {
    if log.is_empty() {
        info!("Mood log is empty, nothing to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let path = out_dir.join(export_file_name(today));
    write_csv(log, &path).map_err(|source| ExportError::WriteFailed {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} mood entries to {:?}", log.len(), path);
    Ok(ExportOutcome::Written {
        path,
        rows: log.len(),
    })
}

fn write_csv(log: &MoodLog, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_row(&mut writer, &constants::EXPORT_HEADER)?;
    for (date, tag) in log.iter() {
        let date = date.format(constants::DATE_FORMAT_ISO).to_string();
        write_row(&mut writer, &[date.as_str(), tag.as_str()])?;
    }
    writer.flush()
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let row: Vec<String> = fields.iter().map(|field| quote_field(field)).collect();
    write!(writer, "{}\r\n", row.join(","))
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
