//! Exporting the mood log to CSV.

use crate::context::AppContext;
use crate::errors::AppResult;
use crate::export::{self, ExportOutcome};
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

/// Loads the mood log and writes it to the configured export directory.
///
/// `out_dir` overrides the configured directory when given.
///
/// # Errors
///
/// Returns an error if the mood file cannot be read or parsed, or if the
/// export file cannot be written.
pub fn export_mood_data(
    ctx: &AppContext,
    out_dir: Option<&Path>,
    today: NaiveDate,
) -> AppResult<ExportOutcome> {
    let log = ctx.store.load()?;
    let dir = out_dir.unwrap_or(&ctx.config.export_dir);
    info!("Exporting {} mood entries to {}", log.len(), dir.display());
    export::export_moods(&log, dir, today)
}
