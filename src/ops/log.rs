//! Logging a mood from the command line.

use crate::context::AppContext;
use crate::errors::AppResult;
use crate::mood::MoodTag;
use crate::scheduler::PromptKind;
use crate::store::SavedMood;
use crate::ui::{self, PromptAnswer};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Saves `tag` for `date` and writes the companion's reaction.
pub fn record_mood<W: Write>(
    ctx: &AppContext,
    date: NaiveDate,
    tag: MoodTag,
    output: &mut W,
) -> AppResult<SavedMood> {
    let saved = ctx.store.save_for_date(date, tag)?;
    write!(
        output,
        "{}",
        ui::render_reaction(&saved, &ctx.catalog, &ctx.assets)
    )?;
    Ok(saved)
}

/// Logs a mood for `date`.
///
/// With `mood` given it is saved directly; a name outside the catalog is
/// kept as typed. Without it the prompt is shown and answers are read from
/// `input` until one is recognized. Dismissing or reaching end of input
/// saves nothing and returns `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the mood file is malformed, locked, or cannot be
/// written, or if writing to `output` fails.
pub fn log_mood<R: BufRead, W: Write>(
    ctx: &AppContext,
    mood: Option<&str>,
    date: NaiveDate,
    input: &mut R,
    output: &mut W,
) -> AppResult<Option<SavedMood>> {
    if let Some(name) = mood {
        let tag = match ctx.catalog.find_by_name(name) {
            Some(entry) => entry.tag.clone(),
            None => {
                warn!("Mood '{}' is not in the catalog, saving it as typed", name);
                MoodTag::new(name.trim())
            }
        };
        return record_mood(ctx, date, tag, output).map(Some);
    }

    write!(
        output,
        "{}",
        ui::render_prompt(date, &ctx.catalog, PromptKind::Manual)
    )?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("Input closed before a mood was chosen");
            return Ok(None);
        }

        match ui::parse_prompt_answer(&line, &ctx.catalog, PromptKind::Manual) {
            Some(PromptAnswer::Mood(tag)) => return record_mood(ctx, date, tag, output).map(Some),
            Some(PromptAnswer::Dismiss) => return Ok(None),
            // Manual prompts never offer snooze.
            Some(PromptAnswer::Snooze) => return Ok(None),
            None => {
                writeln!(output, "Pick a number or a mood name, or 'd' to dismiss.")?;
                output.flush()?;
            }
        }
    }
}
