//! Interactive month-by-month review of logged moods.

use crate::calendar::{select_day, MonthCursor, MonthView};
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui;
use std::io::{BufRead, Write};
use tracing::debug;

const NAV_HINT: &str = "[p] prev  [n] next  [1-31] show day  [q] close";

/// One line of calendar input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCommand {
    Prev,
    Next,
    Select(u32),
    Quit,
}

pub fn parse_calendar_command(input: &str) -> Option<CalendarCommand> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "p" | "prev" => Some(CalendarCommand::Prev),
        "n" | "next" => Some(CalendarCommand::Next),
        "q" | "quit" => Some(CalendarCommand::Quit),
        other => other.parse().ok().map(CalendarCommand::Select),
    }
}

/// Writes the month grid and legend for `cursor`.
pub fn show_month<W: Write>(ctx: &AppContext, cursor: MonthCursor, output: &mut W) -> AppResult<()> {
    let log = ctx.store.load()?;
    let view = MonthView::build(cursor, &log);
    write!(
        output,
        "{}",
        ui::render_month(&view, &ctx.catalog, ctx.config.color)
    )?;
    write!(output, "{}", ui::render_legend(&ctx.catalog, ctx.config.color))?;
    Ok(())
}

/// Runs the calendar starting at `start` until `q` or end of input.
///
/// The mood log is read once when the calendar opens. Selecting a day with
/// no recorded mood, or a day the month does not have, does nothing.
///
/// Returns the month that was on screen when the calendar closed.
pub fn review_calendar<R: BufRead, W: Write>(
    ctx: &AppContext,
    start: MonthCursor,
    input: &mut R,
    output: &mut W,
) -> AppResult<MonthCursor> {
    let log = ctx.store.load()?;
    let mut cursor = start;

    let draw = |cursor: MonthCursor, output: &mut W| -> AppResult<()> {
        let view = MonthView::build(cursor, &log);
        write!(
            output,
            "{}",
            ui::render_month(&view, &ctx.catalog, ctx.config.color)
        )?;
        writeln!(output, "{}", NAV_HINT)?;
        output.flush()?;
        Ok(())
    };

    draw(cursor, output)?;
    write!(output, "{}", ui::render_legend(&ctx.catalog, ctx.config.color))?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_calendar_command(&line) {
            Some(CalendarCommand::Prev) => {
                cursor = cursor.prev();
                draw(cursor, output)?;
            }
            Some(CalendarCommand::Next) => {
                cursor = cursor.next();
                draw(cursor, output)?;
            }
            Some(CalendarCommand::Select(day)) => {
                let detail = cursor
                    .date(day)
                    .and_then(|date| select_day(&log, &ctx.catalog, date));
                match detail {
                    Some(detail) => write!(output, "{}", ui::render_detail(&detail, &ctx.assets))?,
                    None => debug!("Nothing recorded for day {} of {}", day, cursor.title()),
                }
            }
            Some(CalendarCommand::Quit) => break,
            None => writeln!(output, "{}", NAV_HINT)?,
        }
    }

    Ok(cursor)
}
