//! Terminal presentation: text panels for the prompt, the reaction, the
//! calendar and passive notifications, plus parsing of what the user types.
//!
//! Everything here returns strings so panels can be written to any sink.

use crate::assets::{self, AssetResolver};
use crate::calendar::{DayCell, MonthView, MoodDetail};
use crate::constants;
use crate::errors::AppResult;
use crate::export::ExportOutcome;
use crate::mood::{MoodCatalog, MoodTag};
use crate::scheduler::PromptKind;
use crate::store::SavedMood;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;
use std::fmt::Write as _;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const ANSI_RESET: &str = "\x1b[0m";
const RECORDED_FG: (u8, u8, u8) = (0x8e, 0x00, 0x5d);

/// What the user chose in the mood prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Mood(MoodTag),
    Snooze,
    Dismiss,
}

/// Parses a typed prompt answer: a catalog number, a mood name, `s`/`snooze` or `d`/`dismiss`.
///
/// Snoozing is only offered when `kind` allows it. Returns `None` for
/// anything unrecognized so the caller can ask again.
pub fn parse_prompt_answer(
    input: &str,
    catalog: &MoodCatalog,
    kind: PromptKind,
) -> Option<PromptAnswer> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "s" | "snooze" if kind.can_snooze() => return Some(PromptAnswer::Snooze),
        "d" | "dismiss" => return Some(PromptAnswer::Dismiss),
        _ => {}
    }

    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| catalog.entries().get(index))
            .map(|entry| PromptAnswer::Mood(entry.tag.clone()));
    }

    catalog
        .find_by_name(input)
        .map(|entry| PromptAnswer::Mood(entry.tag.clone()))
}

/// The mood selection panel.
pub fn render_prompt(today: NaiveDate, catalog: &MoodCatalog, kind: PromptKind) -> String {
    let mut panel = String::new();
    let _ = writeln!(panel, "=== {} ===", today.format(constants::DATE_FORMAT_ISO));
    if kind == PromptKind::Snoozed {
        let _ = writeln!(panel, "{} is back! Ready now?", constants::PET_NAME);
    }
    let _ = writeln!(panel, "How are you feeling today?");
    for (number, entry) in catalog.entries().iter().enumerate() {
        let _ = writeln!(panel, "  [{}] {}", number + 1, entry.label());
    }
    if kind.can_snooze() {
        let _ = writeln!(panel, "  [s] Snooze {} min", constants::SNOOZE_MINUTES);
    }
    let _ = writeln!(panel, "  [d] Dismiss");
    panel
}

/// Panel shown after a mood was saved.
pub fn render_reaction(saved: &SavedMood, catalog: &MoodCatalog, assets: &AssetResolver) -> String {
    let image = assets.mood_image(&saved.tag);
    let mut panel = String::new();
    let _ = writeln!(panel, "--- {} reacts! ---", constants::PET_NAME);
    let _ = writeln!(panel, "{}", assets::describe(image.as_ref()));
    let _ = writeln!(panel, "{}", catalog.message_for(&saved.tag));
    panel
}

/// Panel shown when a recorded calendar day is selected.
pub fn render_detail(detail: &MoodDetail, assets: &AssetResolver) -> String {
    let image = assets.mood_image(&detail.tag);
    let mut panel = String::new();
    let _ = writeln!(
        panel,
        "--- Mood for {} ---",
        detail.date.format(constants::DATE_FORMAT_ISO)
    );
    let _ = writeln!(panel, "{}", assets::describe(image.as_ref()));
    let _ = writeln!(panel, "{}", detail.message);
    panel
}

/// The month grid. Recorded days carry the mood's catalog number (`?` for
/// tags the catalog does not know) and, with `color`, the mood's background
/// color.
pub fn render_month(view: &MonthView, catalog: &MoodCatalog, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^28}", view.cursor.title());
    for name in WEEKDAYS {
        let _ = write!(out, "{:>4}", name);
    }
    out.push('\n');

    for week in &view.weeks {
        for cell in week {
            match cell {
                DayCell::Blank => out.push_str("    "),
                DayCell::Day { date, mood } => {
                    let marker = match mood {
                        Some(tag) => mood_marker(catalog, tag),
                        None => ' ',
                    };
                    let text = format!("{:>3}{}", date.day(), marker);
                    match mood {
                        Some(tag) if color => {
                            out.push_str(&paint(&text, catalog.color_for(tag)));
                        }
                        _ => out.push_str(&text),
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

fn mood_marker(catalog: &MoodCatalog, tag: &MoodTag) -> char {
    catalog
        .number(tag)
        .and_then(|number| char::from_digit(number as u32, 36))
        .unwrap_or('?')
}

/// The mood legend: swatch (or number) and label for every catalog mood.
pub fn render_legend(catalog: &MoodCatalog, color: bool) -> String {
    let mut out = String::from("Mood Legend:\n");
    for entry in catalog.entries() {
        let swatch = if color {
            paint("  ", entry.color)
        } else {
            format!("({})", mood_marker(catalog, &entry.tag))
        };
        let _ = writeln!(out, "  {} {}", swatch, entry.label());
    }
    out
}

/// The widget's clock and quote line.
pub fn render_status(now: NaiveDateTime, quote: &str) -> String {
    format!("{}  {}", now.format(constants::CLOCK_FORMAT), quote)
}

/// Startup banner with the sprite handle or its placeholder.
pub fn render_banner(assets: &AssetResolver, prompt_at: impl fmt::Display) -> String {
    let sprite = assets.sprite();
    format!(
        "{}\n{} is here! Daily check-in at {}. Type 'help' for commands.\n",
        assets::describe(sprite.as_ref()),
        constants::PET_NAME,
        prompt_at
    )
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  log       log how you feel right now",
        "  calendar  show this month's moods",
        "  export    write all moods to a CSV file",
        "  moods     show the mood legend",
        "  quit      say goodbye",
    ]
    .join("\n")
        + "\n"
}

/// Severity of a passive notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A passive notification, the terminal stand-in for a message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(title: &'static str, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title,
            message: message.into(),
        }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

const EXPORT_TITLE: &str = "Export Mood Data";

/// Turns an export result into the notification the user sees.
pub fn export_notice(result: &AppResult<ExportOutcome>) -> Notice {
    match result {
        Ok(ExportOutcome::NothingToExport) => Notice::info(EXPORT_TITLE, "No mood data to export."),
        Ok(ExportOutcome::Written { path, .. }) => Notice::info(
            EXPORT_TITLE,
            format!("Mood data exported successfully to {}", path.display()),
        ),
        Err(e) => Notice::error(EXPORT_TITLE, format!("Failed to export mood data: {}", e)),
    }
}

/// Prints a notification: info to stdout, errors to stderr.
pub fn notify(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice),
        NoticeLevel::Error => eprintln!("{}", notice),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn paint(text: &str, background: &str) -> String {
    match parse_hex(background) {
        Some((r, g, b)) => format!(
            "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}{}",
            r, g, b, RECORDED_FG.0, RECORDED_FG.1, RECORDED_FG.2, text, ANSI_RESET
        ),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthCursor;
    use crate::store::MoodLog;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_answers() {
        let catalog = MoodCatalog::builtin();
        assert_eq!(
            parse_prompt_answer("1", &catalog, PromptKind::Daily),
            Some(PromptAnswer::Mood(MoodTag::from("happy")))
        );
        assert_eq!(
            parse_prompt_answer(" Sad ", &catalog, PromptKind::Daily),
            Some(PromptAnswer::Mood(MoodTag::from("sad")))
        );
        assert_eq!(
            parse_prompt_answer("s", &catalog, PromptKind::Snoozed),
            Some(PromptAnswer::Snooze)
        );
        assert_eq!(
            parse_prompt_answer("dismiss", &catalog, PromptKind::Manual),
            Some(PromptAnswer::Dismiss)
        );
        assert_eq!(parse_prompt_answer("0", &catalog, PromptKind::Daily), None);
        assert_eq!(parse_prompt_answer("7", &catalog, PromptKind::Daily), None);
        assert_eq!(parse_prompt_answer("hungry", &catalog, PromptKind::Daily), None);
    }

    #[test]
    fn test_manual_prompt_has_no_snooze() {
        let catalog = MoodCatalog::builtin();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(parse_prompt_answer("s", &catalog, PromptKind::Manual), None);
        assert!(!render_prompt(today, &catalog, PromptKind::Manual).contains("Snooze"));
        assert!(render_prompt(today, &catalog, PromptKind::Daily).contains("[s] Snooze 30 min"));
    }

    #[test]
    fn test_reaction_falls_back_for_unknown_tag_and_missing_image() {
        let temp_dir = tempdir().unwrap();
        let saved = SavedMood {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            tag: MoodTag::from("bewildered"),
            replaced: None,
        };
        let panel = render_reaction(
            &saved,
            &MoodCatalog::builtin(),
            &AssetResolver::new(temp_dir.path()),
        );
        assert!(panel.contains("(No image found)"));
        assert!(panel.contains("No mood info"));
    }

    #[test]
    fn test_month_without_color_marks_numbers() {
        let date = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let log: MoodLog = [
            (date(10), MoodTag::from("happy")),
            (date(11), MoodTag::from("anxious")),
            (date(12), MoodTag::from("angry")),
            (date(13), MoodTag::from("bewildered")),
        ]
        .into_iter()
        .collect();
        let view = MonthView::build(MonthCursor::new(2024, 1).unwrap(), &log);

        let text = render_month(&view, &MoodCatalog::builtin(), false);
        assert!(text.contains("January 2024"));
        assert!(text.contains(" 101"));
        assert!(text.contains(" 114"));
        assert!(text.contains(" 125"));
        assert!(text.contains(" 13?"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_legend_without_color_lists_distinct_numbers() {
        let legend = render_legend(&MoodCatalog::builtin(), false);
        assert!(legend.contains("(4) Anxious"));
        assert!(legend.contains("(5) Angry"));
    }

    #[test]
    fn test_month_with_color_paints_recorded_days() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let log: MoodLog = [(day, MoodTag::from("sad"))].into_iter().collect();
        let view = MonthView::build(MonthCursor::new(2024, 1).unwrap(), &log);

        let text = render_month(&view, &MoodCatalog::builtin(), true);
        assert!(text.contains("\x1b[48;2;135;206;250m"));
    }

    #[test]
    fn test_export_notices() {
        let nothing = export_notice(&Ok(ExportOutcome::NothingToExport));
        assert_eq!(nothing.to_string(), "[Export Mood Data] No mood data to export.");

        let written = export_notice(&Ok(ExportOutcome::Written {
            path: PathBuf::from("/tmp/moodpet_mood_export_2024-06-01.csv"),
            rows: 3,
        }));
        assert_eq!(written.level, NoticeLevel::Info);
        assert!(written.message.contains("moodpet_mood_export_2024-06-01.csv"));

        let failed = export_notice(&Err(crate::errors::AppError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ))));
        assert_eq!(failed.level, NoticeLevel::Error);
        assert!(failed.message.contains("disk full"));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ffb6c1"), Some((255, 182, 193)));
        assert_eq!(parse_hex("ffb6c1"), None);
        assert_eq!(parse_hex("#fff"), None);
    }
}
