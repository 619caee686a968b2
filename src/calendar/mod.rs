//! Month-by-month review of the mood log.
//!
//! Pure logic only: the month cursor, the Monday-first week grid and the
//! per-day lookups. Rendering lives in `ui`.

use crate::mood::{MoodCatalog, MoodTag};
use crate::store::MoodLog;
use chrono::{Datelike, Month, NaiveDate};

/// The month currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Returns `None` unless `month` is in `1..=12` and the month has a
    /// representable first day.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| MonthCursor { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month before, wrapping January to December of the previous year.
    /// Stays put at the earliest representable month.
    pub fn prev(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1), 12)
        } else {
            (Some(self.year), self.month - 1)
        };
        year.and_then(|year| MonthCursor::new(year, month)).unwrap_or(*self)
    }

    /// The month after, wrapping December to January of the next year.
    /// Stays put at the latest representable month.
    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1), 1)
        } else {
            (Some(self.year), self.month + 1)
        };
        year.and_then(|year| MonthCursor::new(year, month)).unwrap_or(*self)
    }

    /// e.g. "March 2024".
    pub fn title(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        format!("{} {}", name, self.year)
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn days_in_month(&self) -> u32 {
        (28..=31).rev().find(|&day| self.date(day).is_some()).unwrap_or(0)
    }
}

/// Monday-first weeks of `cursor`'s month; days outside the month are `None`.
pub fn month_weeks(cursor: MonthCursor) -> Vec<[Option<u32>; 7]> {
    let Some(first) = cursor.date(1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_monday() as usize;
    let days = cursor.days_in_month();

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = offset;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the 1st or after the last day.
    Blank,
    /// A day of the month and whatever mood was recorded for it.
    Day {
        date: NaiveDate,
        mood: Option<MoodTag>,
    },
}

/// A month with the log's moods laid onto its grid.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub cursor: MonthCursor,
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthView {
    pub fn build(cursor: MonthCursor, log: &MoodLog) -> Self {
        let weeks = month_weeks(cursor)
            .into_iter()
            .map(|week| {
                week.map(|day| match day.and_then(|d| cursor.date(d)) {
                    Some(date) => DayCell::Day {
                        date,
                        mood: log.get(date).cloned(),
                    },
                    None => DayCell::Blank,
                })
            })
            .collect();
        MonthView { cursor, weeks }
    }

    /// Number of days in the view with a recorded mood.
    pub fn recorded_days(&self) -> usize {
        self.weeks
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, DayCell::Day { mood: Some(_), .. }))
            .count()
    }
}

/// What selecting a recorded day shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodDetail {
    pub date: NaiveDate,
    pub tag: MoodTag,
    pub color: &'static str,
    pub message: &'static str,
}

/// Detail for `date`, or `None` when nothing was recorded that day.
///
/// Tags the catalog does not know come back with the "No mood info" message.
///
/// # Examples
///
/// ```
/// use moodpet::calendar::select_day;
/// use moodpet::mood::{MoodCatalog, MoodTag};
/// use moodpet::store::MoodLog;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// let log: MoodLog = [(day, MoodTag::from("grumpy"))].into_iter().collect();
///
/// let detail = select_day(&log, &MoodCatalog::builtin(), day).unwrap();
/// assert_eq!(detail.message, "No mood info");
/// ```
pub fn select_day(log: &MoodLog, catalog: &MoodCatalog, date: NaiveDate) -> Option<MoodDetail> {
    let tag = log.get(date)?;
    Some(MoodDetail {
        date,
        tag: tag.clone(),
        color: catalog.color_for(tag),
        message: catalog.message_for(tag),
    })
}
