//! Mood tags and the catalog of colors and reactions.
//!
//! A `MoodTag` is whatever string was recorded for a day. The `MoodCatalog`
//! knows the tags the prompt offers; lookups for anything else fall back to
//! the "No mood info" message instead of failing.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded mood, e.g. `happy`.
///
/// Catalog membership is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodTag(String);

impl MoodTag {
    pub fn new(tag: impl Into<String>) -> Self {
        MoodTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoodTag {
    fn from(tag: &str) -> Self {
        MoodTag::new(tag)
    }
}

/// One catalog row: the tag, its `#rrggbb` display color and the companion's reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub tag: MoodTag,
    pub color: &'static str,
    pub message: &'static str,
}

impl MoodEntry {
    /// Tag with its first letter upper-cased, as shown on prompt buttons.
    pub fn label(&self) -> String {
        let mut chars = self.tag.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

const BUILTIN_MOODS: &[(&str, &str, &str)] = &[
    (
        "happy",
        "#ffb6c1",
        "YAY!! I'm so glad you're feeling good! Keep smiling, okay?",
    ),
    (
        "tired",
        "#d3d3d3",
        "You've worked hard, haven't you...? Please rest well today...",
    ),
    (
        "sad",
        "#87cefa",
        "Oh no... come here, I'll sing for you until you feel okay...",
    ),
    (
        "anxious",
        "#f4a460",
        "I'm right here! We'll get through today together, I promise.",
    ),
    (
        "angry",
        "#ff6347",
        "GRR! I'll drill-kick whoever made you mad!",
    ),
    (
        "meh",
        "#ffe4b5",
        "That's okay! Not every day is wild. Just... stay soft.",
    ),
];

/// Static table of mood tag to (color, message), fixed at startup.
///
/// # Examples
///
/// ```
/// use moodpet::mood::{MoodCatalog, MoodTag};
///
/// let catalog = MoodCatalog::builtin();
/// assert_eq!(catalog.entries().len(), 6);
/// assert_eq!(catalog.message_for(&MoodTag::from("confused")), "No mood info");
/// ```
#[derive(Debug, Clone)]
pub struct MoodCatalog {
    entries: Vec<MoodEntry>,
}

impl MoodCatalog {
    /// The six moods the companion knows about, in prompt order.
    pub fn builtin() -> Self {
        let entries = BUILTIN_MOODS
            .iter()
            .map(|&(tag, color, message)| MoodEntry {
                tag: MoodTag::new(tag),
                color,
                message,
            })
            .collect();
        MoodCatalog { entries }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn lookup(&self, tag: &MoodTag) -> Option<&MoodEntry> {
        self.entries.iter().find(|entry| &entry.tag == tag)
    }

    /// 1-based position of `tag`, the number typed at the prompt.
    pub fn number(&self, tag: &MoodTag) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| &entry.tag == tag)
            .map(|index| index + 1)
    }

    /// Case-insensitive lookup by name, used when parsing typed answers.
    pub fn find_by_name(&self, name: &str) -> Option<&MoodEntry> {
        self.entries
            .iter()
            .find(|entry| entry.tag.as_str().eq_ignore_ascii_case(name))
    }

    /// Reaction message for `tag`, or the "No mood info" fallback.
    pub fn message_for(&self, tag: &MoodTag) -> &'static str {
        self.lookup(tag)
            .map(|entry| entry.message)
            .unwrap_or(constants::UNKNOWN_MOOD_MESSAGE)
    }

    /// Display color for `tag`, neutral when the tag is unknown.
    pub fn color_for(&self, tag: &MoodTag) -> &'static str {
        self.lookup(tag)
            .map(|entry| entry.color)
            .unwrap_or(constants::NEUTRAL_COLOR)
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
