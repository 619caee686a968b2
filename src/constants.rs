//! Constants used throughout the application.
//!
//! This module contains all constants used in the moodpet application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodpet";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A terminal companion that asks how you feel once a day";
/// Name the companion uses when it talks to you.
pub const PET_NAME: &str = "Teto";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level; logs share the terminal with the widget.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for the moodpet data directory.
pub const ENV_VAR_MOODPET_DIR: &str = "MOODPET_DIR";
/// Environment variable for the directory holding sprite and mood images.
pub const ENV_VAR_MOODPET_ASSETS_DIR: &str = "MOODPET_ASSETS_DIR";
/// Environment variable for the directory exports are written to.
pub const ENV_VAR_MOODPET_EXPORT_DIR: &str = "MOODPET_EXPORT_DIR";
/// Environment variable for the daily prompt time (`HH:MM`).
pub const ENV_VAR_MOODPET_PROMPT_AT: &str = "MOODPET_PROMPT_AT";
/// Standard environment variable that disables colored output when set.
pub const ENV_VAR_NO_COLOR: &str = "NO_COLOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default data directory, expanded with `shellexpand`.
pub const DEFAULT_DATA_DIR: &str = "~/.moodpet";
/// Default sub-directory of the data directory holding assets.
pub const DEFAULT_ASSETS_SUBDIR: &str = "assets";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// File name of the persisted mood log inside the data directory.
pub const MOOD_FILE_NAME: &str = "mood_log.json";
/// Suffix appended to the mood file name for the advisory lock file.
pub const LOCK_FILE_SUFFIX: &str = ".lock";
/// Indentation used when pretty-printing the mood file.
pub const MOOD_FILE_INDENT: &[u8] = b"    ";
/// Prefix of the export file name; the export date and extension follow.
pub const EXPORT_FILE_PREFIX: &str = "moodpet_mood_export_";
/// Extension of the export file.
pub const EXPORT_FILE_EXTENSION: &str = "csv";
/// Header row of the export file.
pub const EXPORT_HEADER: [&str; 2] = ["Date", "Mood"];
/// Image extensions tried, in order, when resolving a mood image.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "gif", "jpg", "jpeg"];
/// File name of the idle sprite animation.
pub const SPRITE_FILE_NAME: &str = "sprite.gif";
/// Text shown in place of a missing image.
pub const IMAGE_PLACEHOLDER: &str = "(No image found)";
/// Attempts made to take the mood file lock before giving up.
pub const LOCK_RETRY_ATTEMPTS: u32 = 20;
/// Pause between lock attempts, in milliseconds.
pub const LOCK_RETRY_DELAY_MS: u64 = 50;
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Format of the daily prompt time.
pub const PROMPT_TIME_FORMAT: &str = "%H:%M";
/// Clock format shown by the widget.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";
/// Default hour of the daily prompt.
pub const DEFAULT_PROMPT_HOUR: u32 = 15;
/// Default minute of the daily prompt.
pub const DEFAULT_PROMPT_MINUTE: u32 = 0;
/// How often the scheduler compares the wall clock with the prompt time.
pub const POLL_INTERVAL_SECS: u64 = 30;
/// Delay before a snoozed prompt fires again.
pub const SNOOZE_MINUTES: u64 = 30;
/// How often the widget refreshes its clock and quote line.
pub const QUOTE_INTERVAL_SECS: u64 = 60;
/// Capacity of the channels between the scheduler and the widget loop.
pub const CHANNEL_CAPACITY: usize = 16;

// Mood Catalog
/// Message shown for a recorded tag that the catalog does not know.
pub const UNKNOWN_MOOD_MESSAGE: &str = "No mood info";
/// Color used for days without a recorded mood.
pub const NEUTRAL_COLOR: &str = "#ffffff";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodpet";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
