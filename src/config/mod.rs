//! Configuration management for the moodpet application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It covers where moods are stored, where assets
//! and exports live, and when the daily prompt fires.
//!
//! # Environment Variables
//!
//! - `MOODPET_DIR`: Path to the data directory (defaults to ~/.moodpet)
//! - `MOODPET_ASSETS_DIR`: Directory with the sprite and mood images (defaults to `<data dir>/assets`)
//! - `MOODPET_EXPORT_DIR`: Directory exports are written to (defaults to the current directory)
//! - `MOODPET_PROMPT_AT`: Daily prompt time as `HH:MM` (defaults to 15:00)
//! - `NO_COLOR`: Disables colored calendar cells when set
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use crate::scheduler::PromptTime;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the moodpet application.
///
/// # Examples
///
/// Creating a configuration rooted at a directory:
/// ```
/// use moodpet::Config;
/// use std::path::PathBuf;
///
/// let config = Config::with_data_dir(PathBuf::from("/path/to/data"));
/// assert_eq!(config.assets_dir, PathBuf::from("/path/to/data/assets"));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the persisted mood file.
    pub data_dir: PathBuf,

    /// Directory searched for `<mood>.<ext>` images and the idle sprite.
    pub assets_dir: PathBuf,

    /// Directory export files are written to.
    pub export_dir: PathBuf,

    /// Wall-clock time of the daily prompt.
    pub prompt_at: PromptTime,

    /// How often the scheduler compares the clock with `prompt_at`.
    pub poll_interval: Duration,

    /// Delay before a snoozed prompt fires again.
    pub snooze_delay: Duration,

    /// How often the widget refreshes its clock and quote line.
    pub quote_interval: Duration,

    /// Whether calendar cells are painted with ANSI colors.
    pub color: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &constants::REDACTED_PLACEHOLDER)
            .field("assets_dir", &constants::REDACTED_PLACEHOLDER)
            .field("export_dir", &constants::REDACTED_PLACEHOLDER)
            .field("prompt_at", &self.prompt_at)
            .field("poll_interval", &self.poll_interval)
            .field("snooze_delay", &self.snooze_delay)
            .field("quote_interval", &self.quote_interval)
            .field("color", &self.color)
            .finish()
    }
}

impl Config {
    /// Builds a configuration with every default applied under `data_dir`.
    ///
    /// The export directory defaults to the data directory here; `load()`
    /// replaces it with the current working directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Config {
            assets_dir: data_dir.join(constants::DEFAULT_ASSETS_SUBDIR),
            export_dir: data_dir.clone(),
            data_dir,
            prompt_at: PromptTime::default(),
            poll_interval: Duration::from_secs(constants::POLL_INTERVAL_SECS),
            snooze_delay: Duration::from_secs(constants::SNOOZE_MINUTES * 60),
            quote_interval: Duration::from_secs(constants::QUOTE_INTERVAL_SECS),
            color: true,
        }
    }

    /// Path of the persisted mood file.
    pub fn mood_file(&self) -> PathBuf {
        self.data_dir.join(constants::MOOD_FILE_NAME)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Directory values are expanded with `shellexpand`, so `~` and `$VARS`
    /// are honored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path expansion fails
    /// - `MOODPET_PROMPT_AT` is not a valid `HH:MM` time
    /// - The current directory cannot be determined for the export default
    pub fn load() -> AppResult<Self> {
        let data_dir_raw = env::var(constants::ENV_VAR_MOODPET_DIR)
            .unwrap_or_else(|_| constants::DEFAULT_DATA_DIR.to_string());
        let data_dir = expand_dir(&data_dir_raw)?;

        let mut config = Config::with_data_dir(data_dir);

        if let Ok(assets_raw) = env::var(constants::ENV_VAR_MOODPET_ASSETS_DIR) {
            config.assets_dir = expand_dir(&assets_raw)?;
        }

        config.export_dir = match env::var(constants::ENV_VAR_MOODPET_EXPORT_DIR) {
            Ok(export_raw) => expand_dir(&export_raw)?,
            Err(_) => env::current_dir().map_err(|e| {
                AppError::Config(format!("Failed to determine current directory: {}", e))
            })?,
        };

        if let Ok(prompt_raw) = env::var(constants::ENV_VAR_MOODPET_PROMPT_AT) {
            config.prompt_at = prompt_raw.parse().map_err(|e| {
                AppError::Config(format!(
                    "{} must be HH:MM, got '{}': {}",
                    constants::ENV_VAR_MOODPET_PROMPT_AT,
                    prompt_raw,
                    e
                ))
            })?;
        }

        config.color = env::var_os(constants::ENV_VAR_NO_COLOR).is_none();

        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Export directory must be an absolute path"
    /// - "Poll interval must be greater than zero"
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if !self.export_dir.is_absolute() {
            return Err(AppError::Config(
                "Export directory must be an absolute path".to_string(),
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(AppError::Config(
                "Poll interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn expand_dir(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    let path = Path::new(expanded.as_ref()).to_path_buf();
    if path.as_os_str().is_empty() {
        return Err(AppError::Config(format!("Path '{}' expands to nothing", raw)));
    }
    Ok(path)
}
