//! Persistence of the per-day mood log.
//!
//! The log is a JSON object mapping ISO dates to mood tags, pretty-printed
//! with four-space indentation. Every read goes back to the file; every save
//! is a read-modify-write of the whole object.
//!
//! Saves are serialized across processes with an advisory lock on a sidecar
//! `<file>.lock`, and the new content replaces the old file atomically via a
//! temp file in the same directory. Readers never take the lock.

use crate::constants;
use crate::errors::{AppError, AppResult, LockError, StoreError};
use crate::mood::MoodTag;
use chrono::{Local, NaiveDate};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Date to mood mapping, ordered by date. At most one mood per date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodLog(BTreeMap<NaiveDate, MoodTag>);

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MoodTag> {
        self.0.get(&date)
    }

    /// Records `tag` for `date`, returning the mood it replaced.
    pub fn insert(&mut self, date: NaiveDate, tag: MoodTag) -> Option<MoodTag> {
        self.0.insert(date, tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, MoodTag> {
        self.0.iter()
    }
}

impl FromIterator<(NaiveDate, MoodTag)> for MoodLog {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, MoodTag)>>(iter: I) -> Self {
        MoodLog(iter.into_iter().collect())
    }
}

/// Result of a successful save, handed to the presentation layer for the reaction panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMood {
    pub date: NaiveDate,
    pub tag: MoodTag,
    /// The mood previously recorded for the same date, if any.
    pub replaced: Option<MoodTag>,
}

/// File-backed mood store.
#[derive(Debug, Clone)]
pub struct MoodStore {
    path: PathBuf,
}

impl MoodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MoodStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(constants::LOCK_FILE_SUFFIX);
        PathBuf::from(name)
    }

    /// Loads the whole log from disk.
    ///
    /// # Errors
    ///
    /// - `StoreError::Malformed` if the file exists but is not a JSON object of dates to strings
    /// - `AppError::Io` if the file exists but cannot be read
    pub fn load(&self) -> AppResult<MoodLog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No mood file at {:?}, starting empty", self.path);
                return Ok(MoodLog::new());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let log: MoodLog =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} mood entries", log.len());
        Ok(log)
    }

    /// Records `tag` for today's local date.
    pub fn save(&self, tag: MoodTag) -> AppResult<SavedMood> {
        self.save_for_date(Local::now().date_naive(), tag)
    }

    /// Records `tag` for `date`, replacing any mood already logged that day.
    pub fn save_for_date(&self, date: NaiveDate, tag: MoodTag) -> AppResult<SavedMood> {
        self.ensure_parent_dir()?;
        let _guard = StoreLock::acquire(&self.lock_path())?;

        let mut log = self.load()?;
        let replaced = log.insert(date, tag.clone());
        self.write(&log)?;

        info!("Saved mood '{}' for {}", tag, date);
        Ok(SavedMood {
            date,
            tag,
            replaced,
        })
    }

    fn ensure_parent_dir(&self) -> AppResult<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return Ok(());
        }

        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(dir, permissions)?;
            debug!("Set 0o700 permissions on data directory");
        }
        Ok(())
    }

    fn write(&self, log: &MoodLog) -> AppResult<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(constants::MOOD_FILE_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        log.serialize(&mut serializer)
            .map_err(StoreError::Serialize)?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&buf)?;
        temp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(constants::DEFAULT_FILE_PERMISSIONS);
            temp.as_file().set_permissions(permissions)?;
        }

        temp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}

/// Exclusive advisory lock on the sidecar lock file, released on drop.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn acquire(path: &Path) -> Result<Self, LockError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        for attempt in 1..=constants::LOCK_RETRY_ATTEMPTS {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(StoreLock { file }),
                Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                    debug!("Mood file lock busy (attempt {})", attempt);
                    thread::sleep(Duration::from_millis(constants::LOCK_RETRY_DELAY_MS));
                }
                Err(source) => {
                    return Err(LockError::AcquisitionFailed {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }

        Err(LockError::FileBusy {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = MoodStore::new(temp_dir.path().join("mood_log.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("mood_log.json");
        fs::write(&path, "not json at all").unwrap();

        let store = MoodStore::new(&path);
        match store.load() {
            Err(AppError::Store(StoreError::Malformed { path: p, .. })) => assert_eq!(p, path),
            other => panic!("Expected Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_date_keys() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("mood_log.json");
        fs::write(&path, r#"{"yesterday": "sad"}"#).unwrap();

        assert!(matches!(
            MoodStore::new(&path).load(),
            Err(AppError::Store(StoreError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_same_day_overwrite_keeps_last() {
        let temp_dir = tempdir().unwrap();
        let store = MoodStore::new(temp_dir.path().join("mood_log.json"));
        let day = date(2024, 3, 5);

        let first = store.save_for_date(day, MoodTag::from("happy")).unwrap();
        assert!(first.replaced.is_none());
        let second = store.save_for_date(day, MoodTag::from("sad")).unwrap();
        assert_eq!(second.replaced, Some(MoodTag::from("happy")));

        let log = store.load().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.get(day), Some(&MoodTag::from("sad")));
    }

    #[test]
    fn test_save_keeps_prior_entries() {
        let temp_dir = tempdir().unwrap();
        let store = MoodStore::new(temp_dir.path().join("mood_log.json"));

        store.save_for_date(date(2024, 1, 10), MoodTag::from("happy")).unwrap();
        store.save_for_date(date(2024, 1, 11), MoodTag::from("meh")).unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(date(2024, 1, 10)), Some(&MoodTag::from("happy")));
        assert_eq!(log.get(date(2024, 1, 11)), Some(&MoodTag::from("meh")));
    }

    #[test]
    fn test_file_is_pretty_printed_with_four_spaces() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("mood_log.json");
        let store = MoodStore::new(&path);
        store.save_for_date(date(2024, 1, 10), MoodTag::from("happy")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n    \"2024-01-10\": \"happy\"\n}");
    }

    #[test]
    fn test_save_creates_missing_data_dir() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("mood_log.json");
        let store = MoodStore::new(&path);

        store.save(MoodTag::from("tired")).unwrap();
        assert!(path.exists());

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_unknown_tags_are_stored_as_is() {
        let temp_dir = tempdir().unwrap();
        let store = MoodStore::new(temp_dir.path().join("mood_log.json"));
        store.save_for_date(date(2024, 2, 1), MoodTag::from("confused")).unwrap();

        let log = store.load().unwrap();
        assert_eq!(log.get(date(2024, 2, 1)), Some(&MoodTag::from("confused")));
    }
}
