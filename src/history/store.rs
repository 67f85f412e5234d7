//! History Store
//!
//! Bounded, lazily loaded conversion log backed by a JSON file, with a
//! plain-text log taking over when the JSON file cannot be read or written.
//! Once the text log exists the store stays degraded until cleared.

use super::json::JsonHistoryFile;
use super::text::TextHistoryLog;
use super::{
    AppendOutcome, ConversionRecord, HistorySnapshot, StorageFormat, HISTORY_CAPACITY,
    JSON_FILE_NAME, TEXT_FILE_NAME,
};
use crate::error::HistoryError;
use std::path::{Path, PathBuf};

pub struct HistoryStore {
    json: JsonHistoryFile,
    text: TextHistoryLog,
    log: Option<HistorySnapshot>,
    /// Why loading fell back to the text log, reported by the next append
    load_error: Option<HistoryError>,
}

impl HistoryStore {
    /// Store whose files live in `dir`. Nothing is read until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            json: JsonHistoryFile::new(dir.join(JSON_FILE_NAME)),
            text: TextHistoryLog::new(dir.join(TEXT_FILE_NAME)),
            log: None,
            load_error: None,
        }
    }

    pub fn json_path(&self) -> &Path {
        self.json.path()
    }

    pub fn text_path(&self) -> &Path {
        self.text.path()
    }

    /// Add a record, evict the oldest past capacity, then persist.
    ///
    /// Persistence failures never propagate; they are logged and reported
    /// through the returned outcome.
    pub fn append(&mut self, record: ConversionRecord) -> AppendOutcome {
        let log = self.loaded();
        log.records.push(record.clone());
        let evicted = trim_to_capacity(&mut log.records);
        let format = log.format;

        let structured = match format {
            StorageFormat::Structured => match self.save_structured() {
                Ok(()) => return AppendOutcome::Stored,
                Err(e) => {
                    tracing::warn!("Structured history unavailable, using text log: {}", e);
                    self.loaded().format = StorageFormat::Degraded;
                    Some(e)
                }
            },
            StorageFormat::Degraded => self.load_error.take(),
        };

        // Keep the text log at capacity too
        let written = match &self.log {
            Some(log) if evicted => self.text.rewrite(&log.records),
            _ => self.text.append(&record),
        };

        match written {
            Ok(()) => AppendOutcome::Degraded { cause: structured },
            Err(e) => {
                tracing::error!("Conversion not saved to history: {}", e);
                AppendOutcome::Skipped {
                    structured,
                    fallback: e,
                }
            }
        }
    }

    /// Up to `limit` newest records, oldest first
    pub fn list(&mut self, limit: usize) -> Vec<ConversionRecord> {
        let records = &self.loaded().records;
        let start = records.len().saturating_sub(limit);
        records[start..].to_vec()
    }

    pub fn len(&mut self) -> usize {
        self.loaded().records.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn format(&mut self) -> StorageFormat {
        self.loaded().format
    }

    pub fn snapshot(&mut self) -> HistorySnapshot {
        self.loaded().clone()
    }

    /// Delete both history files and empty the log. Safe to repeat.
    ///
    /// The in-memory log is emptied even when a file cannot be removed; the
    /// first removal error is returned after both have been attempted.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.log = Some(HistorySnapshot {
            format: StorageFormat::Structured,
            records: Vec::new(),
        });
        self.load_error = None;

        let json = self.json.remove();
        let text = self.text.remove();
        json.and(text)?;

        tracing::info!(
            "Cleared conversion history ({:?}, {:?})",
            self.json.path(),
            self.text.path()
        );
        Ok(())
    }

    fn loaded(&mut self) -> &mut HistorySnapshot {
        let snapshot = match self.log.take() {
            Some(snapshot) => snapshot,
            None => self.read_storage(),
        };
        self.log.insert(snapshot)
    }

    fn save_structured(&self) -> Result<(), HistoryError> {
        let records = self
            .log
            .as_ref()
            .map(|log| log.records.as_slice())
            .unwrap_or_default();
        self.json.save(records)
    }

    fn read_storage(&mut self) -> HistorySnapshot {
        if self.text.exists() {
            let mut records = self.text.load().unwrap_or_else(|e| {
                tracing::warn!("Could not read text history log: {}", e);
                Vec::new()
            });
            trim_to_capacity(&mut records);
            return HistorySnapshot {
                format: StorageFormat::Degraded,
                records,
            };
        }

        match self.json.load() {
            Ok(mut records) => {
                trim_to_capacity(&mut records);
                HistorySnapshot {
                    format: StorageFormat::Structured,
                    records,
                }
            }
            Err(e) => {
                tracing::warn!("History file unreadable, continuing with text log: {}", e);
                self.load_error = Some(e);
                HistorySnapshot {
                    format: StorageFormat::Degraded,
                    records: Vec::new(),
                }
            }
        }
    }
}

/// Drop the oldest records past capacity, returning whether any went
fn trim_to_capacity(records: &mut Vec<ConversionRecord>) -> bool {
    if records.len() <= HISTORY_CAPACITY {
        return false;
    }
    let excess = records.len() - HISTORY_CAPACITY;
    records.drain(..excess);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Category;
    use std::fs;
    use tempfile::TempDir;

    fn record(n: usize) -> ConversionRecord {
        ConversionRecord::new(
            format!("2024-01-01 00:{:02}:{:02}", n / 60, n % 60),
            Category::Length,
            "m",
            "cm",
            n as f64,
            n as f64 * 100.0,
        )
    }

    #[test]
    fn test_append_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());

        assert!(matches!(store.append(record(1)), AppendOutcome::Stored));
        assert!(matches!(store.append(record(2)), AppendOutcome::Stored));

        let listed = store.list(10);
        assert_eq!(listed, vec![record(1), record(2)]);
        assert_eq!(store.format(), StorageFormat::Structured);
        assert!(store.json_path().exists());
        assert!(!store.text_path().exists());
    }

    #[test]
    fn test_list_returns_newest_window_oldest_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        for n in 0..5 {
            store.append(record(n));
        }

        assert_eq!(store.list(2), vec![record(3), record(4)]);
        assert!(store.list(0).is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        for n in 0..=HISTORY_CAPACITY {
            store.append(record(n));
        }

        let listed = store.list(200);
        assert_eq!(listed.len(), HISTORY_CAPACITY);
        assert_eq!(listed.first(), Some(&record(1)));
        assert_eq!(listed.last(), Some(&record(HISTORY_CAPACITY)));

        let reopened = HistoryStore::new(temp_dir.path()).list(200);
        assert_eq!(reopened, listed);
    }

    #[test]
    fn test_lazy_load_from_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = HistoryStore::new(temp_dir.path());
            store.append(record(7));
        }

        let mut store = HistoryStore::new(temp_dir.path());
        assert_eq!(store.len(), 1);
        assert_eq!(store.list(5), vec![record(7)]);
    }

    #[test]
    fn test_corrupt_json_falls_back_to_text_log() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        fs::write(store.json_path(), "{ not json").unwrap();

        match store.append(record(1)) {
            AppendOutcome::Degraded { cause: Some(err) } => assert!(err.is_read_failure()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(store.format(), StorageFormat::Degraded);
        assert_eq!(store.list(10), vec![record(1)]);

        let text = fs::read_to_string(store.text_path()).unwrap();
        assert_eq!(text, "2024-01-01 00:00:01 | Length | 1 m = 100 cm\n");

        // Later appends report the store as already degraded
        assert!(matches!(
            store.append(record(2)),
            AppendOutcome::Degraded { cause: None }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_degrades_with_cause() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        // Dangling link: reads see no file, writes fail
        std::os::unix::fs::symlink(
            temp_dir.path().join("missing").join("target.json"),
            store.json_path(),
        )
        .unwrap();

        match store.append(record(1)) {
            AppendOutcome::Degraded { cause: Some(err) } => assert!(!err.is_read_failure()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(store.text_path().exists());
        assert_eq!(store.format(), StorageFormat::Degraded);
    }

    #[test]
    fn test_both_failures_keep_record_in_memory() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path().join("does-not-exist"));

        let outcome = store.append(record(1));
        assert!(!outcome.is_persisted());
        assert!(matches!(
            outcome,
            AppendOutcome::Skipped {
                structured: Some(_),
                ..
            }
        ));
        assert_eq!(store.list(10), vec![record(1)]);
    }

    #[test]
    fn test_text_log_is_never_upgraded() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(TEXT_FILE_NAME),
            "2024-01-01 00:00:00 | Time | 1 hr = 60 min\n",
        )
        .unwrap();

        let mut store = HistoryStore::new(temp_dir.path());
        assert_eq!(store.format(), StorageFormat::Degraded);
        assert!(matches!(
            store.append(record(2)),
            AppendOutcome::Degraded { cause: None }
        ));
        assert!(!store.json_path().exists());

        let reopened = HistoryStore::new(temp_dir.path()).list(10);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened[0].category, Category::Time);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        store.clear().unwrap();

        store.append(record(1));
        fs::write(store.text_path(), "stale\n").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        assert!(store.list(10).is_empty());
        assert!(!store.json_path().exists());
        assert!(!store.text_path().exists());
        assert_eq!(store.format(), StorageFormat::Structured);
    }

    #[test]
    fn test_failed_clear_still_empties_log() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        for n in 0..3 {
            store.append(record(n));
        }
        // A non-empty directory where the text log belongs cannot be removed
        fs::create_dir(store.text_path()).unwrap();
        fs::write(store.text_path().join("keep"), "x").unwrap();

        let err = store.clear().unwrap_err();
        assert!(matches!(err, HistoryError::Remove { .. }));
        assert_eq!(store.len(), 0);
        assert!(store.list(10).is_empty());
        assert!(!store.json_path().exists());

        // The next save does not resurrect the cleared records
        assert!(matches!(store.append(record(9)), AppendOutcome::Stored));
        let on_disk: Vec<ConversionRecord> =
            serde_json::from_str(&fs::read_to_string(store.json_path()).unwrap()).unwrap();
        assert_eq!(on_disk, vec![record(9)]);
    }

    #[test]
    fn test_degraded_log_is_capped_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        fs::write(store.text_path(), "").unwrap();

        for n in 0..HISTORY_CAPACITY + 5 {
            assert!(store.append(record(n)).is_persisted());
        }
        assert_eq!(store.format(), StorageFormat::Degraded);

        let text = fs::read_to_string(store.text_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), HISTORY_CAPACITY);
        assert_eq!(lines[0], "2024-01-01 00:00:05 | Length | 5 m = 500 cm");

        let reopened = HistoryStore::new(temp_dir.path()).list(200);
        assert_eq!(reopened.len(), HISTORY_CAPACITY);
        assert_eq!(reopened.first(), Some(&record(5)));
        assert_eq!(reopened.last(), Some(&record(HISTORY_CAPACITY + 4)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_fallback_leaves_no_empty_text_log() {
        let full = std::path::Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let mut store = HistoryStore::new(temp_dir.path());
        assert!(store.is_empty());

        std::os::unix::fs::symlink(
            temp_dir.path().join("missing").join("target.json"),
            store.json_path(),
        )
        .unwrap();
        std::os::unix::fs::symlink(full, store.text_path()).unwrap();

        let outcome = store.append(record(1));
        assert!(matches!(outcome, AppendOutcome::Skipped { .. }));
        assert!(fs::symlink_metadata(store.text_path()).is_err());
        assert_eq!(store.list(10), vec![record(1)]);
    }
}
