//! Plain-text history log, used once the JSON file cannot be trusted.
//!
//! Line format: `<timestamp> | <type> | <value> <from> = <result> <to>`

use super::ConversionRecord;
use crate::error::HistoryError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<ts>.+?) \| (?P<cat>.+?) \| (?P<value>\S+) (?P<from>\S+) = (?P<result>\S+) (?P<to>\S+)$")
        .expect("history line pattern is valid")
});

pub(super) struct TextHistoryLog {
    path: PathBuf,
}

impl TextHistoryLog {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn exists(&self) -> bool {
        self.path.exists()
    }

    pub(super) fn append(&self, record: &ConversionRecord) -> Result<(), HistoryError> {
        let write_err = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        if let Err(e) = writeln!(file, "{}", format_line(record)) {
            drop(file);
            self.discard_if_empty();
            return Err(write_err(e));
        }

        tracing::debug!("[TextHistoryLog] Appended record to {:?}", self.path);
        Ok(())
    }

    /// Replace the whole log with `records`
    pub(super) fn rewrite(&self, records: &[ConversionRecord]) -> Result<(), HistoryError> {
        let contents: String = records
            .iter()
            .map(|record| format_line(record) + "\n")
            .collect();

        if let Err(source) = fs::write(&self.path, contents) {
            self.discard_if_empty();
            return Err(HistoryError::Write {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(
            "[TextHistoryLog] Rewrote {} records to {:?}",
            records.len(),
            self.path
        );
        Ok(())
    }

    /// An empty log left behind by a failed write would pin the store in
    /// degraded mode with nothing in it
    fn discard_if_empty(&self) {
        let empty = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(false);
        if empty {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("[TextHistoryLog] Could not remove empty log {:?}: {}", self.path, e);
            }
        }
    }

    pub(super) fn load(&self) -> Result<Vec<ConversionRecord>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<ConversionRecord> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = parse_line(line);
                if parsed.is_none() {
                    tracing::warn!("[TextHistoryLog] Skipping unreadable line: {}", line);
                }
                parsed
            })
            .collect();

        tracing::debug!(
            "[TextHistoryLog] Loaded {} records from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }

    pub(super) fn remove(&self) -> Result<(), HistoryError> {
        super::json::remove_if_exists(&self.path)
    }
}

pub(super) fn format_line(record: &ConversionRecord) -> String {
    format!(
        "{} | {} | {} {} = {} {}",
        record.timestamp,
        record.category,
        record.input_value,
        record.from_symbol,
        record.output_value,
        record.to_symbol
    )
}

pub(super) fn parse_line(line: &str) -> Option<ConversionRecord> {
    let caps = LINE_PATTERN.captures(line.trim_end())?;
    Some(ConversionRecord::new(
        caps["ts"].trim(),
        caps["cat"].parse().ok()?,
        &caps["from"],
        &caps["to"],
        caps["value"].parse().ok()?,
        caps["result"].parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Category;
    use tempfile::TempDir;

    #[test]
    fn test_line_format() {
        let record =
            ConversionRecord::new("2024-03-01 10:00:00", Category::DataStorage, "B", "KB", 1024.0, 1.0);
        assert_eq!(
            format_line(&record),
            "2024-03-01 10:00:00 | Data Storage | 1024 B = 1 KB"
        );
    }

    #[test]
    fn test_parse_line_reads_back_fields() {
        let record = parse_line("2024-03-01 10:00:00 | Temperature | -40 C = -40 F\n").unwrap();
        assert_eq!(record.timestamp, "2024-03-01 10:00:00");
        assert_eq!(record.category, Category::Temperature);
        assert_eq!(record.from_symbol, "C");
        assert_eq!(record.to_symbol, "F");
        assert_eq!(record.input_value, -40.0);
        assert_eq!(record.output_value, -40.0);
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(parse_line("not a history line").is_none());
        assert!(parse_line("2024-03-01 | Volume | 1 l = 1000 ml").is_none());
    }

    #[test]
    fn test_append_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let log = TextHistoryLog::new(temp_dir.path().join("h.txt"));
        let first = ConversionRecord::new("2024-03-01 10:00:00", Category::Time, "hr", "min", 2.0, 120.0);
        let second = ConversionRecord::new("2024-03-01 10:00:05", Category::Currency, "USD", "EUR", 10.0, 9.2);

        log.append(&first).unwrap();
        log.append(&second).unwrap();
        fs::write(
            log.path(),
            format!("{}garbage\n", fs::read_to_string(log.path()).unwrap()),
        )
        .unwrap();

        let loaded = log.load().unwrap();
        assert_eq!(loaded, vec![first, second]);
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let log = TextHistoryLog::new(temp_dir.path().join("h.txt"));
        let old = ConversionRecord::new("2024-03-01 09:00:00", Category::Weight, "kg", "g", 1.0, 1000.0);
        let kept = ConversionRecord::new("2024-03-01 10:00:00", Category::Time, "hr", "min", 2.0, 120.0);
        log.append(&old).unwrap();

        log.rewrite(&[kept.clone()]).unwrap();
        assert_eq!(
            fs::read_to_string(log.path()).unwrap(),
            "2024-03-01 10:00:00 | Time | 2 hr = 120 min\n"
        );
        assert_eq!(log.load().unwrap(), vec![kept]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_append_leaves_no_empty_log() {
        let full = std::path::Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let log = TextHistoryLog::new(temp_dir.path().join("h.txt"));
        std::os::unix::fs::symlink(full, log.path()).unwrap();

        let record = ConversionRecord::new("2024-03-01 10:00:00", Category::Time, "hr", "min", 2.0, 120.0);
        let err = log.append(&record).unwrap_err();
        assert!(matches!(err, HistoryError::Write { .. }));
        assert!(fs::symlink_metadata(log.path()).is_err());
        assert!(!log.exists());
    }
}
