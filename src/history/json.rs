//! JSON history file
//!
//! The whole log is rewritten on every save as an indented array.

use super::ConversionRecord;
use crate::error::HistoryError;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub(super) struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file loads as an empty log
    pub(super) fn load(&self) -> Result<Vec<ConversionRecord>, HistoryError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("[JsonHistoryFile] {:?} does not exist", self.path);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<ConversionRecord> =
            serde_json::from_str(&json).map_err(|source| HistoryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "[JsonHistoryFile] Loaded {} records from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }

    pub(super) fn save(&self, records: &[ConversionRecord]) -> Result<(), HistoryError> {
        // serde_json writes NaN and infinities as null, which never loads back
        if let Some(bad) = records
            .iter()
            .find(|r| !r.input_value.is_finite() || !r.output_value.is_finite())
        {
            return Err(HistoryError::NonFinite {
                timestamp: bad.timestamp.clone(),
            });
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|source| HistoryError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "[JsonHistoryFile] Saved {} records to {:?}",
            records.len(),
            self.path
        );
        Ok(())
    }

    pub(super) fn remove(&self) -> Result<(), HistoryError> {
        remove_if_exists(&self.path)
    }
}

pub(super) fn remove_if_exists(path: &Path) -> Result<(), HistoryError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed history file {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(HistoryError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}
