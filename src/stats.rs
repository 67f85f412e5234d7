//! Aggregate statistics over the conversion history

use crate::history::{ConversionRecord, HistorySnapshot, StorageFormat};
use crate::units::Category;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_count: usize,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    /// `None` when the history is only available as the plain-text log
    pub count_by_category: Option<BTreeMap<Category, usize>>,
}

/// Summarize a snapshot. Degraded snapshots omit per-category counts.
pub fn summarize(snapshot: &HistorySnapshot) -> Statistics {
    let mut stats = summarize_records(&snapshot.records);
    if snapshot.format == StorageFormat::Degraded {
        stats.count_by_category = None;
    }
    stats
}

pub fn summarize_records(records: &[ConversionRecord]) -> Statistics {
    let mut by_category = BTreeMap::new();
    for record in records {
        *by_category.entry(record.category).or_insert(0) += 1;
    }

    Statistics {
        total_count: records.len(),
        first_timestamp: records.first().map(|r| r.timestamp.clone()),
        last_timestamp: records.last().map(|r| r.timestamp.clone()),
        count_by_category: Some(by_category),
    }
}
