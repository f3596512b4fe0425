//! Aggregate statistics over the download history.

use std::collections::{BTreeMap, HashMap};

use crate::types::HistoryRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryStats {
    pub total: usize,
    /// `(platform, count)`, most downloaded first.
    pub by_platform: Vec<(String, usize)>,
    pub by_quality: Vec<(String, usize)>,
    pub by_format: Vec<(String, usize)>,
    /// `(YYYY-MM-DD, count)`, oldest day first.
    pub by_day: Vec<(String, usize)>,
}

impl HistoryStats {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let mut by_day: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            if let Some(day) = day_of(&record.timestamp) {
                *by_day.entry(day.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            total: records.len(),
            by_platform: ranked(records.iter().map(|r| r.platform.as_str())),
            by_quality: ranked(records.iter().map(|r| r.quality.as_str())),
            by_format: ranked(records.iter().map(|r| r.format.as_str())),
            by_day: by_day.into_iter().collect(),
        }
    }

    pub fn top_platform(&self) -> Option<&str> {
        self.by_platform.first().map(|(name, _)| name.as_str())
    }

    /// Share of `count` in the total, as a percentage.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

fn ranked<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let key = if value.is_empty() { "unknown" } else { value };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut items: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    items
}

/// Date part of an RFC 3339 timestamp.
fn day_of(timestamp: &str) -> Option<&str> {
    let day = timestamp.get(..10)?;
    let bytes = day.as_bytes();
    (bytes[4] == b'-' && bytes[7] == b'-').then_some(day)
}
