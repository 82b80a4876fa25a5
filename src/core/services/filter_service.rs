use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Dated, Record, RecordStatus, Searchable};
use crate::period::DateRange;

/// Optional predicates; a record must satisfy every one that is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.search.is_none() && self.date_range.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(status) = &self.status {
            if &record.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !record.matches_search(search) {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            match record.calendar_date() {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Records matching every predicate in `filter`, in their original order.
pub fn filter_records(records: &[Record], filter: &RecordFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Newest first. Records with unparseable dates follow every dated record and
/// keep their relative order.
pub fn sort_by_date_descending(records: &[Record]) -> Vec<Record> {
    let mut keyed: Vec<_> = records
        .iter()
        .map(|record| (record.calendar_date(), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Distinct statuses in first-seen order, unrecognized labels included.
pub fn available_statuses(records: &[Record]) -> Vec<RecordStatus> {
    let mut seen: Vec<RecordStatus> = Vec::new();
    for record in records {
        if !seen.contains(&record.status) {
            seen.push(record.status.clone());
        }
    }
    seen
}
