use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::record::StatusBucket;
use crate::period::DateRange;

/// Buckets that count toward the positive side of a percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountingPolicy {
    pub counted: BTreeSet<StatusBucket>,
}

impl CountingPolicy {
    pub fn new(counted: impl IntoIterator<Item = StatusBucket>) -> Self {
        Self {
            counted: counted.into_iter().collect(),
        }
    }

    /// Present, Late and Excused count as attended; Absent does not.
    pub fn attendance() -> Self {
        Self::new([
            StatusBucket::Present,
            StatusBucket::Late,
            StatusBucket::Excused,
        ])
    }

    pub fn fees() -> Self {
        Self::new([StatusBucket::Paid])
    }

    pub fn counts(&self, bucket: StatusBucket) -> bool {
        self.counted.contains(&bucket)
    }
}

impl Default for CountingPolicy {
    fn default() -> Self {
        Self::attendance()
    }
}

/// Period-bucketed statistics for one aggregation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub range: DateRange,
    pub counts: BTreeMap<StatusBucket, usize>,
    pub total: usize,
    pub percentage: u8,
    /// Records dropped because their date did not parse.
    pub excluded: usize,
    /// Sum of amounts per bucket, for records that carry one.
    pub amounts: BTreeMap<StatusBucket, f64>,
}

impl Summary {
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            counts: BTreeMap::new(),
            total: 0,
            percentage: 0,
            excluded: 0,
            amounts: BTreeMap::new(),
        }
    }

    pub fn count(&self, bucket: StatusBucket) -> usize {
        self.counts.get(&bucket).copied().unwrap_or(0)
    }

    pub fn amount(&self, bucket: StatusBucket) -> f64 {
        self.amounts.get(&bucket).copied().unwrap_or(0.0)
    }

    pub fn total_amount(&self) -> f64 {
        self.amounts.values().sum()
    }

    /// Number of records counted toward the percentage under `policy`.
    pub fn positive_count(&self, policy: &CountingPolicy) -> usize {
        self.counts
            .iter()
            .filter(|(bucket, _)| policy.counts(**bucket))
            .map(|(_, count)| *count)
            .sum()
    }
}
