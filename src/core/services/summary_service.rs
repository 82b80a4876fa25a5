use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{CountingPolicy, Dated, Record, Summary};
use crate::errors::Result;
use crate::period::{DateRange, Period};

/// Buckets records into a period and derives the attended/paid percentage.
#[derive(Debug, Clone, Default)]
pub struct SummaryService {
    policy: CountingPolicy,
}

impl SummaryService {
    pub fn new(policy: CountingPolicy) -> Self {
        Self { policy }
    }

    pub fn attendance() -> Self {
        Self::new(CountingPolicy::attendance())
    }

    pub fn fees() -> Self {
        Self::new(CountingPolicy::fees())
    }

    pub fn policy(&self) -> &CountingPolicy {
        &self.policy
    }

    /// Tallies `records` falling inside `period` as resolved against `now`.
    ///
    /// Records with unparseable dates are counted in `excluded` and nowhere
    /// else. The only error is a malformed custom period.
    pub fn bucket_by_period(
        &self,
        records: &[Record],
        period: &Period,
        now: DateTime<Utc>,
    ) -> Result<Summary> {
        let range = period.resolve(now)?;
        let summary = self.summarize_range(records.iter(), range);
        tracing::debug!(
            period = %period,
            range = %summary.range,
            total = summary.total,
            excluded = summary.excluded,
            percentage = summary.percentage,
            "bucketed records"
        );
        Ok(summary)
    }

    /// One summary per subject (attendance) or payment method (fees).
    ///
    /// Labels differing only in case share a group, keyed by the first
    /// spelling seen.
    pub fn breakdown_by_label(
        &self,
        records: &[Record],
        period: &Period,
        now: DateTime<Utc>,
    ) -> Result<BTreeMap<String, Summary>> {
        let range = period.resolve(now)?;
        let mut groups: BTreeMap<String, (String, Vec<&Record>)> = BTreeMap::new();
        for record in records {
            let label = record.group_label();
            groups
                .entry(label.to_lowercase())
                .or_insert_with(|| (label.to_string(), Vec::new()))
                .1
                .push(record);
        }
        Ok(groups
            .into_values()
            .map(|(label, group)| (label, self.summarize_range(group.into_iter(), range)))
            .collect())
    }

    fn summarize_range<'a>(
        &self,
        records: impl Iterator<Item = &'a Record>,
        range: DateRange,
    ) -> Summary {
        let mut summary = Summary::empty(range);
        for record in records {
            let Some(date) = record.calendar_date() else {
                summary.excluded += 1;
                continue;
            };
            if !range.contains(date) {
                continue;
            }
            let bucket = record.status.bucket();
            *summary.counts.entry(bucket).or_insert(0) += 1;
            if let Some(amount) = record.amount {
                *summary.amounts.entry(bucket).or_insert(0.0) += amount;
            }
            summary.total += 1;
        }
        summary.percentage = percentage(summary.positive_count(&self.policy), summary.total);
        summary
    }
}

/// `round(100 * positive / total)`, half away from zero; zero when `total` is zero.
pub fn percentage(positive: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let positive = positive.min(total);
    let value = (positive as f64 * 100.0 / total as f64).round();
    value.clamp(0.0, 100.0) as u8
}
