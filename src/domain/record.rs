//! Dated, categorized records: attendance entries and fee transactions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::{Dated, Displayable, Searchable};

/// Label under which records without a subject or method are grouped.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// One attendance entry or fee transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: RecordKind,
    pub date: String,
    pub status: RecordStatus,
    /// Subject for attendance, payment method for fees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record {
    pub fn attendance(date: impl Into<String>, status: RecordStatus) -> Self {
        Self {
            id: None,
            kind: RecordKind::Attendance,
            date: date.into(),
            status,
            label: None,
            amount: None,
            description: None,
        }
    }

    /// Builds a fee record. Negative or non-finite amounts are not kept.
    pub fn fee(date: impl Into<String>, status: RecordStatus, amount: f64) -> Self {
        Self {
            id: None,
            kind: RecordKind::Fee,
            date: date.into(),
            status,
            label: None,
            amount: sanitize_amount(amount),
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grouping label used for per-subject or per-method breakdowns.
    pub fn group_label(&self) -> &str {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(UNASSIGNED_LABEL)
    }
}

impl Dated for Record {
    fn raw_date(&self) -> &str {
        &self.date
    }
}

impl Searchable for Record {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.status.label()];
        fields.extend(self.label.as_deref());
        fields.extend(self.description.as_deref());
        fields.extend(self.id.as_deref());
        fields
    }
}

impl Displayable for Record {
    fn display_label(&self) -> String {
        match (&self.label, self.amount) {
            (Some(label), Some(amount)) => {
                format!("{} {} ({}, {})", self.date, self.status, label, amount)
            }
            (Some(label), None) => format!("{} {} ({})", self.date, self.status, label),
            (None, Some(amount)) => format!("{} {} ({})", self.date, self.status, amount),
            (None, None) => format!("{} {}", self.date, self.status),
        }
    }
}

/// Returns the amount when it is a finite, non-negative number.
pub fn sanitize_amount(amount: f64) -> Option<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Attendance,
    Fee,
}

/// Status label carried by a record.
///
/// Labels outside the known set are preserved verbatim in `Other` so that
/// filter lists can still show them; summaries merge them into
/// [`StatusBucket::Other`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecordStatus {
    Present,
    Absent,
    Late,
    Excused,
    Paid,
    Pending,
    Overdue,
    Failed,
    Other(String),
}

impl RecordStatus {
    /// Case-insensitive parse. Never fails: unrecognized labels become `Other`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "present" => RecordStatus::Present,
            "absent" => RecordStatus::Absent,
            "late" => RecordStatus::Late,
            "excused" => RecordStatus::Excused,
            "paid" | "success" | "completed" => RecordStatus::Paid,
            "pending" | "due" => RecordStatus::Pending,
            "overdue" => RecordStatus::Overdue,
            "failed" => RecordStatus::Failed,
            _ => RecordStatus::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RecordStatus::Other(raw) => raw,
            known => known.bucket().label(),
        }
    }

    pub fn bucket(&self) -> StatusBucket {
        match self {
            RecordStatus::Present => StatusBucket::Present,
            RecordStatus::Absent => StatusBucket::Absent,
            RecordStatus::Late => StatusBucket::Late,
            RecordStatus::Excused => StatusBucket::Excused,
            RecordStatus::Paid => StatusBucket::Paid,
            RecordStatus::Pending => StatusBucket::Pending,
            RecordStatus::Overdue => StatusBucket::Overdue,
            RecordStatus::Failed => StatusBucket::Failed,
            RecordStatus::Other(raw) => match RecordStatus::parse(raw) {
                RecordStatus::Other(_) => StatusBucket::Other,
                known => known.bucket(),
            },
        }
    }

    pub fn is_fee_status(&self) -> bool {
        matches!(
            self,
            RecordStatus::Paid
                | RecordStatus::Pending
                | RecordStatus::Overdue
                | RecordStatus::Failed
        )
    }
}

impl PartialEq for RecordStatus {
    fn eq(&self, other: &Self) -> bool {
        match (self.bucket(), other.bucket()) {
            (StatusBucket::Other, StatusBucket::Other) => {
                self.label().trim().eq_ignore_ascii_case(other.label().trim())
            }
            (a, b) => a == b,
        }
    }
}

impl Eq for RecordStatus {}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary key. Ordered so that summaries serialize deterministically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusBucket {
    Present,
    Absent,
    Late,
    Excused,
    Paid,
    Pending,
    Overdue,
    Failed,
    Other,
}

impl StatusBucket {
    pub fn label(&self) -> &'static str {
        match self {
            StatusBucket::Present => "Present",
            StatusBucket::Absent => "Absent",
            StatusBucket::Late => "Late",
            StatusBucket::Excused => "Excused",
            StatusBucket::Paid => "Paid",
            StatusBucket::Pending => "Pending",
            StatusBucket::Overdue => "Overdue",
            StatusBucket::Failed => "Failed",
            StatusBucket::Other => "Other",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
