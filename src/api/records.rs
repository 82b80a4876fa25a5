use serde_json::{Map, Value};

use crate::domain::record::sanitize_amount;
use crate::domain::{Record, RecordKind, RecordStatus};
use crate::errors::Result;

use super::envelope::{normalize, RawResponse};

const ID_FIELDS: &[&str] = &["id", "_id", "transactionId"];
const STATUS_FIELDS: &[&str] = &["status", "category"];
const LABEL_FIELDS: &[&str] = &["subject", "subjectOrMethod", "method", "paymentMethod"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "remarks", "title"];

/// Normalizes a record-list response and decodes its entries.
///
/// Transport and HTTP failures come back as `AnalyticsError::Api`; data-shape
/// problems inside individual entries never fail the call.
pub fn fetch_records(raw: &RawResponse) -> Result<Vec<Record>> {
    let value = normalize::<Value>(raw).into_result()?;
    Ok(decode_records(&value))
}

/// Decodes a JSON array of record objects.
///
/// Missing optional fields stay empty and unknown fields are ignored. Entries
/// that are not objects are skipped. A non-array value decodes to nothing.
pub fn decode_records(value: &Value) -> Vec<Record> {
    let Some(entries) = value.as_array() else {
        tracing::warn!("record payload is not an array");
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.as_object() {
            Some(object) => Some(decode_record(object)),
            None => {
                tracing::warn!(index, "skipping record entry that is not an object");
                None
            }
        })
        .collect()
}

pub fn decode_record(object: &Map<String, Value>) -> Record {
    let status = text_field(object, STATUS_FIELDS)
        .map(|raw| RecordStatus::parse(&raw))
        .unwrap_or_else(|| RecordStatus::Other(String::new()));
    let amount = object.get("amount").and_then(amount_value);
    let kind = if amount.is_some() || status.is_fee_status() {
        RecordKind::Fee
    } else {
        RecordKind::Attendance
    };
    Record {
        id: text_field(object, ID_FIELDS),
        kind,
        date: text_field(object, &["date"]).unwrap_or_default(),
        status,
        label: text_field(object, LABEL_FIELDS),
        amount,
        description: text_field(object, DESCRIPTION_FIELDS),
    }
}

/// First present, non-null field among `names`, rendered as text.
fn text_field(object: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find_map(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
}

fn amount_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    let amount = sanitize_amount(parsed);
    if amount.is_none() {
        tracing::warn!(amount = parsed, "dropping negative or non-finite amount");
    }
    amount
}
