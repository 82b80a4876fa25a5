use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AnalyticsError, Result};

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error or server unreachable. Please check your connection.";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// What the transport handed back, before any interpretation.
///
/// A status of `0` means no response was received at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".into()),
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/html".into()),
            body: body.into(),
        }
    }

    pub fn network_failure() -> Self {
        Self {
            status: 0,
            content_type: None,
            body: String::new(),
        }
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|value| value.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn payload(&self) -> Value {
        if !self.is_json() {
            return Value::String(self.body.clone());
        }
        match serde_json::from_str(&self.body) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(status = self.status, error = %err, "response declared JSON but did not parse");
                Value::String(self.body.clone())
            }
        }
    }
}

/// Canonical result shape every caller sees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, status: u16) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status,
        }
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            status,
        }
    }

    pub fn network_failure() -> Self {
        Self::failure(0, NETWORK_ERROR_MESSAGE)
    }

    pub fn is_network_failure(&self) -> bool {
        !self.success && self.status == 0
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }

    pub fn into_result(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(AnalyticsError::Api {
                status: self.status,
                message: self
                    .error
                    .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string()),
            }),
        }
    }
}

/// Single normalization step from a raw response to [`ApiResponse`].
///
/// Successful bodies nested under a top-level `data` field are unwrapped. A
/// body that does not decode into `T` becomes a failure envelope.
pub fn normalize<T: DeserializeOwned>(raw: &RawResponse) -> ApiResponse<T> {
    if raw.status == 0 {
        return ApiResponse::network_failure();
    }
    let payload = raw.payload();
    if !raw.is_success() {
        let message = failure_message(&payload);
        tracing::debug!(status = raw.status, %message, "request failed");
        return ApiResponse::failure(raw.status, message);
    }
    match serde_json::from_value::<T>(unwrap_data(payload)) {
        Ok(data) => ApiResponse::ok(data, raw.status),
        Err(err) => {
            tracing::warn!(status = raw.status, error = %err, "response body did not match expected shape");
            ApiResponse::failure(raw.status, format!("Malformed response: {}", err))
        }
    }
}

fn unwrap_data(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".into(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

fn failure_message(payload: &Value) -> String {
    match payload.get("error") {
        Some(Value::String(message)) if !message.is_empty() => return message.clone(),
        Some(Value::Null) | None => {}
        Some(other) => return other.to_string(),
    }
    match payload {
        Value::Null => REQUEST_FAILED_MESSAGE.to_string(),
        Value::String(text) if text.trim().is_empty() => REQUEST_FAILED_MESSAGE.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
