use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Error type for contract violations and boundary failures.
///
/// Data-shape problems in records (bad dates, unknown statuses, empty input)
/// are never reported through this type.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Unknown period `{0}`")]
    UnknownPeriod(String),
    #[error("Request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Session error: {0}")]
    Session(String),
}
