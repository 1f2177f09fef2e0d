//! Error types for spotistats

use thiserror::Error;

/// Main error type for fetching and analysing listening data
#[derive(Error, Debug)]
pub enum StatsError {
    /// An upstream record is missing a required field or carries an invalid value.
    #[error("Malformed upstream data in {record}: {reason}")]
    MalformedUpstreamData { record: String, reason: String },

    /// The Spotify API could not be reached or answered with a failure status.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`StatsError`]
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Create a malformed-data error for the given record
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedUpstreamData {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(reqwest::StatusCode::UNAUTHORIZED) => Self::Unauthorized(err.to_string()),
            _ => Self::UpstreamUnavailable(err.to_string()),
        }
    }
}
