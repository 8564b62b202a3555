use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid ticker or CIK: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid amount: must be 1 or greater")]
    InvalidAmount,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Unsupported filing type: {0}")]
    UnsupportedFilingType(String),

    #[error("EDGAR search API encountered an error: {reason}. Request payload:\n{payload}")]
    SearchApiError { reason: String, payload: String },

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DownloadError>;
