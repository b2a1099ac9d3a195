use thiserror::Error;

/// Root error type for fallible entry points (input parsing, JSON bridging).
///
/// Indicator math never returns an error: short input yields an empty series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Series Error: {0}")]
    Series(#[from] SeriesError),
    #[error("Serialization Error: {0}")]
    Serialization(String),
    #[error("Configuration Error: {0}")]
    Configuration(String),
}

/// Structural problems in a candle series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("candle {index} has time {current}, not after previous time {previous}")]
    NotStrictlyIncreasing { index: usize, previous: i64, current: i64 },
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Serialization(error.to_string())
    }
}

impl From<strum::ParseError> for AppError {
    fn from(error: strum::ParseError) -> Self {
        AppError::Configuration(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
