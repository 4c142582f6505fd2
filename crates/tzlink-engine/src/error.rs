//! Error types for tzlink-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Cannot resolve host timezone: {0}")]
    HostTimezone(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
