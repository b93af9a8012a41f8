//! Error types for track reward scoring

use thiserror::Error;

/// Result type for track reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Track reward error types
#[derive(Debug, Error)]
pub enum RewardError {
    /// Observation missing a field, wrongly typed, or out of range
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    /// Reward configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Scoring stream not open
    #[error("Stream not found: {0}")]
    StreamNotFound(String),

    /// Too many open streams
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing a file or stdio failed
    #[error("I/O error: {0}")]
    IoError(String),

    /// Protocol error
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl RewardError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            RewardError::InvalidObservation(_) => error_codes::INVALID_OBSERVATION,
            RewardError::InvalidConfig(_) => error_codes::INVALID_CONFIG,
            RewardError::StreamNotFound(_) => error_codes::STREAM_NOT_FOUND,
            RewardError::ResourceExhausted(_) => error_codes::RESOURCE_EXHAUSTED,
            RewardError::SerializationError(_) | RewardError::ProtocolError(_) => {
                error_codes::INVALID_PARAMS
            }
            RewardError::IoError(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<serde_json::Error> for RewardError {
    fn from(err: serde_json::Error) -> Self {
        RewardError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for RewardError {
    fn from(err: std::io::Error) -> Self {
        RewardError::IoError(err.to_string())
    }
}

/// JSON-RPC error codes for the scoring service
pub mod error_codes {
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const INVALID_OBSERVATION: i32 = -32010;
    pub const INVALID_CONFIG: i32 = -32011;
    pub const STREAM_NOT_FOUND: i32 = -32012;
    pub const RESOURCE_EXHAUSTED: i32 = -32013;
}
