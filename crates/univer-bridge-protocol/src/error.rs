//! Error types for the agent boundary.

use thiserror::Error;

/// Errors reported by a [`UniverAgent`](crate::UniverAgent) or
/// [`UserDirectory`](crate::UserDirectory).
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Call rejected by the document: {0}")]
    Rejected(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
