//! Error types for transfers

use thiserror::Error;
use univer_bridge_protocol::AgentError;

/// Errors raised while moving content between Univer and a workbook
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Highlight rule {0} has no style")]
    MissingHighlightStyle(String),

    #[error("Picture format {0:?} has no MIME type")]
    UnsupportedPictureFormat(univer_bridge_core::PictureFormat),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Workbook error: {0}")]
    Workbook(#[from] univer_bridge_core::Error),

    #[error("Invalid image payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
