//! Errors raised while decoding host data.

use sheetmark_domain::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum SharedError {
    /// Drag data that is not JSON or lacks the fields a reorder needs
    #[error("Malformed drop payload: {0}")]
    MalformedPayload(String),

    /// Host document could not be converted into a snapshot
    #[error("Invalid host document: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
