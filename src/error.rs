// src/error.rs
use thiserror::Error;

use crate::auth::AuthError;
use crate::render::RenderError;
use crate::store::StoreError;

/// A comprehensive error type for the whole portal.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("report rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Rejected before reaching the store; no side effect occurred.
    #[error("invalid submission: {0}")]
    Validation(String),

    #[error("no record with CAPA number '{0}'")]
    NotFound(String),

    #[error("portal configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Handle JSON errors at the top level (e.g. when the CLI reads a record file).
impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        PortalError::Store(StoreError::Format(e.to_string()))
    }
}
