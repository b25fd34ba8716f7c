//! Cross-cutting error types for the idea tracker.
//!
//! Storage errors (`StoreError`) live in `idea-store` and configuration errors
//! in `idea-config`. A unified error is deferred to `idea-cli` where they
//! converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any idea crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (empty title, blank label name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
