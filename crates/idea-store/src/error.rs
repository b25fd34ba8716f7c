//! Store error types for idea-store.

use std::path::PathBuf;

use idea_config::ConfigError;
use idea_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
///
/// Unknown ids are not errors: lookups return `None` / `false` instead.
/// Malformed local documents are not errors either; reads fall back to an
/// empty idea list or the default label set.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQL query failed or returned data that cannot be mapped.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema creation failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Reading or writing a local document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a record failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying libSQL error (network, auth, constraint).
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// A label was deleted but clearing it from referencing ideas stopped
    /// partway. `cleared` lists the ideas that were already updated; they
    /// are not rolled back.
    #[error("Label '{label}' removed but cascade stopped after clearing {} idea(s): {source}", cleared.len())]
    CascadeIncomplete {
        label: String,
        cleared: Vec<String>,
        #[source]
        source: Box<StoreError>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
