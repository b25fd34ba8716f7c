//! Column mapping between the logical [`Idea`] and the `ideas` table.
//!
//! The table uses `snake_case` columns and stores the transcript in
//! `chat_history`. Reads apply the same coercion as local normalization:
//! NULL or malformed JSON columns become empty sequences, a NULL label
//! becomes the empty string, only a NULL status becomes `"new"`, and an
//! unparseable timestamp borrows the other one (else the UNIX epoch).

use chrono::{DateTime, Utc};
use idea_core::entities::{DEFAULT_STATUS, Idea};

use crate::error::StoreError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_json_lenient};
use crate::normalize::{coerce_attachments, coerce_tags, coerce_transcript, resolve_timestamps};

/// Column list shared by every `SELECT` / `RETURNING` in the remote store.
pub const IDEA_COLS: &str = "id, title, description, status, label, tags, attachments, \
                             chat_history, created_at, updated_at";

/// An `ideas` row in storage form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub label: Option<String>,
    pub tags: Option<String>,
    pub attachments: Option<String>,
    pub chat_history: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl IdeaRow {
    /// Read a row selected with [`IDEA_COLS`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a required column is missing or NULL.
    pub fn from_row(row: &libsql::Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.get(0)?,
            title: get_opt_string(row, 1)?.unwrap_or_default(),
            description: get_opt_string(row, 2)?,
            status: row.get::<Option<String>>(3)?,
            label: get_opt_string(row, 4)?,
            tags: get_opt_string(row, 5)?,
            attachments: get_opt_string(row, 6)?,
            chat_history: get_opt_string(row, 7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    /// Positional parameters in [`IDEA_COLS`] order.
    #[must_use]
    pub fn into_params(self) -> Vec<libsql::Value> {
        vec![
            self.id.into(),
            self.title.into(),
            self.description.unwrap_or_default().into(),
            self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()).into(),
            self.label.unwrap_or_default().into(),
            self.tags.unwrap_or_else(empty_array).into(),
            self.attachments.unwrap_or_else(empty_array).into(),
            self.chat_history.unwrap_or_else(empty_array).into(),
            self.created_at.into(),
            self.updated_at.into(),
        ]
    }
}

/// Logical record to storage row.
///
/// # Errors
///
/// Returns `StoreError::Json` if a JSON column cannot be encoded.
pub fn record_to_storage(idea: &Idea) -> Result<IdeaRow, StoreError> {
    Ok(IdeaRow {
        id: idea.id.clone(),
        title: idea.title.clone(),
        description: Some(idea.description.clone()),
        status: Some(idea.status.clone()),
        label: Some(idea.label.clone()),
        tags: Some(serde_json::to_string(&idea.tags)?),
        attachments: Some(serde_json::to_string(&idea.attachments)?),
        chat_history: Some(serde_json::to_string(&idea.chat_transcript)?),
        created_at: format_datetime(&idea.created_at),
        updated_at: format_datetime(&idea.updated_at),
    })
}

/// Storage row to logical record, coercing absent or malformed columns.
#[must_use]
pub fn storage_to_record(row: &IdeaRow) -> Idea {
    let (created_at, updated_at) = resolve_timestamps(
        lenient_datetime(&row.id, "created_at", &row.created_at),
        lenient_datetime(&row.id, "updated_at", &row.updated_at),
    );
    Idea {
        id: row.id.clone(),
        title: row.title.clone(),
        description: row.description.clone().unwrap_or_default(),
        status: row
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        label: row.label.clone().unwrap_or_default(),
        tags: coerce_tags(&parse_json_lenient(row.tags.as_deref())),
        attachments: coerce_attachments(&parse_json_lenient(row.attachments.as_deref())),
        chat_transcript: coerce_transcript(&parse_json_lenient(row.chat_history.as_deref())),
        created_at,
        updated_at,
    }
}

fn lenient_datetime(id: &str, column: &str, raw: &str) -> Option<DateTime<Utc>> {
    parse_datetime(raw)
        .map_err(|error| {
            tracing::warn!(id, column, %error, "invalid timestamp in column; substituting");
        })
        .ok()
}

fn empty_array() -> String {
    "[]".to_string()
}
