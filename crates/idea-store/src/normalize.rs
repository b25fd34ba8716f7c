//! Normalization: coercing raw stored records into the canonical shape.
//!
//! Both stores funnel reads through here. Optional sequence fields that are
//! absent or of the wrong shape become empty sequences, a missing label
//! becomes the empty string, and nothing is ever left `null`. Normalizing an
//! already-normalized record is a no-op.

use chrono::{DateTime, Utc};
use serde_json::Value;

use idea_core::DEFAULT_LABELS;
use idea_core::entities::{ChatEntry, DEFAULT_STATUS, Idea};

/// Coerce a raw JSON object into an [`Idea`].
///
/// Returns `None` when the value is not an object or has no usable `id`;
/// such records cannot be addressed and are dropped from reads.
#[must_use]
pub fn normalize_idea(raw: &Value) -> Option<Idea> {
    let obj = raw.as_object()?;
    let id = obj.get("id").and_then(Value::as_str).filter(|s| !s.is_empty())?;

    let (created_at, updated_at) = resolve_timestamps(
        obj.get("createdAt").and_then(parse_timestamp),
        obj.get("updatedAt").and_then(parse_timestamp),
    );

    Some(Idea {
        id: id.to_string(),
        title: coerce_text(obj.get("title")),
        description: coerce_text(obj.get("description")),
        status: obj
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_STATUS)
            .to_string(),
        label: coerce_text(obj.get("label")),
        tags: coerce_tags(obj.get("tags").unwrap_or(&Value::Null)),
        attachments: coerce_attachments(obj.get("attachments").unwrap_or(&Value::Null)),
        chat_transcript: coerce_transcript(obj.get("chatTranscript").unwrap_or(&Value::Null)),
        created_at,
        updated_at,
    })
}

/// Fill a missing timestamp from the other one, else the UNIX epoch.
#[must_use]
pub fn resolve_timestamps(
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        created.or(updated).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        updated.or(created).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
    )
}

/// Parse a whole ideas document. Anything but a top-level array yields an empty list.
#[must_use]
pub fn normalize_ideas(raw: &Value) -> Option<Vec<Idea>> {
    let items = raw.as_array()?;
    Some(items.iter().filter_map(normalize_idea).collect())
}

/// Parse a whole labels document into the canonical label order.
///
/// Returns `None` when the top-level value is not an array so the caller can
/// substitute the default set. Non-string and empty entries are dropped,
/// duplicates are removed, and names are sorted.
#[must_use]
pub fn normalize_labels(raw: &Value) -> Option<Vec<String>> {
    let items = raw.as_array()?;
    let names = items
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    Some(canonical_labels(names))
}

/// Sort and dedupe label names (byte order, matching `ORDER BY name` in `SQLite`).
#[must_use]
pub fn canonical_labels(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names.dedup();
    names
}

/// The default label set, already in canonical order.
#[must_use]
pub fn default_labels() -> Vec<String> {
    canonical_labels(DEFAULT_LABELS.iter().map(|s| (*s).to_string()).collect())
}

/// Keep the string elements of an array; anything else becomes empty.
#[must_use]
pub fn coerce_tags(raw: &Value) -> Vec<String> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Attachments are opaque: keep every element of an array as-is.
#[must_use]
pub fn coerce_attachments(raw: &Value) -> Vec<Value> {
    raw.as_array().cloned().unwrap_or_default()
}

/// Keep the well-formed transcript entries of an array, preserving order.
#[must_use]
pub fn coerce_transcript(raw: &Value) -> Vec<ChatEntry> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn coerce_text(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    let s = raw.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
