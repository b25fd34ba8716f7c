use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ChatEntry;
use crate::errors::CoreError;

/// Status assigned to ideas created without one.
pub const DEFAULT_STATUS: &str = "new";

/// A short project proposal tracked with its status, label, tags, attachments,
/// and chat history.
///
/// `label` is either empty or the name of an existing label. Removing a label
/// clears it from every idea that referenced it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub label: String,
    pub tags: Vec<String>,
    /// Opaque records; never populated at creation.
    pub attachments: Vec<serde_json::Value>,
    pub chat_transcript: Vec<ChatEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Build a fresh idea from a creation payload.
    ///
    /// Absent optional fields take their defaults: empty description, status
    /// `"new"`, empty label, no tags, no attachments, empty transcript.
    /// `created_at` and `updated_at` are both set to `now`.
    #[must_use]
    pub fn from_new(id: String, new: NewIdea, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            status: new
                .status
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            label: new.label.unwrap_or_default(),
            tags: new.tags.unwrap_or_default(),
            attachments: Vec::new(),
            chat_transcript: new.chat_transcript.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Creation payload for an idea. Only `title` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewIdea {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_transcript: Option<Vec<ChatEntry>>,
}

impl NewIdea {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the fields the storage layer expects callers to have validated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title is empty or whitespace.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_new_applies_defaults() {
        let now = Utc::now();
        let idea = Idea::from_new("idea-1".into(), NewIdea::new("Ship v2"), now);

        assert_eq!(idea.title, "Ship v2");
        assert_eq!(idea.status, DEFAULT_STATUS);
        assert_eq!(idea.label, "");
        assert!(idea.description.is_empty());
        assert!(idea.tags.is_empty());
        assert!(idea.attachments.is_empty());
        assert!(idea.chat_transcript.is_empty());
        assert_eq!(idea.created_at, idea.updated_at);
    }

    #[test]
    fn from_new_keeps_supplied_fields() {
        let now = Utc::now();
        let new = NewIdea {
            status: Some("planned".into()),
            ..NewIdea::new("Ship v2")
                .with_label("Growth")
                .with_tags(vec!["b".into(), "a".into()])
        };
        let idea = Idea::from_new("idea-1".into(), new, now);

        assert_eq!(idea.status, "planned");
        assert_eq!(idea.label, "Growth");
        assert_eq!(idea.tags, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn empty_status_falls_back_to_default() {
        let new = NewIdea {
            status: Some(String::new()),
            ..NewIdea::new("x")
        };
        let idea = Idea::from_new("idea-1".into(), new, Utc::now());
        assert_eq!(idea.status, DEFAULT_STATUS);
    }

    #[test]
    fn validate_rejects_blank_title() {
        assert!(NewIdea::new("   ").validate().is_err());
        assert!(NewIdea::new("ok").validate().is_ok());
    }

    #[test]
    fn serializes_camel_case() {
        let idea = Idea::from_new("idea-1".into(), NewIdea::new("x"), Utc::now());
        let json = serde_json::to_value(&idea).unwrap();
        assert!(json.get("chatTranscript").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("chat_transcript").is_none());
    }

    #[test]
    fn new_idea_deserializes_with_only_title() {
        let new: NewIdea = serde_json::from_str(r#"{"title":"Ship v2"}"#).unwrap();
        assert_eq!(new, NewIdea::new("Ship v2"));
    }
}
