//! Idea update builder and merge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use idea_core::entities::{ChatEntry, Idea};

/// Partial payload for `update_idea`.
///
/// Deserializes from a camelCase JSON object where missing keys (and `null`)
/// mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_transcript: Option<Vec<ChatEntry>>,
}

impl IdeaUpdate {
    /// True when no field is set. Applying an empty update only refreshes `updated_at`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.label.is_none()
            && self.tags.is_none()
            && self.attachments.is_none()
            && self.chat_transcript.is_none()
    }

    /// Merge the present fields over `existing`, stamping `updated_at = now`.
    ///
    /// `id` and `created_at` are never changed.
    #[must_use]
    pub fn merge(&self, existing: &Idea, now: DateTime<Utc>) -> Idea {
        let mut merged = existing.clone();
        if let Some(ref title) = self.title {
            merged.title.clone_from(title);
        }
        if let Some(ref description) = self.description {
            merged.description.clone_from(description);
        }
        if let Some(ref status) = self.status {
            merged.status.clone_from(status);
        }
        if let Some(ref label) = self.label {
            merged.label.clone_from(label);
        }
        if let Some(ref tags) = self.tags {
            merged.tags.clone_from(tags);
        }
        if let Some(ref attachments) = self.attachments {
            merged.attachments.clone_from(attachments);
        }
        if let Some(ref chat_transcript) = self.chat_transcript {
            merged.chat_transcript.clone_from(chat_transcript);
        }
        merged.updated_at = now;
        merged
    }
}

pub struct IdeaUpdateBuilder(IdeaUpdate);

impl IdeaUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IdeaUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.0.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.0.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub fn attachments(mut self, attachments: Vec<serde_json::Value>) -> Self {
        self.0.attachments = Some(attachments);
        self
    }

    #[must_use]
    pub fn chat_transcript(mut self, chat_transcript: Vec<ChatEntry>) -> Self {
        self.0.chat_transcript = Some(chat_transcript);
        self
    }

    #[must_use]
    pub fn build(self) -> IdeaUpdate {
        self.0
    }
}

impl Default for IdeaUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
