use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChatRole;

/// One turn of the chat transcript attached to an idea. Transcripts are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatEntry {
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }
}
