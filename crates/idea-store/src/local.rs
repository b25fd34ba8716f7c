//! Local store: two JSON documents in a data directory.
//!
//! `ideas.json` holds a bare array of idea objects (camelCase fields) and
//! `labels.json` a bare array of label names. Every mutation rewrites the
//! whole document in one write. Reads are best-effort: a missing, unreadable,
//! or malformed ideas document reads as an empty list, and a malformed labels
//! document reads as the default label set.
//!
//! A per-store mutex serializes every read and read-modify-write cycle inside
//! one process, so a reader never sees a document mid-rewrite. Separate processes sharing the directory are last-writer-wins, and a crash
//! mid-write can leave a truncated document (which then reads as the fallback).

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use idea_core::entities::{Idea, NewIdea};
use idea_core::ids::{PREFIX_IDEA, generate_id};

use crate::error::StoreError;
use crate::normalize::{canonical_labels, default_labels, normalize_ideas, normalize_labels};
use crate::store::{IdeaStore, LabelRemoval};
use crate::updates::idea::IdeaUpdate;

pub const IDEAS_FILE: &str = "ideas.json";
pub const LABELS_FILE: &str = "labels.json";

pub struct LocalStore {
    ideas_path: PathBuf,
    labels_path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Open (and if needed initialize) the store in `dir`.
    ///
    /// Creates the directory, seeds a missing ideas document with `[]` and a
    /// missing labels document with the default labels. Existing documents
    /// are left untouched, even if malformed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or a seed document cannot be written.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::io(dir, e))?;

        let store = Self {
            ideas_path: dir.join(IDEAS_FILE),
            labels_path: dir.join(LABELS_FILE),
            write_lock: Mutex::new(()),
        };

        if !path_exists(&store.ideas_path).await {
            tracing::debug!(path = %store.ideas_path.display(), "seeding empty ideas document");
            store.write_ideas(&[]).await?;
        }
        if !path_exists(&store.labels_path).await {
            tracing::debug!(path = %store.labels_path.display(), "seeding default labels document");
            store.write_labels(&default_labels()).await?;
        }

        Ok(store)
    }

    #[must_use]
    pub fn ideas_path(&self) -> &Path {
        &self.ideas_path
    }

    #[must_use]
    pub fn labels_path(&self) -> &Path {
        &self.labels_path
    }

    async fn read_ideas(&self) -> Vec<Idea> {
        match tokio::fs::read_to_string(&self.ideas_path).await {
            Ok(text) => parse_ideas_document(&text),
            Err(error) => {
                tracing::warn!(
                    path = %self.ideas_path.display(),
                    %error,
                    "ideas document unreadable; using empty list"
                );
                Vec::new()
            }
        }
    }

    async fn read_labels(&self) -> Vec<String> {
        match tokio::fs::read_to_string(&self.labels_path).await {
            Ok(text) => parse_labels_document(&text),
            Err(error) => {
                tracing::warn!(
                    path = %self.labels_path.display(),
                    %error,
                    "labels document unreadable; using default labels"
                );
                default_labels()
            }
        }
    }

    async fn write_ideas(&self, ideas: &[Idea]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(ideas)?;
        tokio::fs::write(&self.ideas_path, text)
            .await
            .map_err(|e| StoreError::io(&self.ideas_path, e))
    }

    async fn write_labels(&self, labels: &[String]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(labels)?;
        tokio::fs::write(&self.labels_path, text)
            .await
            .map_err(|e| StoreError::io(&self.labels_path, e))
    }
}

impl IdeaStore for LocalStore {
    async fn list_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        let mut ideas = {
            let _guard = self.write_lock.lock().await;
            self.read_ideas().await
        };
        ideas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        tracing::debug!(count = ideas.len(), "listed ideas from local store");
        Ok(ideas)
    }

    async fn get_idea(&self, id: &str) -> Result<Option<Idea>, StoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_ideas().await.into_iter().find(|i| i.id == id))
    }

    async fn create_idea(&self, new: NewIdea) -> Result<Idea, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ideas = self.read_ideas().await;

        let idea = Idea::from_new(generate_id(PREFIX_IDEA)?, new, Utc::now());
        ideas.push(idea.clone());
        self.write_ideas(&ideas).await?;

        tracing::debug!(id = %idea.id, "created idea in local store");
        Ok(idea)
    }

    async fn update_idea(&self, id: &str, update: IdeaUpdate) -> Result<Option<Idea>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ideas = self.read_ideas().await;

        let Some(slot) = ideas.iter_mut().find(|i| i.id == id) else {
            tracing::debug!(id, "update of unknown idea");
            return Ok(None);
        };
        *slot = update.merge(slot, Utc::now());
        let updated = slot.clone();
        self.write_ideas(&ideas).await?;

        tracing::debug!(id, "updated idea in local store");
        Ok(Some(updated))
    }

    async fn delete_idea(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ideas = self.read_ideas().await;

        let before = ideas.len();
        ideas.retain(|i| i.id != id);
        if ideas.len() == before {
            return Ok(false);
        }
        self.write_ideas(&ideas).await?;

        tracing::debug!(id, "deleted idea from local store");
        Ok(true)
    }

    async fn list_labels(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_labels().await)
    }

    async fn add_label(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut labels = self.read_labels().await;

        if labels.iter().any(|l| l == name) {
            return Ok(labels);
        }
        labels.push(name.to_string());
        let labels = canonical_labels(labels);
        self.write_labels(&labels).await?;

        tracing::debug!(name, "added label to local store");
        Ok(labels)
    }

    async fn remove_label(&self, name: &str) -> Result<LabelRemoval, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut labels = self.read_labels().await;

        // Unlabeled ideas carry "", which names no label.
        if name.is_empty() {
            return Ok(LabelRemoval { labels, cleared: Vec::new() });
        }

        let before = labels.len();
        labels.retain(|l| l != name);
        if labels.len() != before {
            self.write_labels(&labels).await?;
        }

        let mut ideas = self.read_ideas().await;
        let now = Utc::now();
        let mut cleared = Vec::new();
        for idea in ideas.iter_mut().filter(|i| i.label == name) {
            idea.label.clear();
            idea.updated_at = now;
            cleared.push(idea.id.clone());
        }

        if !cleared.is_empty() {
            if let Err(source) = self.write_ideas(&ideas).await {
                return Err(StoreError::CascadeIncomplete {
                    label: name.to_string(),
                    cleared: Vec::new(),
                    source: Box::new(source),
                });
            }
        }

        tracing::debug!(name, cleared = cleared.len(), "removed label from local store");
        Ok(LabelRemoval { labels, cleared })
    }
}

/// Best-effort parse of an ideas document.
///
/// Returns an empty list when the text is not JSON or the top-level value is
/// not an array. Unaddressable entries (no `id`) are skipped.
#[must_use]
pub fn parse_ideas_document(text: &str) -> Vec<Idea> {
    let parsed = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| normalize_ideas(&value));
    parsed.unwrap_or_else(|| {
        tracing::warn!("ideas document is malformed; using empty list");
        Vec::new()
    })
}

/// Best-effort parse of a labels document.
///
/// Returns the default label set when the text is not JSON or the top-level
/// value is not an array.
#[must_use]
pub fn parse_labels_document(text: &str) -> Vec<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| normalize_labels(&value));
    parsed.unwrap_or_else(|| {
        tracing::warn!("labels document is malformed; using default labels");
        default_labels()
    })
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
