//! Repository: the backend-agnostic entry point for idea and label operations.
//!
//! The request-handling layer talks only to [`Repository`]. Which store sits
//! behind it is decided once, in [`Repository::open`], from configuration.

use idea_config::{BackendChoice, IdeaConfig};
use idea_core::entities::{ChatEntry, Idea, NewIdea};

use crate::error::StoreError;
use crate::local::LocalStore;
use crate::remote::RemoteStore;
use crate::store::{IdeaStore, LabelRemoval};
use crate::updates::idea::{IdeaUpdate, IdeaUpdateBuilder};

/// The store selected at startup.
pub enum Backend {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Backend {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "remote",
        }
    }
}

impl IdeaStore for Backend {
    async fn list_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        match self {
            Self::Local(store) => store.list_ideas().await,
            Self::Remote(store) => store.list_ideas().await,
        }
    }

    async fn get_idea(&self, id: &str) -> Result<Option<Idea>, StoreError> {
        match self {
            Self::Local(store) => store.get_idea(id).await,
            Self::Remote(store) => store.get_idea(id).await,
        }
    }

    async fn create_idea(&self, new: NewIdea) -> Result<Idea, StoreError> {
        match self {
            Self::Local(store) => store.create_idea(new).await,
            Self::Remote(store) => store.create_idea(new).await,
        }
    }

    async fn update_idea(&self, id: &str, update: IdeaUpdate) -> Result<Option<Idea>, StoreError> {
        match self {
            Self::Local(store) => store.update_idea(id, update).await,
            Self::Remote(store) => store.update_idea(id, update).await,
        }
    }

    async fn delete_idea(&self, id: &str) -> Result<bool, StoreError> {
        match self {
            Self::Local(store) => store.delete_idea(id).await,
            Self::Remote(store) => store.delete_idea(id).await,
        }
    }

    async fn list_labels(&self) -> Result<Vec<String>, StoreError> {
        match self {
            Self::Local(store) => store.list_labels().await,
            Self::Remote(store) => store.list_labels().await,
        }
    }

    async fn add_label(&self, name: &str) -> Result<Vec<String>, StoreError> {
        match self {
            Self::Local(store) => store.add_label(name).await,
            Self::Remote(store) => store.add_label(name).await,
        }
    }

    async fn remove_label(&self, name: &str) -> Result<LabelRemoval, StoreError> {
        match self {
            Self::Local(store) => store.remove_label(name).await,
            Self::Remote(store) => store.remove_label(name).await,
        }
    }
}

/// Entity-level operations over whichever store is active.
///
/// Label names are trimmed before they reach the store; a blank name is a
/// no-op that returns the current set.
pub struct Repository<S = Backend> {
    store: S,
}

impl Repository<Backend> {
    /// Open the store chosen by `config`. There is no fallback: if the
    /// configured store cannot be opened, this fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` for inconsistent configuration, or the
    /// store's error if opening fails.
    pub async fn open(config: &IdeaConfig) -> Result<Self, StoreError> {
        let backend = match config.backend()? {
            BackendChoice::Local { data_dir } => {
                Backend::Local(LocalStore::open(&data_dir).await?)
            }
            BackendChoice::Remote { url, auth_token } => {
                Backend::Remote(RemoteStore::connect(&url, &auth_token).await?)
            }
        };
        tracing::info!(backend = backend.kind(), "idea repository opened");
        Ok(Self::new(backend))
    }
}

impl<S: IdeaStore> Repository<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All ideas, most recently updated first.
    pub async fn list_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.store.list_ideas().await
    }

    pub async fn get_idea(&self, id: &str) -> Result<Option<Idea>, StoreError> {
        self.store.get_idea(id).await
    }

    /// Create an idea. The caller is expected to have checked the title
    /// (see [`NewIdea::validate`]).
    pub async fn create_idea(&self, new: NewIdea) -> Result<Idea, StoreError> {
        self.store.create_idea(new).await
    }

    pub async fn update_idea(
        &self,
        id: &str,
        update: IdeaUpdate,
    ) -> Result<Option<Idea>, StoreError> {
        self.store.update_idea(id, update).await
    }

    pub async fn delete_idea(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete_idea(id).await
    }

    /// Append entries to an idea's chat transcript.
    ///
    /// Read-append-write through [`Self::update_idea`]; concurrent appends to
    /// the same idea can lose entries. `None` when the idea does not exist.
    pub async fn append_chat(
        &self,
        id: &str,
        entries: Vec<ChatEntry>,
    ) -> Result<Option<Idea>, StoreError> {
        let Some(existing) = self.store.get_idea(id).await? else {
            return Ok(None);
        };
        let mut transcript = existing.chat_transcript;
        transcript.extend(entries);
        let update = IdeaUpdateBuilder::new().chat_transcript(transcript).build();
        self.store.update_idea(id, update).await
    }

    /// Ideas whose label is exactly `name`, most recently updated first.
    pub async fn list_ideas_with_label(&self, name: &str) -> Result<Vec<Idea>, StoreError> {
        let ideas = self.store.list_ideas().await?;
        Ok(ideas.into_iter().filter(|i| i.label == name).collect())
    }

    /// Label names in canonical (sorted) order.
    pub async fn list_labels(&self) -> Result<Vec<String>, StoreError> {
        self.store.list_labels().await
    }

    /// Add a label; idempotent. Returns the full label set.
    pub async fn add_label(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return self.store.list_labels().await;
        }
        self.store.add_label(name).await
    }

    /// Remove a label and clear it from every idea that referenced it.
    ///
    /// See [`IdeaStore::remove_label`] for the partial-failure contract.
    pub async fn remove_label(&self, name: &str) -> Result<LabelRemoval, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(LabelRemoval {
                labels: self.store.list_labels().await?,
                cleared: Vec::new(),
            });
        }
        let removal = self.store.remove_label(name).await?;
        tracing::info!(
            label = name,
            cleared = removal.cleared.len(),
            "label removed"
        );
        Ok(removal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{test_local_repo, test_remote_repo};
    use chrono::Utc;
    use idea_config::{LocalConfig, RemoteConfig};
    use idea_core::enums::ChatRole;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn open_selects_local_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = IdeaConfig {
            local: LocalConfig {
                data_dir: dir.path().join("data").to_string_lossy().into_owned(),
            },
            ..Default::default()
        };

        let repo = Repository::open(&config).await.unwrap();
        assert_eq!(repo.store().kind(), "local");
        assert!(dir.path().join("data").join("ideas.json").exists());
    }

    #[tokio::test]
    async fn open_rejects_half_configured_remote() {
        let config = IdeaConfig {
            remote: RemoteConfig {
                url: "libsql://ideas.turso.io".into(),
                auth_token: String::new(),
            },
            ..Default::default()
        };
        let result = Repository::open(&config).await;
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn blank_label_names_are_ignored() {
        let (_dir, repo) = test_local_repo().await;
        let before = repo.list_labels().await.unwrap();

        assert_eq!(repo.add_label("   ").await.unwrap(), before);
        let removal = repo.remove_label("").await.unwrap();
        assert_eq!(removal.labels, before);
        assert!(removal.cleared.is_empty());
    }

    #[tokio::test]
    async fn label_names_are_trimmed() {
        let repo = test_remote_repo().await;
        repo.add_label("  Growth ").await.unwrap();
        assert_eq!(repo.list_labels().await.unwrap(), vec!["Growth"]);
    }

    #[tokio::test]
    async fn append_chat_extends_transcript() {
        let repo = test_remote_repo().await;
        let idea = repo.create_idea(NewIdea::new("x")).await.unwrap();

        repo.append_chat(
            &idea.id,
            vec![ChatEntry::new(ChatRole::User, "first", Utc::now())],
        )
        .await
        .unwrap();
        let updated = repo
            .append_chat(
                &idea.id,
                vec![ChatEntry::new(ChatRole::Assistant, "second", Utc::now())],
            )
            .await
            .unwrap()
            .unwrap();

        let texts: Vec<&str> = updated
            .chat_transcript
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(updated.chat_transcript[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn append_chat_unknown_idea_is_none() {
        let (_dir, repo) = test_local_repo().await;
        let result = repo
            .append_chat(
                "idea-missing",
                vec![ChatEntry::new(ChatRole::User, "hi", Utc::now())],
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_ideas_with_label_filters() {
        let (_dir, repo) = test_local_repo().await;
        let agent = repo
            .create_idea(NewIdea::new("a").with_label("Agent"))
            .await
            .unwrap();
        repo.create_idea(NewIdea::new("b")).await.unwrap();

        let found = repo.list_ideas_with_label("Agent").await.unwrap();
        assert_eq!(found, vec![agent]);
    }
}
