//! Remote store: `ideas` and `labels` tables in a libSQL database.
//!
//! Production use connects to a remote database (`libsql://` / `https://`)
//! with [`RemoteStore::connect`]. [`RemoteStore::open_local`] opens an
//! embedded libSQL file or `":memory:"` with the same schema and SQL, which
//! is what the tests run against.
//!
//! Query and network failures propagate unchanged as `StoreError::LibSql`;
//! this layer does not retry.

mod mapping;
mod migrations;

pub use mapping::{IDEA_COLS, IdeaRow, record_to_storage, storage_to_record};

use chrono::Utc;
use libsql::Builder;

use idea_core::entities::{Idea, NewIdea};
use idea_core::ids::{PREFIX_IDEA, generate_id};

use crate::error::StoreError;
use crate::store::{IdeaStore, LabelRemoval};
use crate::updates::idea::{IdeaUpdate, IdeaUpdateBuilder};

/// Handle to the relational backend.
///
/// Holds one connection for the life of the store; `":memory:"` databases
/// exist only on that connection.
pub struct RemoteStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RemoteStore {
    /// Connect to a remote libSQL database.
    ///
    /// Ensures the schema exists on first use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection cannot be built or the schema
    /// statements fail.
    pub async fn connect(url: &str, auth_token: &str) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        tracing::debug!(url, "connected to remote idea store");
        Ok(store)
    }

    /// Open an embedded libSQL database at `path` (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    async fn query_ideas(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Idea>, StoreError> {
        let mut rows = self.conn.query(sql, params).await?;
        let mut ideas = Vec::new();
        while let Some(row) = rows.next().await? {
            ideas.push(storage_to_record(&IdeaRow::from_row(&row)?));
        }
        Ok(ideas)
    }
}

impl IdeaStore for RemoteStore {
    async fn list_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        let ideas = self
            .query_ideas(
                &format!("SELECT {IDEA_COLS} FROM ideas ORDER BY updated_at DESC"),
                (),
            )
            .await?;
        tracing::debug!(count = ideas.len(), "listed ideas from remote store");
        Ok(ideas)
    }

    async fn get_idea(&self, id: &str) -> Result<Option<Idea>, StoreError> {
        let mut ideas = self
            .query_ideas(&format!("SELECT {IDEA_COLS} FROM ideas WHERE id = ?1"), [id])
            .await?;
        Ok(ideas.pop())
    }

    async fn create_idea(&self, new: NewIdea) -> Result<Idea, StoreError> {
        let idea = Idea::from_new(generate_id(PREFIX_IDEA)?, new, Utc::now());
        let row = record_to_storage(&idea)?;

        let mut inserted = self
            .query_ideas(
                &format!(
                    "INSERT INTO ideas ({IDEA_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                     RETURNING {IDEA_COLS}"
                ),
                libsql::params_from_iter(row.into_params()),
            )
            .await?;
        let created = inserted.pop().ok_or(StoreError::NoResult)?;

        tracing::debug!(id = %created.id, "created idea in remote store");
        Ok(created)
    }

    async fn update_idea(&self, id: &str, update: IdeaUpdate) -> Result<Option<Idea>, StoreError> {
        let Some(existing) = self.get_idea(id).await? else {
            tracing::debug!(id, "update of unknown idea");
            return Ok(None);
        };

        let merged = update.merge(&existing, Utc::now());
        let row = record_to_storage(&merged)?;

        let mut updated = self
            .query_ideas(
                &format!(
                    "UPDATE ideas SET title = ?2, description = ?3, status = ?4, label = ?5,
                         tags = ?6, attachments = ?7, chat_history = ?8,
                         created_at = ?9, updated_at = ?10
                     WHERE id = ?1
                     RETURNING {IDEA_COLS}"
                ),
                libsql::params_from_iter(row.into_params()),
            )
            .await?;

        tracing::debug!(id, "updated idea in remote store");
        Ok(updated.pop())
    }

    async fn delete_idea(&self, id: &str) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM ideas WHERE id = ?1", [id])
            .await?;
        tracing::debug!(id, affected, "deleted idea from remote store");
        Ok(affected > 0)
    }

    async fn list_labels(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT name FROM labels ORDER BY name", ())
            .await?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next().await? {
            labels.push(row.get::<String>(0)?);
        }
        Ok(labels)
    }

    async fn add_label(&self, name: &str) -> Result<Vec<String>, StoreError> {
        self.conn
            .execute(
                "INSERT INTO labels (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
                [name],
            )
            .await?;
        tracing::debug!(name, "added label to remote store");
        self.list_labels().await
    }

    async fn remove_label(&self, name: &str) -> Result<LabelRemoval, StoreError> {
        // Unlabeled ideas carry "", which names no label.
        if name.is_empty() {
            let labels = self.list_labels().await?;
            return Ok(LabelRemoval { labels, cleared: Vec::new() });
        }

        self.conn
            .execute("DELETE FROM labels WHERE name = ?1", [name])
            .await?;

        // Snapshot of referencing ideas, taken once before any update.
        let impacted: Vec<String> = self
            .list_ideas()
            .await?
            .into_iter()
            .filter(|idea| idea.label == name)
            .map(|idea| idea.id)
            .collect();

        let mut cleared = Vec::with_capacity(impacted.len());
        for id in impacted {
            let clear = IdeaUpdateBuilder::new().label("").build();
            match self.update_idea(&id, clear).await {
                Ok(Some(_)) => cleared.push(id),
                // Deleted since the snapshot; nothing left to clear.
                Ok(None) => {}
                Err(source) => {
                    tracing::warn!(
                        name,
                        id = %id,
                        cleared = cleared.len(),
                        error = %source,
                        "label cascade stopped partway"
                    );
                    return Err(StoreError::CascadeIncomplete {
                        label: name.to_string(),
                        cleared,
                        source: Box::new(source),
                    });
                }
            }
        }

        tracing::debug!(name, cleared = cleared.len(), "removed label from remote store");
        let labels = self.list_labels().await?;
        Ok(LabelRemoval { labels, cleared })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_remote_store;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let store = test_remote_store().await;
        for table in ["ideas", "labels"] {
            let mut rows = store
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "table '{table}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let store = test_remote_store().await;
        store.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn create_returns_inserted_row() {
        let store = test_remote_store().await;
        let idea = store
            .create_idea(NewIdea::new("Ship v2").with_tags(vec!["x".into()]))
            .await
            .unwrap();

        assert!(idea.id.starts_with("idea-"));
        assert_eq!(idea.tags, vec!["x"]);
        assert_eq!(idea.created_at, idea.updated_at);

        let fetched = store.get_idea(&idea.id).await.unwrap().unwrap();
        assert_eq!(fetched, idea);
    }

    #[tokio::test]
    async fn null_label_column_reads_as_empty() {
        let store = test_remote_store().await;
        store
            .conn()
            .execute(
                "INSERT INTO ideas (id, title, label, tags, attachments, chat_history, created_at, updated_at)
                 VALUES ('idea-raw', 'raw', NULL, 'oops', '[]', '{}', '2026-01-01 00:00:00', '2026-01-01 00:00:00')",
                (),
            )
            .await
            .unwrap();

        let idea = store.get_idea("idea-raw").await.unwrap().unwrap();
        assert_eq!(idea.label, "");
        assert!(idea.tags.is_empty());
        assert!(idea.chat_transcript.is_empty());
    }

    #[tokio::test]
    async fn bad_timestamp_row_does_not_break_reads() {
        let store = test_remote_store().await;
        let good = store
            .create_idea(NewIdea::new("good").with_label("Agent"))
            .await
            .unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO ideas (id, title, label, created_at, updated_at)
                 VALUES ('idea-bad', 'bad', 'Agent', 'bogus', 'bogus')",
                (),
            )
            .await
            .unwrap();

        let mut ids: Vec<String> = store
            .list_ideas()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        ids.sort();
        let mut expected = vec![good.id.clone(), "idea-bad".to_string()];
        expected.sort();
        assert_eq!(ids, expected);

        let bad = store.get_idea("idea-bad").await.unwrap().unwrap();
        assert_eq!(bad.created_at, chrono::DateTime::<Utc>::UNIX_EPOCH);

        let removal = store.remove_label("Agent").await.unwrap();
        assert_eq!(removal.cleared.len(), 2);
    }

    #[tokio::test]
    async fn empty_label_name_clears_nothing() {
        let store = test_remote_store().await;
        let idea = store.create_idea(NewIdea::new("unlabeled")).await.unwrap();

        let removal = store.remove_label("").await.unwrap();
        assert!(removal.cleared.is_empty());

        let after = store.get_idea(&idea.id).await.unwrap().unwrap();
        assert_eq!(after.updated_at, idea.updated_at);
    }

    #[tokio::test]
    async fn list_orders_by_updated_at_desc() {
        let store = test_remote_store().await;
        let first = store.create_idea(NewIdea::new("first")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create_idea(NewIdea::new("second")).await.unwrap();

        let ids: Vec<String> = store
            .list_ideas()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store
            .update_idea(&first.id, IdeaUpdate::default())
            .await
            .unwrap();
        let top = store.list_ideas().await.unwrap().remove(0);
        assert_eq!(top.id, first.id);
    }

    #[tokio::test]
    async fn labels_sorted_by_name() {
        let store = test_remote_store().await;
        store.add_label("Research").await.unwrap();
        store.add_label("Agent").await.unwrap();
        let labels = store.add_label("Growth").await.unwrap();
        assert_eq!(labels, vec!["Agent", "Growth", "Research"]);
    }

    #[tokio::test]
    async fn cascade_fails_outward_and_reports_progress() {
        let store = test_remote_store().await;
        store.add_label("Growth").await.unwrap();
        store
            .create_idea(NewIdea::new("a").with_label("Growth"))
            .await
            .unwrap();

        // Block every UPDATE so the first clear fails.
        store
            .conn()
            .execute_batch(
                "CREATE TRIGGER block_updates BEFORE UPDATE ON ideas
                 BEGIN SELECT RAISE(ABORT, 'updates blocked'); END;",
            )
            .await
            .unwrap();

        let err = store.remove_label("Growth").await.unwrap_err();
        match err {
            StoreError::CascadeIncomplete { label, cleared, .. } => {
                assert_eq!(label, "Growth");
                assert!(cleared.is_empty());
            }
            other => panic!("expected CascadeIncomplete, got {other:?}"),
        }

        // The label row is gone even though the cascade failed.
        assert!(!store.list_labels().await.unwrap().contains(&"Growth".to_string()));
    }
}
