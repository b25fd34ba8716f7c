//! Schema setup for the remote store.
//!
//! Embeds the SQL migration files at compile time and executes them on open.
//! All statements use `IF NOT EXISTS` for idempotent re-running against a
//! database that already has the tables.

use crate::error::StoreError;
use crate::remote::RemoteStore;

/// `ideas` and `labels` tables plus the ordering and cascade indexes.
const MIGRATION_001: &str = include_str!("../../migrations/001_initial.sql");

impl RemoteStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
