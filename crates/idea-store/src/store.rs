//! The storage contract both backends implement.

use std::future::Future;

use idea_core::entities::{Idea, NewIdea};
use serde::Serialize;

use crate::error::StoreError;
use crate::updates::idea::IdeaUpdate;

/// Outcome of removing a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelRemoval {
    /// The full label set after removal, in canonical order.
    pub labels: Vec<String>,
    /// Ids of ideas whose `label` was cleared, in the order they were cleared.
    pub cleared: Vec<String>,
}

/// Entity-level operations over ideas and labels.
///
/// Implemented by [`crate::local::LocalStore`] (JSON documents) and
/// [`crate::remote::RemoteStore`] (libSQL tables). Every operation is atomic
/// only for the single record or label set it touches.
///
/// Labels are always returned sorted by name with duplicates removed.
pub trait IdeaStore {
    /// All ideas, most recently updated first.
    fn list_ideas(&self) -> impl Future<Output = Result<Vec<Idea>, StoreError>> + Send;

    /// `None` when no idea has this id.
    fn get_idea(&self, id: &str) -> impl Future<Output = Result<Option<Idea>, StoreError>> + Send;

    /// Assign an id and timestamps, apply defaults, and persist.
    ///
    /// The title is not checked here; callers validate before creating.
    fn create_idea(&self, new: NewIdea) -> impl Future<Output = Result<Idea, StoreError>> + Send;

    /// Merge `update` over the stored idea and refresh `updated_at`.
    ///
    /// The merge happens in-process: the idea is read, merged, and the full
    /// record written back, so concurrent edits to the same idea can clobber
    /// each other. `None` when no idea has this id.
    fn update_idea(
        &self,
        id: &str,
        update: IdeaUpdate,
    ) -> impl Future<Output = Result<Option<Idea>, StoreError>> + Send;

    /// `true` iff an idea existed and was removed.
    fn delete_idea(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn list_labels(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Add a label; adding an existing name is a no-op. Returns the full set.
    fn add_label(&self, name: &str) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Remove a label and clear it from every idea that references it.
    ///
    /// Removing an unknown name is not an error. The set of referencing ideas
    /// is captured once when the cascade starts. There is no transaction
    /// spanning the label delete and the idea updates: on failure the error
    /// is [`StoreError::CascadeIncomplete`] and earlier updates stay applied.
    fn remove_label(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<LabelRemoval, StoreError>> + Send;
}
