//! # idea-store
//!
//! Persistence and consistency layer for ideas and labels.
//!
//! One contract ([`store::IdeaStore`]) with two implementations:
//! - [`local::LocalStore`]: two JSON documents (`ideas.json`, `labels.json`)
//!   in a data directory, fully rewritten on every mutation.
//! - [`remote::RemoteStore`]: `ideas` and `labels` tables in a libSQL
//!   database (Turso or any `sqld`), mapped column-by-column.
//!
//! [`repository::Repository`] is the composition root. It picks the store
//! once from [`idea_config::IdeaConfig`] and is the only thing callers use.
//!
//! Both stores keep labels consistent with ideas reactively: removing a
//! label clears it from every idea that referenced it.

pub mod error;
pub mod helpers;
pub mod local;
pub mod normalize;
pub mod remote;
pub mod repository;
pub mod store;
pub mod updates;

mod test_support;

pub use error::StoreError;
pub use repository::{Backend, Repository};
pub use store::{IdeaStore, LabelRemoval};
pub use updates::idea::{IdeaUpdate, IdeaUpdateBuilder};
