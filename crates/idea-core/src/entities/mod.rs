//! Entity structs for the idea tracker.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. Field names serialize as camelCase, the
//! shape stored in the local JSON documents.

mod chat;
mod idea;

pub use chat::ChatEntry;
pub use idea::{DEFAULT_STATUS, Idea, NewIdea};
