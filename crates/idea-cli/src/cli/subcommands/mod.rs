pub mod idea;
pub mod label;

pub use idea::{IdeaCommands, RoleArg};
pub use label::LabelCommands;
