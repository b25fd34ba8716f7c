use clap::{Subcommand, ValueEnum};
use idea_core::enums::ChatRole;

/// Chat transcript author accepted on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RoleArg {
    User,
    Assistant,
}

impl From<RoleArg> for ChatRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Self::User,
            RoleArg::Assistant => Self::Assistant,
        }
    }
}

/// Idea commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IdeaCommands {
    /// List ideas, most recently updated first
    List {
        /// Only ideas carrying this label
        #[arg(long)]
        label: Option<String>,
    },
    /// Get an idea by id
    Get {
        /// Idea id
        id: String,
    },
    /// Create an idea
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Defaults to "new"
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        label: Option<String>,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Update fields of an idea; omitted fields are left unchanged
    Update {
        /// Idea id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Pass an empty string to clear the label
        #[arg(long)]
        label: Option<String>,
        /// Comma-separated tags, replacing the current list
        #[arg(long, value_delimiter = ',', conflicts_with = "clear_tags")]
        tags: Option<Vec<String>>,
        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete an idea
    Delete {
        /// Idea id
        id: String,
    },
    /// Append a message to an idea's chat transcript
    Chat {
        /// Idea id
        id: String,
        #[arg(long, value_enum, default_value = "user")]
        role: RoleArg,
        /// Message text
        #[arg(long)]
        text: String,
    },
}
