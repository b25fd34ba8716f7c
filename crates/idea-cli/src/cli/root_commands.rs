use clap::Subcommand;

use crate::cli::subcommands::{IdeaCommands, LabelCommands};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Idea management.
    Idea {
        #[command(subcommand)]
        action: IdeaCommands,
    },
    /// Label management.
    Label {
        #[command(subcommand)]
        action: LabelCommands,
    },
}
