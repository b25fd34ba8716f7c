use idea_store::{IdeaStore, Repository};

use crate::cli::{Commands, GlobalFlags};
use crate::commands::Outcome;

/// Dispatch a parsed command to its handler.
pub async fn dispatch<S: IdeaStore>(
    command: Commands,
    repo: &Repository<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match command {
        Commands::Idea { action } => super::idea::handle(action, repo, flags).await,
        Commands::Label { action } => super::label::handle(action, repo, flags).await,
    }
}
