use idea_store::{IdeaStore, Repository};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LabelCommands;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `ideas label <action>`.
pub async fn handle<S: IdeaStore>(
    action: LabelCommands,
    repo: &Repository<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match action {
        LabelCommands::List => {
            let labels = repo.list_labels().await?;
            output(&labels, flags.format)?;
        }
        LabelCommands::Add { name } => {
            let labels = repo.add_label(&name).await?;
            output(&labels, flags.format)?;
        }
        LabelCommands::Remove { name } => {
            let removal = repo.remove_label(&name).await?;
            if !removal.cleared.is_empty() {
                tracing::info!(label = %name, cleared = removal.cleared.len(), "label cleared from ideas");
            }
            output(&removal, flags.format)?;
        }
    }
    Ok(Outcome::Done)
}
