use chrono::Utc;
use idea_core::entities::{ChatEntry, NewIdea};
use idea_store::{IdeaStore, IdeaUpdateBuilder, Repository};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IdeaCommands;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `ideas idea <action>`.
pub async fn handle<S: IdeaStore>(
    action: IdeaCommands,
    repo: &Repository<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match action {
        IdeaCommands::List { label } => {
            let ideas = match label {
                Some(label) => repo.list_ideas_with_label(&label).await?,
                None => repo.list_ideas().await?,
            };
            output(&ideas, flags.format)?;
            Ok(Outcome::Done)
        }
        IdeaCommands::Get { id } => {
            let idea = repo.get_idea(&id).await?;
            output(&idea, flags.format)?;
            Ok(Outcome::found(idea.is_some()))
        }
        IdeaCommands::Create {
            title,
            description,
            status,
            label,
            tags,
        } => {
            let new = NewIdea {
                title,
                description,
                status,
                label,
                tags,
                chat_transcript: None,
            };
            new.validate()?;
            let idea = repo.create_idea(new).await?;
            tracing::debug!(id = %idea.id, "idea created");
            output(&idea, flags.format)?;
            Ok(Outcome::Done)
        }
        IdeaCommands::Update {
            id,
            title,
            description,
            status,
            label,
            tags,
            clear_tags,
        } => {
            let mut builder = IdeaUpdateBuilder::new();
            if let Some(title) = title {
                if title.trim().is_empty() {
                    anyhow::bail!("title must not be empty");
                }
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(status) = status {
                builder = builder.status(status);
            }
            if let Some(label) = label {
                builder = builder.label(label);
            }
            if clear_tags {
                builder = builder.tags(Vec::new());
            } else if let Some(tags) = tags {
                builder = builder.tags(tags);
            }

            let update = builder.build();
            if update.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field flag");
            }

            let idea = repo.update_idea(&id, update).await?;
            output(&idea, flags.format)?;
            Ok(Outcome::found(idea.is_some()))
        }
        IdeaCommands::Delete { id } => {
            let deleted = repo.delete_idea(&id).await?;
            output(&serde_json::json!({ "id": id, "deleted": deleted }), flags.format)?;
            Ok(Outcome::found(deleted))
        }
        IdeaCommands::Chat { id, role, text } => {
            let entry = ChatEntry::new(role.into(), text, Utc::now());
            let idea = repo.append_chat(&id, vec![entry]).await?;
            output(&idea, flags.format)?;
            Ok(Outcome::found(idea.is_some()))
        }
    }
}
