use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ideas` binary.
#[derive(Debug, Parser)]
#[command(name = "ideas", version, about = "Ideas - capture and label ideas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for the local JSON store (overrides config)
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{IdeaCommands, LabelCommands, RoleArg};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "ideas",
            "--format",
            "raw",
            "--verbose",
            "--data-dir",
            "/tmp/ideas",
            "label",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/ideas"));
        assert!(matches!(
            cli.command,
            Commands::Label {
                action: LabelCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ideas", "idea", "get", "abc", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        let flags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.quiet);
    }

    #[test]
    fn create_splits_tags_on_commas() {
        let cli = Cli::try_parse_from([
            "ideas", "idea", "create", "--title", "Plan", "--tags", "a,b,c",
        ])
        .expect("cli should parse");

        let Commands::Idea {
            action: IdeaCommands::Create { title, tags, status, .. },
        } = cli.command
        else {
            panic!("expected idea create");
        };
        assert_eq!(title, "Plan");
        assert_eq!(tags, Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]));
        assert_eq!(status, None);
    }

    #[test]
    fn create_requires_title() {
        let result = Cli::try_parse_from(["ideas", "idea", "create"]);
        assert!(result.is_err());
    }

    #[test]
    fn update_rejects_tags_with_clear_tags() {
        let result = Cli::try_parse_from([
            "ideas", "idea", "update", "abc", "--tags", "x", "--clear-tags",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn update_accepts_empty_label() {
        let cli = Cli::try_parse_from(["ideas", "idea", "update", "abc", "--label", ""])
            .expect("cli should parse");
        let Commands::Idea {
            action: IdeaCommands::Update { id, label, .. },
        } = cli.command
        else {
            panic!("expected idea update");
        };
        assert_eq!(id, "abc");
        assert_eq!(label.as_deref(), Some(""));
    }

    #[test]
    fn chat_role_defaults_to_user() {
        let cli = Cli::try_parse_from(["ideas", "idea", "chat", "abc", "--text", "hi"])
            .expect("cli should parse");
        let Commands::Idea {
            action: IdeaCommands::Chat { role, text, .. },
        } = cli.command
        else {
            panic!("expected idea chat");
        };
        assert_eq!(role, RoleArg::User);
        assert_eq!(text, "hi");
    }

    #[test]
    fn label_remove_takes_name() {
        let cli = Cli::try_parse_from(["ideas", "label", "remove", "Research"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Label {
                action: LabelCommands::Remove { ref name }
            } if name == "Research"
        ));
    }
}
