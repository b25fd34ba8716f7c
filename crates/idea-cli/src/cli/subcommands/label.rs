use clap::Subcommand;

/// Label commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LabelCommands {
    /// List all labels
    List,
    /// Add a label
    Add {
        /// Label name
        name: String,
    },
    /// Remove a label and clear it from every idea using it
    Remove {
        /// Label name
        name: String,
    },
}
