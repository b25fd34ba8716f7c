use idea_config::IdeaConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<IdeaConfig> {
    let mut config = IdeaConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut IdeaConfig, flags: &GlobalFlags) {
    if let Some(dir) = &flags.data_dir {
        tracing::debug!(data_dir = %dir, "data dir overridden on the command line");
        config.local.data_dir.clone_from(dir);
    }
}
