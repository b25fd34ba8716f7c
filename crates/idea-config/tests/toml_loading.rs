//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use idea_config::{BackendChoice, IdeaConfig};

#[test]
fn loads_remote_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
url = "libsql://ideas.turso.io"
auth_token = "remote-token"
"#,
        )?;

        let config: IdeaConfig = Figment::from(Serialized::defaults(IdeaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.remote.url, "libsql://ideas.turso.io");
        assert_eq!(config.remote.auth_token, "remote-token");
        assert!(config.remote.is_configured());
        Ok(())
    });
}

#[test]
fn loads_local_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[local]
data_dir = "/var/lib/ideas"
"#,
        )?;

        let config: IdeaConfig = Figment::from(Serialized::defaults(IdeaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.local.data_dir, "/var/lib/ideas");
        assert!(!config.remote.is_configured());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[local]
data_dir = "from-toml"
"#,
        )?;
        jail.set_env("IDEAS_LOCAL__DATA_DIR", "from-env");

        let config: IdeaConfig = Figment::from(Serialized::defaults(IdeaConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("IDEAS_").split("__"))
            .extract()?;

        assert_eq!(config.local.data_dir, "from-env");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ideas")?;
        jail.create_file(
            ".ideas/config.toml",
            r#"
[local]
data_dir = "project-data"
"#,
        )?;

        let config = IdeaConfig::load().expect("config loads");
        assert_eq!(
            config.backend().expect("backend"),
            BackendChoice::Local {
                data_dir: "project-data".into()
            }
        );
        Ok(())
    });
}

#[test]
fn missing_toml_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config: IdeaConfig = Figment::from(Serialized::defaults(IdeaConfig::default()))
            .merge(Toml::file("nonexistent.toml"))
            .extract()?;

        assert_eq!(config.local.data_dir, "data");
        assert!(config.remote.url.is_empty());
        Ok(())
    });
}
