//! # idea-config
//!
//! Layered configuration loading for the idea tracker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IDEAS_` prefix, `__` as separator)
//! 2. Project-level `.ideas/config.toml`
//! 3. User-level `~/.config/ideas/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `IDEAS_REMOTE__URL` -> `remote.url`,
//! `IDEAS_LOCAL__DATA_DIR` -> `local.data_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use idea_config::{BackendChoice, IdeaConfig};
//!
//! let config = IdeaConfig::load_with_dotenv().expect("config");
//! match config.backend().expect("backend") {
//!     BackendChoice::Remote { url, .. } => println!("remote store at {url}"),
//!     BackendChoice::Local { data_dir } => println!("local store in {}", data_dir.display()),
//! }
//! ```

mod error;
mod local;
mod remote;

pub use error::ConfigError;
pub use local::LocalConfig;
pub use remote::RemoteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdeaConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

/// Which store backs the repository for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    Local { data_dir: PathBuf },
    Remote { url: String, auth_token: String },
}

impl IdeaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory (and its parents) before
    /// building the figment. Missing `.env` files are ignored.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ideas/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("IDEAS_").split("__"));

        figment
    }

    /// Decide which store to open.
    ///
    /// Remote credentials select the remote store; no credentials select the
    /// local store. Half-configured credentials are an error rather than a
    /// silent downgrade to local files.
    pub fn backend(&self) -> Result<BackendChoice, ConfigError> {
        if self.remote.is_partial() {
            let missing = if self.remote.url.is_empty() {
                "remote.url"
            } else {
                "remote.auth_token"
            };
            return Err(ConfigError::InvalidValue {
                field: missing.to_string(),
                reason: "remote store needs both url and auth_token".to_string(),
            });
        }

        if self.remote.is_configured() {
            return Ok(BackendChoice::Remote {
                url: self.remote.url.clone(),
                auth_token: self.remote.auth_token.clone(),
            });
        }

        if self.local.data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "local.data_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(BackendChoice::Local {
            data_dir: self.local.data_dir_path(),
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ideas").join("config.toml"))
    }
}
