//! Local JSON document store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default directory holding `ideas.json` and `labels.json`.
fn default_data_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalConfig {
    /// Writable directory for the two JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl LocalConfig {
    #[must_use]
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
