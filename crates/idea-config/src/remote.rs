//! Remote (libSQL / Turso) store configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Database URL (e.g., `libsql://ideas-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Database auth token.
    #[serde(default)]
    pub auth_token: String,
}

impl RemoteConfig {
    /// Check if both connection credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// True when exactly one of URL / token is set.
    pub fn is_partial(&self) -> bool {
        self.url.is_empty() != self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = RemoteConfig::default();
        assert!(!config.is_configured());
        assert!(!config.is_partial());
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = RemoteConfig {
            url: "libsql://ideas.turso.io".into(),
            auth_token: "token123".into(),
        };
        assert!(config.is_configured());
        assert!(!config.is_partial());
    }

    #[test]
    fn url_without_token_is_partial() {
        let config = RemoteConfig {
            url: "libsql://ideas.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
        assert!(config.is_partial());
    }
}
