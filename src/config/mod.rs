//! Configuration (layered: explicit setters > env > defaults).

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.astralform.dev";
pub const DEFAULT_DOCS_URL: &str = "https://astralform.mintlify.app";
pub const DEFAULT_DOCS_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

const CREDENTIALS_FILE: &str = "credentials.json";

/// Runtime configuration for the Astralform MCP server.
///
/// Built once at startup and handed to the gateway and clients; nothing
/// below `main` reads the environment directly.
///
/// # Example
/// ```no_run
/// use astralform_mcp::config::AstralformConfig;
///
/// let config = AstralformConfig::default().with_api_url("http://localhost:8000");
/// assert_eq!(config.api_url(), "http://localhost:8000");
/// ```
#[derive(Debug, Clone)]
pub struct AstralformConfig {
    api_url: String,
    docs_url: String,
    config_dir: PathBuf,
    docs_cache_ttl: Duration,
}

impl Default for AstralformConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            config_dir: default_config_dir(),
            docs_cache_ttl: DEFAULT_DOCS_CACHE_TTL,
        }
    }
}

impl AstralformConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// - `ASTRALFORM_API_URL`: dashboard API base URL
    /// - `ASTRALFORM_DOCS_URL`: documentation site base URL
    /// - `ASTRALFORM_CONFIG_DIR`: directory holding `credentials.json`
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Some(url) = non_empty_env("ASTRALFORM_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = non_empty_env("ASTRALFORM_DOCS_URL") {
            config.docs_url = url;
        }
        if let Some(dir) = non_empty_env("ASTRALFORM_CONFIG_DIR") {
            config.config_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = url.into();
        self
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_docs_cache_ttl(mut self, ttl: Duration) -> Self {
        self.docs_cache_ttl = ttl;
        self
    }

    /// API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Docs base URL without a trailing slash.
    pub fn docs_url(&self) -> &str {
        self.docs_url.trim_end_matches('/')
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join(CREDENTIALS_FILE)
    }

    pub fn docs_cache_ttl(&self) -> Duration {
        self.docs_cache_ttl
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn default_config_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".astralform"))
        .unwrap_or_else(|| PathBuf::from(".astralform"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = AstralformConfig::default();
        assert_eq!(config.api_url(), "https://api.astralform.dev");
        assert_eq!(config.docs_url(), "https://astralform.mintlify.app");
        assert_eq!(config.docs_cache_ttl(), Duration::from_secs(300));
        assert!(config.config_dir().ends_with(".astralform"));
    }

    #[test]
    fn api_url_strips_trailing_slash() {
        let config = AstralformConfig::default().with_api_url("http://127.0.0.1:9000/");
        assert_eq!(config.api_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn credentials_path_lives_in_config_dir() {
        let config = AstralformConfig::default().with_config_dir("/tmp/astral-test");
        assert_eq!(
            config.credentials_path(),
            PathBuf::from("/tmp/astral-test/credentials.json")
        );
    }
}
