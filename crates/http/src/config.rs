//! Client configuration

use crate::client::error::ClientError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Durable storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Durable storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default lifetime of cached dashboard data (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Environment variable prefix for native configuration
pub const ENV_PREFIX: &str = "DASHBOARD";

/// API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the remote API
    pub base_url: String,

    /// Request timeout in seconds (native only, unset means transport default)
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request
    pub user_agent: String,

    /// Requested token lifetime passed to the login and refresh endpoints
    pub token_expires_in_mins: Option<u32>,

    /// Lifetime of cached dashboard data in seconds
    pub cache_ttl_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("dashboard-client/", env!("CARGO_PKG_VERSION")).to_string(),
            token_expires_in_mins: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url`, everything else default
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Lifetime of cached dashboard data
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from `DASHBOARD_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ClientError> {
        Self::load(None, environment())
    }

    /// Load configuration from a file, with `DASHBOARD_*` environment
    /// variables taking precedence
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ClientError> {
        Self::load(Some(path.as_ref()), environment())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load(file: Option<&std::path::Path>, env: config::Environment) -> Result<Self, ClientError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        builder
            .add_source(env)
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| ClientError::Configuration(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert!(config.user_agent.starts_with("dashboard-client/"));
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"http://localhost:9000\"\ntimeout_secs = 15\ntoken_expires_in_mins = 1"
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.token_expires_in_mins, Some(1));
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_from_file_missing_file() {
        let result = ClientConfig::from_file("/nonexistent/dashboard.toml");
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Environment {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_env_variables_are_parsed() {
        let env = vars(&[
            ("DASHBOARD_BASE_URL", "http://api.internal:8080"),
            ("DASHBOARD_TIMEOUT_SECS", "30"),
            ("DASHBOARD_CACHE_TTL_SECS", "60"),
            ("OTHER_BASE_URL", "http://ignored"),
        ]);

        let config = ClientConfig::load(None, env).unwrap();
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.token_expires_in_mins, None);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://localhost:9000\"\ntimeout_secs = 15").unwrap();

        let env = vars(&[("DASHBOARD_TIMEOUT_SECS", "5")]);
        let config = ClientConfig::load(Some(file.path()), env).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_unparseable_env_value_is_rejected() {
        let env = vars(&[("DASHBOARD_TIMEOUT_SECS", "soon")]);
        let result = ClientConfig::load(None, env);
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
