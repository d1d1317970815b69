//! Frontend configuration

use dashboard_http::config::{ClientConfig, DEFAULT_BASE_URL};

/// Build-time settings for the browser client
pub struct FrontendConfig;

impl FrontendConfig {
    /// API base URL, taken from `DASHBOARD_API_BASE_URL` at compile time
    pub const API_BASE_URL: &'static str = match option_env!("DASHBOARD_API_BASE_URL") {
        Some(url) => url,
        None => DEFAULT_BASE_URL,
    };

    /// Requested token lifetime in minutes
    pub const TOKEN_EXPIRES_IN_MINS: u32 = 30;

    /// Client configuration for the running app
    pub fn client_config() -> ClientConfig {
        ClientConfig {
            token_expires_in_mins: Some(Self::TOKEN_EXPIRES_IN_MINS),
            ..ClientConfig::new(Self::API_BASE_URL)
        }
    }
}
