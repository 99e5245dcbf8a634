//! Environment-driven client configuration

use std::env;

use dc_shared::config::{ApiConfig, Environment};

/// Full client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
}

impl ClientConfig {
    /// Build configuration from the process environment.
    ///
    /// Loads `.env` first when present. Recognized variables:
    /// `DATACHAT_API_BASE_URL`, `DATACHAT_TENANT_ID`,
    /// `DATACHAT_SENDER_NAME`, `DATACHAT_POLL_INTERVAL_MS`,
    /// `DATACHAT_RESEND_COOLDOWN_SECS`. Anything unset keeps its default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut api = ApiConfig::default();

        if let Ok(value) = env::var("DATACHAT_API_BASE_URL") {
            api.base_url = value.trim_end_matches('/').to_string();
        }
        if let Ok(value) = env::var("DATACHAT_TENANT_ID") {
            api.tenant_id = Some(value);
        }
        if let Ok(value) = env::var("DATACHAT_SENDER_NAME") {
            api.sender_name = value;
        }
        if let Ok(value) = env::var("DATACHAT_POLL_INTERVAL_MS") {
            if let Ok(millis) = value.parse() {
                api.poll_interval_ms = millis;
            }
        }
        if let Ok(value) = env::var("DATACHAT_RESEND_COOLDOWN_SECS") {
            if let Ok(seconds) = value.parse() {
                api.resend_cooldown_secs = seconds;
            }
        }

        Self { environment, api }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api: ApiConfig::default(),
        }
    }
}
