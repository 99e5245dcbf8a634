//! DataChat API configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the DataChat backend API
pub const DEFAULT_API_BASE_URL: &str = "https://api.datachat.example/api";

/// Default spacing between result polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Default cooldown before a verification code may be resent
pub const DEFAULT_RESEND_COOLDOWN_SECS: i64 = 30;

/// Default SMS sender id attached to send-OTP requests
pub const DEFAULT_SENDER_NAME: &str = "DataChat";

/// Configuration for talking to the DataChat backend.
///
/// All fields have working defaults; construction sites typically start from
/// `ApiConfig::default()` and override what the environment provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API, without a trailing slash
    pub base_url: String,

    /// Spacing between result polls, in milliseconds
    pub poll_interval_ms: u64,

    /// Seconds a user must wait before requesting a new verification code
    pub resend_cooldown_secs: i64,

    /// Sender id shown on verification SMS messages
    pub sender_name: String,

    /// Tenant the client operates under
    pub tenant_id: Option<String>,
}

impl ApiConfig {
    /// Poll spacing as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Resend cooldown as a chrono `Duration`
    pub fn resend_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.resend_cooldown_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            resend_cooldown_secs: DEFAULT_RESEND_COOLDOWN_SECS,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            tenant_id: None,
        }
    }
}
