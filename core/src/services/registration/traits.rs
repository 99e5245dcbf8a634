//! Gateway trait for the auth endpoints

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;

/// Acknowledgement of a dispatched verification code
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtpDispatch {
    pub otp_id: Option<String>,
    pub message: Option<String>,
}

/// Body of the account-creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub tenant_id: String,
    pub email: String,
    pub password: String,
}

/// Remote auth endpoints the registration and session flows talk to
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Send a verification code via SMS.
    ///
    /// `phone_number` is the dial code digits followed by the national
    /// number, no separators.
    async fn send_otp(&self, phone_number: &str, sender_name: &str) -> DomainResult<OtpDispatch>;

    /// Verify a received code; returns whether the phone is now verified
    async fn verify_otp(&self, phone_number: &str, otp_code: &str) -> DomainResult<bool>;

    /// Create the account
    async fn register(&self, request: &RegisterRequest) -> DomainResult<()>;

    /// Exchange credentials for an access token
    async fn login(&self, email: &str, password: &str) -> DomainResult<String>;
}
