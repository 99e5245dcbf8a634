//! Error types for authentication, session, and chat operations
//!
//! Transport failures and business rejections are normalized to the same
//! shape once they reach a caller: a variant carrying the server-provided
//! detail where one exists.

use thiserror::Error;

/// Authentication and registration errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to send verification code: {detail}")]
    OtpSendFailed { detail: String },

    #[error("Invalid verification code")]
    InvalidOtp,

    #[error("Failed to verify code: {detail}")]
    OtpVerifyFailed { detail: String },

    #[error("Please wait {seconds} seconds before requesting a new code")]
    ResendCooldown { seconds: i64 },

    #[error("Phone number has not been verified")]
    PhoneNotVerified,

    #[error("Registration failed: {detail}")]
    RegistrationFailed { detail: String },

    #[error("Login failed: {detail}")]
    LoginFailed { detail: String },

    #[error("No authentication token")]
    MissingToken,
}

/// Bearer-token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Chat and query-engine errors
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("No active thread")]
    NoActiveThread,

    #[error("Tenant id is required")]
    MissingTenant,

    #[error("A question is already in flight")]
    Busy,

    #[error("No polling session is active")]
    NoActiveSession,

    #[error("Failed to send question: {detail}")]
    SubmitFailed { detail: String },

    #[error("Failed to get response: {detail}")]
    PollFailed { detail: String },

    #[error("Failed to fetch chat history: {detail}")]
    HistoryFailed { detail: String },

    #[error("Failed to delete thread: {detail}")]
    DeleteFailed { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = AuthError::OtpSendFailed {
            detail: "gateway timeout".to_string(),
        };
        assert!(err.to_string().contains("gateway timeout"));

        let err = ChatError::DeleteFailed {
            detail: "HTTP 500".to_string(),
        };
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_cooldown_message_names_seconds() {
        let err = AuthError::ResendCooldown { seconds: 30 };
        assert!(err.to_string().contains("30 seconds"));
    }
}
