//! Auth endpoints: OTP dispatch/verification, registration, login

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use dc_core::errors::{AuthError, DomainResult};
use dc_core::services::registration::{AuthGateway, OtpDispatch, RegisterRequest};

use crate::http::ApiClient;

#[derive(Debug, Serialize)]
struct SendOtpRequest<'a> {
    phone_number: &'a str,
    sender_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendOtpResponse {
    #[serde(default)]
    success: bool,
    otp_id: Option<String>,
    message: Option<String>,
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
struct VerifyOtpRequest<'a> {
    phone_number: &'a str,
    otp_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    phone_verified: bool,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// [`AuthGateway`] over the DataChat HTTP API
pub struct HttpAuthGateway {
    client: Arc<ApiClient>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn send_otp(&self, phone_number: &str, sender_name: &str) -> DomainResult<OtpDispatch> {
        let response: SendOtpResponse = self
            .client
            .post(
                "/auth/send-otp",
                &SendOtpRequest {
                    phone_number,
                    sender_name,
                },
            )
            .await
            .map_err(|error| AuthError::OtpSendFailed {
                detail: error.to_string(),
            })?;

        // A 2xx with success=false is still a refusal
        if !response.success {
            return Err(AuthError::OtpSendFailed {
                detail: response
                    .detail
                    .or(response.message)
                    .unwrap_or_else(|| "Failed to send OTP".to_string()),
            }
            .into());
        }

        Ok(OtpDispatch {
            otp_id: response.otp_id,
            message: response.message,
        })
    }

    async fn verify_otp(&self, phone_number: &str, otp_code: &str) -> DomainResult<bool> {
        let response: VerifyOtpResponse = self
            .client
            .post(
                "/auth/verify-otp",
                &VerifyOtpRequest {
                    phone_number,
                    otp_code,
                },
            )
            .await
            .map_err(|error| AuthError::OtpVerifyFailed {
                detail: error.to_string(),
            })?;

        Ok(response.success && response.phone_verified)
    }

    async fn register(&self, request: &RegisterRequest) -> DomainResult<()> {
        self.client
            .post::<serde_json::Value, _>("/auth/register", request)
            .await
            .map(|_| ())
            .map_err(|error| {
                AuthError::RegistrationFailed {
                    detail: error.to_string(),
                }
                .into()
            })
    }

    async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        let response: LoginResponse = self
            .client
            .post("/auth/login", &LoginRequest { email, password })
            .await
            .map_err(|error| AuthError::LoginFailed {
                detail: error.to_string(),
            })?;
        Ok(response.access_token)
    }
}
