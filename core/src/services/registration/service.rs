//! Registration flow service

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{PendingRegistration, RegistrationFlow, RegistrationStep};
use crate::errors::{AuthError, DomainError, DomainResult};

use super::form::RegistrationForm;
use super::traits::{AuthGateway, RegisterRequest};

/// Configuration for the registration flow
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Sender id shown on verification SMS messages
    pub sender_name: String,
    /// Tenant new accounts are created under
    pub tenant_id: String,
    /// Cooldown between verification-code sends
    pub resend_cooldown: chrono::Duration,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            sender_name: "DataChat".to_string(),
            tenant_id: String::new(),
            resend_cooldown: chrono::Duration::seconds(30),
        }
    }
}

/// Drives the `Form -> AwaitingOtp -> Completed` machine over an
/// [`AuthGateway`].
///
/// Gateway failures never advance the machine: they are stored as a single
/// error string and the flow stays where it was, so the user can retry.
pub struct RegistrationService<G: AuthGateway> {
    gateway: Arc<G>,
    config: RegistrationConfig,
    flow: RegistrationFlow,
    error: Option<String>,
}

impl<G: AuthGateway> RegistrationService<G> {
    pub fn new(gateway: Arc<G>, config: RegistrationConfig) -> Self {
        Self {
            gateway,
            config,
            flow: RegistrationFlow::Form,
            error: None,
        }
    }

    /// Validate the form and dispatch a verification code.
    ///
    /// On success the flow advances to `AwaitingOtp` with the payload
    /// stored; on any failure it stays in `Form`.
    pub async fn submit_form(&mut self, form: &RegistrationForm) -> DomainResult<()> {
        if self.flow.step() != RegistrationStep::Form {
            return Err(DomainError::BusinessRule {
                message: "Registration has already been submitted".to_string(),
            });
        }

        let pending = form.validate().map_err(|errors| {
            let message = errors
                .errors()
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Invalid registration form".to_string());
            DomainError::Validation { message }
        })?;

        match self.send_code(&pending).await {
            Ok(()) => {
                tracing::info!(
                    email = %pending.email,
                    event = "otp_sent",
                    "Verification code dispatched"
                );
                self.flow = RegistrationFlow::AwaitingOtp {
                    pending,
                    otp_verified: false,
                    resend_available_at: Utc::now() + self.config.resend_cooldown,
                };
                self.error = None;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Verify the received code. The step does not change; verification
    /// only unlocks the explicit account-creation action.
    pub async fn verify_otp(&mut self, code: &str) -> DomainResult<bool> {
        let pending = match &self.flow {
            RegistrationFlow::AwaitingOtp { pending, .. } => pending.clone(),
            _ => {
                return Err(DomainError::BusinessRule {
                    message: "No verification is in progress".to_string(),
                })
            }
        };

        match self
            .gateway
            .verify_otp(&pending.full_phone_number(), code)
            .await
        {
            Ok(true) => {
                if let RegistrationFlow::AwaitingOtp { otp_verified, .. } = &mut self.flow {
                    *otp_verified = true;
                }
                self.error = None;
                tracing::info!(event = "otp_verified", "Phone number verified");
                Ok(true)
            }
            Ok(false) => {
                self.error = Some(AuthError::InvalidOtp.to_string());
                Ok(false)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Re-send the verification code to the stored contact info.
    ///
    /// Enforces the resend cooldown locally and resets it on success.
    pub async fn resend_otp(&mut self) -> DomainResult<()> {
        let (pending, resend_available_at) = match &self.flow {
            RegistrationFlow::AwaitingOtp {
                pending,
                resend_available_at,
                ..
            } => (pending.clone(), *resend_available_at),
            _ => {
                return Err(DomainError::BusinessRule {
                    message: "No verification is in progress".to_string(),
                })
            }
        };

        let now = Utc::now();
        if now < resend_available_at {
            let seconds = (resend_available_at - now).num_seconds().max(1);
            return Err(AuthError::ResendCooldown { seconds }.into());
        }

        match self.send_code(&pending).await {
            Ok(()) => {
                if let RegistrationFlow::AwaitingOtp {
                    resend_available_at,
                    ..
                } = &mut self.flow
                {
                    *resend_available_at = Utc::now() + self.config.resend_cooldown;
                }
                self.error = None;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Create the account from the stored payload.
    ///
    /// Only permitted once the code was verified; any other state is
    /// rejected without advancing the machine.
    pub async fn complete_registration(&mut self) -> DomainResult<()> {
        let pending = match &self.flow {
            RegistrationFlow::AwaitingOtp {
                pending,
                otp_verified: true,
                ..
            } => pending.clone(),
            RegistrationFlow::AwaitingOtp { .. } => {
                return Err(AuthError::PhoneNotVerified.into());
            }
            _ => {
                return Err(DomainError::BusinessRule {
                    message: "No verified registration is pending".to_string(),
                })
            }
        };

        let request = RegisterRequest {
            username: pending.username(),
            tenant_id: self.config.tenant_id.clone(),
            email: pending.email.clone(),
            password: pending.password.clone(),
        };

        match self.gateway.register(&request).await {
            Ok(()) => {
                tracing::info!(
                    email = %pending.email,
                    event = "registration_completed",
                    "Account created"
                );
                self.flow = RegistrationFlow::Completed { pending };
                self.error = None;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Back from the OTP step to the form, discarding the pending payload
    pub fn back_to_form(&mut self) {
        if matches!(self.flow, RegistrationFlow::AwaitingOtp { .. }) {
            self.flow = RegistrationFlow::Form;
            self.error = None;
        }
    }

    /// Reset the flow to its initial state
    pub fn reset(&mut self) {
        self.flow = RegistrationFlow::Form;
        self.error = None;
    }

    pub fn step(&self) -> RegistrationStep {
        self.flow.step()
    }

    pub fn flow(&self) -> &RegistrationFlow {
        &self.flow
    }

    pub fn otp_verified(&self) -> bool {
        self.flow.otp_verified()
    }

    pub fn pending(&self) -> Option<&PendingRegistration> {
        self.flow.pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    async fn send_code(&self, pending: &PendingRegistration) -> DomainResult<()> {
        self.gateway
            .send_otp(&pending.full_phone_number(), &self.config.sender_name)
            .await
            .map(|_| ())
    }
}
