//! Registration service: form validation and the OTP-gated flow
//!
//! Account creation is two-phase by design: the phone number is verified
//! with a one-time code first, and only a separate, explicit action creates
//! the account from the stored payload.

mod form;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use form::RegistrationForm;
pub use service::{RegistrationConfig, RegistrationService};
pub use traits::{AuthGateway, OtpDispatch, RegisterRequest};
