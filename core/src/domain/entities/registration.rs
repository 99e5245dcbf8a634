//! Registration flow state
//!
//! The flow is a sum type rather than a flat record with optional fields:
//! the pending payload only exists in the states that own it, so states
//! like "completed without a verified phone" cannot be constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration data held between OTP dispatch and account creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// National-significant number, digits only
    pub phone_digits: String,
    /// International dial code, with leading `+`
    pub dial_code: String,
}

impl PendingRegistration {
    /// Phone number the SMS endpoints expect: dial code digits followed by
    /// the national number, no separators and no `+`
    pub fn full_phone_number(&self) -> String {
        format!("{}{}", self.dial_code.replace('+', ""), self.phone_digits)
    }

    /// Username derived for the account record
    pub fn username(&self) -> String {
        format!(
            "{}.{}",
            self.first_name.trim().to_lowercase(),
            self.last_name.trim().to_lowercase()
        )
    }
}

/// Where the registration flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStep {
    Form,
    Otp,
    Completed,
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStep::Form => write!(f, "form"),
            RegistrationStep::Otp => write!(f, "otp"),
            RegistrationStep::Completed => write!(f, "completed"),
        }
    }
}

/// Registration state machine.
///
/// Forward transitions: `Form -> AwaitingOtp -> Completed`. The only
/// backward transitions are the explicit back and reset actions.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationFlow {
    /// Collecting form input; nothing sent yet
    Form,
    /// OTP dispatched to the pending phone number
    AwaitingOtp {
        pending: PendingRegistration,
        /// Set once the code was verified; account creation is still a
        /// separate step
        otp_verified: bool,
        /// Earliest instant a resend is allowed
        resend_available_at: DateTime<Utc>,
    },
    /// Account created; the flow instance is finished
    Completed { pending: PendingRegistration },
}

impl RegistrationFlow {
    pub fn step(&self) -> RegistrationStep {
        match self {
            RegistrationFlow::Form => RegistrationStep::Form,
            RegistrationFlow::AwaitingOtp { .. } => RegistrationStep::Otp,
            RegistrationFlow::Completed { .. } => RegistrationStep::Completed,
        }
    }

    /// Pending payload, present outside the initial state
    pub fn pending(&self) -> Option<&PendingRegistration> {
        match self {
            RegistrationFlow::Form => None,
            RegistrationFlow::AwaitingOtp { pending, .. } => Some(pending),
            RegistrationFlow::Completed { pending } => Some(pending),
        }
    }

    pub fn otp_verified(&self) -> bool {
        matches!(
            self,
            RegistrationFlow::AwaitingOtp {
                otp_verified: true,
                ..
            }
        )
    }
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        RegistrationFlow::Form
    }
}
