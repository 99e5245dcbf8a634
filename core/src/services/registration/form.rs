//! Registration form input and its validation gate

use dc_shared::utils::validation::{validators, ValidationErrors};

use crate::domain::entities::PendingRegistration;
use crate::domain::phone::{rule_for, strip_non_digits, validate_phone_number};

/// Minimum password length accepted by the form
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw registration form input, as typed
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Free-form phone input; separators are tolerated
    pub phone_number: String,
    /// ISO-3166 alpha-2 country selection
    pub country_code: String,
    /// Dial code of the selected country, with leading `+`
    pub dial_code: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl RegistrationForm {
    /// Validate every field.
    ///
    /// Nothing is sent anywhere until this passes; failures are reported
    /// per field so they can be shown inline.
    pub fn validate(&self) -> Result<PendingRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&self.first_name) {
            errors.add_error("first_name", "First name is required", "required");
        }
        if !validators::not_empty(&self.last_name) {
            errors.add_error("last_name", "Last name is required", "required");
        }

        if !validators::not_empty(&self.email) {
            errors.add_error("email", "Email is required", "required");
        } else if !validators::is_valid_email(self.email.trim()) {
            errors.add_error("email", "Please enter a valid email address", "format");
        }

        if !validators::not_empty(&self.phone_number) {
            errors.add_error("phone_number", "Phone number is required", "required");
        } else {
            let validation = validate_phone_number(&self.phone_number, &self.country_code);
            if !validation.is_valid {
                errors.add_error(
                    "phone_number",
                    validation
                        .error
                        .unwrap_or_else(|| "Invalid phone number".to_string()),
                    "format",
                );
            }
        }

        if self.password.is_empty() {
            errors.add_error("password", "Password is required", "required");
        } else if self.password.len() < MIN_PASSWORD_LENGTH {
            errors.add_error(
                "password",
                "Password must be at least 8 characters long",
                "length",
            );
        }

        if self.confirm_password.is_empty() {
            errors.add_error(
                "confirm_password",
                "Please confirm your password",
                "required",
            );
        } else if self.confirm_password != self.password {
            errors.add_error("confirm_password", "Passwords do not match", "mismatch");
        }

        if !self.accept_terms {
            errors.add_error(
                "accept_terms",
                "You must accept the terms and conditions",
                "required",
            );
        }

        if errors.has_errors() {
            return Err(errors);
        }

        Ok(PendingRegistration {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone_digits: strip_non_digits(&self.phone_number),
            dial_code: self.resolved_dial_code(),
        })
    }

    // The country table knows the dial code for supported selections; the
    // form's own dial code covers the unsupported-country fallback.
    fn resolved_dial_code(&self) -> String {
        match rule_for(&self.country_code) {
            Some(rule) => rule.dial_code.to_string(),
            None => self.dial_code.clone(),
        }
    }
}
