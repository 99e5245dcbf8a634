//! Registration state machine tests

use std::sync::Arc;

use crate::domain::entities::RegistrationStep;
use crate::errors::{AuthError, DomainError};
use crate::services::registration::form::RegistrationForm;
use crate::services::registration::service::{RegistrationConfig, RegistrationService};

use super::mocks::MockAuthGateway;

fn form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone_number: "(212) 555-1234".to_string(),
        country_code: "US".to_string(),
        dial_code: "+1".to_string(),
        password: "hunter2hunter2".to_string(),
        confirm_password: "hunter2hunter2".to_string(),
        accept_terms: true,
    }
}

fn config() -> RegistrationConfig {
    RegistrationConfig {
        sender_name: "DataChat".to_string(),
        tenant_id: "acme".to_string(),
        resend_cooldown: chrono::Duration::seconds(30),
    }
}

fn service(gateway: Arc<MockAuthGateway>) -> RegistrationService<MockAuthGateway> {
    RegistrationService::new(gateway, config())
}

#[tokio::test]
async fn test_happy_path_two_phase() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));

    service.submit_form(&form()).await.unwrap();
    assert_eq!(service.step(), RegistrationStep::Otp);
    assert!(!service.otp_verified());
    // The code went to the full E.164-style number without separators
    assert_eq!(
        *gateway.sent_to.lock().unwrap(),
        vec!["12125551234".to_string()]
    );

    // Verification does not advance the step by itself
    assert!(service.verify_otp("123456").await.unwrap());
    assert_eq!(service.step(), RegistrationStep::Otp);
    assert!(service.otp_verified());

    // The explicit second action creates the account
    service.complete_registration().await.unwrap();
    assert_eq!(service.step(), RegistrationStep::Completed);

    let registered = gateway.registered.lock().unwrap();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].username, "ada.lovelace");
    assert_eq!(registered[0].tenant_id, "acme");
    assert_eq!(registered[0].email, "ada@example.com");
}

#[tokio::test]
async fn test_invalid_form_makes_no_network_call() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));

    let mut bad = form();
    bad.email = "nope".to_string();
    let error = service.submit_form(&bad).await.unwrap_err();
    assert!(matches!(error, DomainError::Validation { .. }));
    assert_eq!(service.step(), RegistrationStep::Form);
    assert_eq!(gateway.sends(), 0);
}

#[tokio::test]
async fn test_send_failure_stays_in_form() {
    let mut gateway = MockAuthGateway::new();
    gateway.fail_send = true;
    let gateway = Arc::new(gateway);
    let mut service = service(Arc::clone(&gateway));

    assert!(service.submit_form(&form()).await.is_err());
    assert_eq!(service.step(), RegistrationStep::Form);
    assert!(service.pending().is_none());
    assert!(service.error().unwrap().contains("SMS gateway unavailable"));
}

#[tokio::test]
async fn test_wrong_code_stays_unverified() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));
    service.submit_form(&form()).await.unwrap();

    assert!(!service.verify_otp("000000").await.unwrap());
    assert_eq!(service.step(), RegistrationStep::Otp);
    assert!(!service.otp_verified());
    assert_eq!(service.error(), Some("Invalid verification code"));

    // A later correct code still works from the same state
    assert!(service.verify_otp("123456").await.unwrap());
    assert!(service.error().is_none());
}

#[tokio::test]
async fn test_complete_requires_verified_otp() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));

    // From the form state
    let error = service.complete_registration().await.unwrap_err();
    assert!(matches!(error, DomainError::BusinessRule { .. }));
    assert_eq!(service.step(), RegistrationStep::Form);

    // From the OTP step without verification
    service.submit_form(&form()).await.unwrap();
    let error = service.complete_registration().await.unwrap_err();
    assert!(matches!(
        error,
        DomainError::Auth(AuthError::PhoneNotVerified)
    ));
    assert_eq!(service.step(), RegistrationStep::Otp);
    assert_eq!(gateway.registered.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_register_failure_does_not_complete() {
    let mut gateway = MockAuthGateway::new();
    gateway.fail_register = true;
    let gateway = Arc::new(gateway);
    let mut service = service(Arc::clone(&gateway));

    service.submit_form(&form()).await.unwrap();
    service.verify_otp("123456").await.unwrap();

    assert!(service.complete_registration().await.is_err());
    assert_eq!(service.step(), RegistrationStep::Otp);
    assert!(service.error().unwrap().contains("email exists"));
}

#[tokio::test]
async fn test_resend_respects_cooldown() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));
    service.submit_form(&form()).await.unwrap();
    assert_eq!(gateway.sends(), 1);

    // Immediately after the first send the cooldown is still running
    let error = service.resend_otp().await.unwrap_err();
    assert!(matches!(
        error,
        DomainError::Auth(AuthError::ResendCooldown { .. })
    ));
    assert_eq!(gateway.sends(), 1);
}

#[tokio::test]
async fn test_resend_allowed_after_cooldown() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut config = config();
    config.resend_cooldown = chrono::Duration::seconds(0);
    let mut service = RegistrationService::new(Arc::clone(&gateway), config);

    service.submit_form(&form()).await.unwrap();
    service.resend_otp().await.unwrap();
    assert_eq!(gateway.sends(), 2);
    assert!(service.error().is_none());
}

#[tokio::test]
async fn test_back_and_reset_return_to_form() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));
    service.submit_form(&form()).await.unwrap();

    service.back_to_form();
    assert_eq!(service.step(), RegistrationStep::Form);
    assert!(service.pending().is_none());

    // Reset works from any state
    service.submit_form(&form()).await.unwrap();
    service.verify_otp("123456").await.unwrap();
    service.complete_registration().await.unwrap();
    service.reset();
    assert_eq!(service.step(), RegistrationStep::Form);
}

#[tokio::test]
async fn test_submit_twice_rejected() {
    let gateway = Arc::new(MockAuthGateway::new());
    let mut service = service(Arc::clone(&gateway));
    service.submit_form(&form()).await.unwrap();

    let error = service.submit_form(&form()).await.unwrap_err();
    assert!(matches!(error, DomainError::BusinessRule { .. }));
    assert_eq!(gateway.sends(), 1);
}
