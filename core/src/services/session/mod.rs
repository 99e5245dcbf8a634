//! Session handling: local token decode and sign-in/sign-out
//!
//! The access token is issued and signature-checked by the backend; the
//! client decodes it locally to derive the current identity without a
//! round trip. Removing the stored token is the sign-out contract.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::domain::entities::SessionClaims;
use crate::errors::TokenError;

/// An authenticated identity derived from the stored token
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub claims: SessionClaims,
}

impl Session {
    /// Decode a bearer token into a session.
    ///
    /// Expiry is not rejected here — callers decide what an expired
    /// session means for them via [`Session::is_expired`].
    pub fn from_token(token: &str) -> Result<Self, TokenError> {
        let claims = decode_claims(token)?;
        Ok(Self { claims })
    }

    pub fn is_expired(&self) -> bool {
        self.claims.is_expired()
    }
}

/// Where the bearer token is persisted between runs
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str);
    fn load(&self) -> Option<String>;
    fn clear(&self);
}

/// Bootstraps and tears down the session around a [`TokenStore`]
pub struct SessionManager<S: TokenStore> {
    store: S,
}

impl<S: TokenStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a freshly issued token and return its session
    pub fn sign_in(&self, token: &str) -> Result<Session, TokenError> {
        let session = Session::from_token(token)?;
        self.store.save(token);
        tracing::info!(
            user_id = session.claims.user_id,
            tenant_id = %session.claims.tenant_id,
            event = "session_started",
            "Signed in"
        );
        Ok(session)
    }

    /// Session derived from the stored token, if one decodes.
    ///
    /// An undecodable token is removed so the next call starts clean.
    pub fn current(&self) -> Option<Session> {
        let token = self.store.load()?;
        match Session::from_token(&token) {
            Ok(session) => Some(session),
            Err(_) => {
                self.store.clear();
                None
            }
        }
    }

    /// Remove the stored token
    pub fn sign_out(&self) {
        self.store.clear();
        tracing::info!(event = "session_ended", "Signed out");
    }

    pub fn token(&self) -> Option<String> {
        self.store.load()
    }
}

/// Decode token claims without verifying the signature.
///
/// The client never holds the signing key; trusting the token's integrity
/// is the backend's job on every authenticated request.
pub fn decode_claims(token: &str) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|error| match error.kind() {
            jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(claim) => {
                TokenError::MissingClaim {
                    claim: claim.clone(),
                }
            }
            _ => TokenError::InvalidTokenFormat,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dc_shared::types::{AccountStatus, Role};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::sync::Mutex;

    struct TestTokenStore {
        token: Mutex<Option<String>>,
    }

    impl TestTokenStore {
        fn new() -> Self {
            Self {
                token: Mutex::new(None),
            }
        }
    }

    impl TokenStore for TestTokenStore {
        fn save(&self, token: &str) {
            *self.token.lock().unwrap() = Some(token.to_string());
        }
        fn load(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }
        fn clear(&self) {
            *self.token.lock().unwrap() = None;
        }
    }

    fn claims(expires_in: i64) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: "ada@example.com".to_string(),
            user_id: 7,
            tenant_id: "acme".to_string(),
            role: Role::Admin,
            status: AccountStatus::Active,
            exp: now + expires_in,
            iat: now,
        }
    }

    fn token_for(claims: &SessionClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_roundtrip() {
        let claims = claims(3600);
        let session = Session::from_token(&token_for(&claims)).unwrap();
        assert_eq!(session.claims, claims);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let session = Session::from_token(&token_for(&claims(-60))).unwrap();
        assert!(session.is_expired());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            Session::from_token("not.a.token"),
            Err(TokenError::InvalidTokenFormat)
        ));
    }

    #[test]
    fn test_manager_sign_in_and_out() {
        let manager = SessionManager::new(TestTokenStore::new());
        assert!(manager.current().is_none());

        let token = token_for(&claims(3600));
        let session = manager.sign_in(&token).unwrap();
        assert_eq!(session.claims.user_id, 7);
        assert_eq!(manager.token().as_deref(), Some(token.as_str()));
        assert!(manager.current().is_some());

        manager.sign_out();
        assert!(manager.current().is_none());
        assert!(manager.token().is_none());
    }

    #[test]
    fn test_undecodable_stored_token_is_cleared() {
        let store = TestTokenStore::new();
        store.save("garbage");
        let manager = SessionManager::new(store);
        assert!(manager.current().is_none());
        assert!(manager.token().is_none());
    }
}
