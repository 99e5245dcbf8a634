//! Admin user-management endpoints
//!
//! Thin typed wrappers over the `/admin` routes. Every call requires a
//! bearer token; a missing token fails before any request is made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use dc_core::errors::{AuthError, DomainError, DomainResult};
use dc_shared::types::{AccountStatus, Role};

use crate::http::ApiClient;

/// A managed user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    #[validate(length(min = 1, message = "Tenant id is required"))]
    pub tenant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Partial update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}

/// Client for the admin user-management routes
pub struct AdminApi {
    client: Arc<ApiClient>,
}

impl AdminApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.require_token().await?;
        self.client
            .get("/admin/users")
            .await
            .map_err(Self::api_error)
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> DomainResult<User> {
        self.require_token().await?;
        request
            .validate()
            .map_err(|errors| DomainError::Validation {
                message: errors.to_string(),
            })?;
        self.client
            .post("/admin/create", request)
            .await
            .map_err(Self::api_error)
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        request: &UpdateUserRequest,
    ) -> DomainResult<User> {
        self.require_token().await?;
        self.client
            .put(&format!("/admin/users/{}", user_id), request)
            .await
            .map_err(Self::api_error)
    }

    /// Delete a user record. Destructive — callers are expected to have
    /// confirmed with the user first.
    pub async fn delete_user(&self, user_id: i64) -> DomainResult<()> {
        self.require_token().await?;
        self.client
            .delete_discard(&format!("/admin/users/{}", user_id))
            .await
            .map_err(Self::api_error)
    }

    async fn require_token(&self) -> DomainResult<()> {
        if self.client.has_token().await {
            Ok(())
        } else {
            Err(AuthError::MissingToken.into())
        }
    }

    fn api_error(error: crate::http::ClientError) -> DomainError {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_deserializes() {
        let json = r#"{
            "id": 3,
            "username": "ada.lovelace",
            "email": "ada@example.com",
            "role": "admin",
            "status": "active",
            "tenant_id": "acme",
            "created_at": "2025-05-01T00:00:00Z",
            "updated_at": "2025-05-02T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.status, AccountStatus::Active);
        assert!(user.avatar_url.is_none());
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateUserRequest {
            username: "ada.lovelace".to_string(),
            email: "not-an-email".to_string(),
            role: Role::User,
            status: AccountStatus::Pending,
            tenant_id: "acme".to_string(),
            password: None,
        };
        assert!(request.validate().is_err());

        let request = CreateUserRequest {
            email: "ada@example.com".to_string(),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_omits_absent_fields() {
        let request = UpdateUserRequest {
            role: Some(Role::Viewer),
            ..UpdateUserRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"role": "viewer"}));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        // Unroutable base URL: if a request were attempted it would error
        // differently than the missing-token rejection we expect.
        let client = Arc::new(ApiClient::new("http://127.0.0.1:0/api"));
        let admin = AdminApi::new(client);
        let error = admin.list_users().await.unwrap_err();
        assert!(matches!(
            error,
            DomainError::Auth(AuthError::MissingToken)
        ));
    }
}
