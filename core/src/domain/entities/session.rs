//! Session identity derived from the bearer token

use chrono::Utc;
use dc_shared::types::{AccountStatus, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modules a tenant role may grant query access to, in scope order
pub const PERMISSION_MODULES: [&str; 4] = ["TMS", "CRM", "FMS", "WMS"];

/// Claims encoded in the access token.
///
/// The token is issued and signature-checked server-side; the client only
/// decodes it to derive the current identity without a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account email
    pub sub: String,
    pub user_id: i64,
    pub tenant_id: String,
    pub role: Role,
    pub status: AccountStatus,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
}

impl SessionClaims {
    /// Whether the token's expiry has passed
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Per-module role assignment for a tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRole {
    #[serde(default)]
    pub role_id: Option<String>,
}

/// Module-role map attached to a tenant account
pub type ModuleRoles = HashMap<String, ModuleRole>;

/// Permission scope string sent with query submissions: the modules the
/// tenant role grants, joined with ", ". `None` when nothing is granted.
pub fn permission_scope(roles: &ModuleRoles) -> Option<String> {
    let granted: Vec<&str> = PERMISSION_MODULES
        .iter()
        .copied()
        .filter(|module| {
            roles
                .get(*module)
                .map(|r| r.role_id.is_some())
                .unwrap_or(false)
        })
        .collect();

    if granted.is_empty() {
        None
    } else {
        Some(granted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut claims = SessionClaims {
            sub: "ada@example.com".to_string(),
            user_id: 1,
            tenant_id: "acme".to_string(),
            role: Role::User,
            status: AccountStatus::Active,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        };
        assert!(!claims.is_expired());

        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_permission_scope_joins_granted_modules() {
        let mut roles = ModuleRoles::new();
        roles.insert(
            "TMS".to_string(),
            ModuleRole {
                role_id: Some("r1".to_string()),
            },
        );
        roles.insert(
            "FMS".to_string(),
            ModuleRole {
                role_id: Some("r2".to_string()),
            },
        );
        roles.insert("CRM".to_string(), ModuleRole { role_id: None });

        assert_eq!(permission_scope(&roles).as_deref(), Some("TMS, FMS"));
    }

    #[test]
    fn test_permission_scope_empty_when_nothing_granted() {
        assert_eq!(permission_scope(&ModuleRoles::new()), None);
    }
}
