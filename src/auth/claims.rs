// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! JWT claims and the request-scoped authenticated identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Payload of an access token issued by [`TokenService`](super::TokenService).
///
/// The token is self-contained: subject id, role, issuance and expiry
/// timestamps. Nothing is persisted server-side, so a token stays valid
/// until `exp` regardless of later state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject - the user's unique id
    pub sub: String,

    /// Role claim embedded at issuance
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Authenticated identity attached to a request by the `Auth` extractor.
///
/// This is the primary type handlers use to know who is calling. It is
/// request-scoped and dropped when the request completes. The role comes
/// from the user record, not the token, so role changes take effect
/// before token expiry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user id (JWT `sub` claim)
    pub user_id: String,

    /// Current role, re-fetched from the user store
    pub role: Role,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user_123".to_string(),
            role,
            expires_at: 1_700_003_600,
        }
    }

    #[test]
    fn admin_passes_all_role_checks() {
        let user = sample_user(Role::Admin);
        assert!(user.is_admin());
        assert!(user.has_role(Role::Admin));
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn user_is_not_admin() {
        let user = sample_user(Role::User);
        assert!(!user.is_admin());
        assert!(!user.has_role(Role::Admin));
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn access_claims_round_trip_json() {
        let claims = AccessClaims {
            sub: "user_123".into(),
            role: Role::User,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains(r#""role":"user""#));

        let back: AccessClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, "user_123");
        assert_eq!(back.role, Role::User);
        assert_eq!(back.exp, claims.exp);
    }
}
