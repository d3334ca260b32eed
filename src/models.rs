// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! # API Data Models
//!
//! Domain records and the request/response structures used by the REST
//! API. All types derive `Serialize`, `Deserialize`, and `ToSchema` for
//! automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: accounts with email credentials or a federated identity
//! - **Recipes**: per-user owned records
//! - **Auth payloads**: register/login requests and the token response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// User Models
// =============================================================================

/// A user account.
///
/// `password_hash` is present only for password-based accounts (federated
/// accounts carry `None`) and is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct User {
    /// Unique identifier (UUID).
    pub id: String,
    /// Email address, globally unique.
    pub email: String,
    /// Argon2 PHC hash of the password. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Authorization role. Defaults to `user`; not self-updatable.
    pub role: Role,
    /// URL of the profile picture in the blob store, if uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Request to register a new password-based account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Email address (must be unique).
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to update the caller's own profile.
///
/// Deliberately has no role field: the self-update path cannot escalate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// New email address (must remain unique).
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
}

/// Successful authentication response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessTokenResponse {
    /// Opaque bearer credential for subsequent requests.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

// =============================================================================
// Recipe Models
// =============================================================================

/// A recipe record owned by exactly one user.
///
/// Ownership is set from the authenticated identity at creation and is
/// immutable afterwards; there is no transfer operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Recipe {
    /// Unique identifier (UUID).
    pub id: String,
    /// Id of the owning user.
    pub owner_id: String,
    /// Recipe title.
    pub title: String,
    /// Category, e.g. "dessert".
    pub category: String,
    /// Ingredient list.
    pub ingredients: Vec<String>,
    /// Preparation instructions.
    pub instructions: String,
    /// When the recipe was created.
    pub created_at: DateTime<Utc>,
}

/// Request to create a recipe. The owner is the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
}

/// Request to update a recipe. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serialization_never_leaks_password_hash() {
        let user = User {
            id: "u1".into(),
            email: "a@x.com".into(),
            password_hash: Some("$argon2id$v=19$secret".into()),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: Role::User,
            avatar_url: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains(r#""email":"a@x.com""#));
    }

    #[test]
    fn access_token_response_uses_camel_case_key() {
        let response = AccessTokenResponse {
            access_token: "abc".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"accessToken":"abc"}"#);
    }

    #[test]
    fn update_profile_request_has_no_role_field() {
        // A body trying to smuggle a role simply parses with it ignored.
        let parsed: UpdateProfileRequest =
            serde_json::from_str(r#"{"first_name":"Eve","role":"admin"}"#).unwrap();
        assert_eq!(parsed.first_name.as_deref(), Some("Eve"));
    }
}
