// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! `Auth` verifies the bearer token, then re-fetches the user record by
//! id. The role attached to the request therefore always reflects the
//! store, not the issuance-time claim: demoting an admin takes effect
//! on their next request, not at token expiry.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_recipes(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<Recipe>>, ApiError> {
///     // user.user_id / user.role are resolved and current
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Tests (and any future middleware) may pre-attach the identity.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let claims = state.tokens.verify(token)?;

        // Re-fetch: the subject must still exist, and its stored role
        // wins over the role claim baked into the token.
        let users = state.users.read().await;
        let user = users
            .find_by_id(&claims.sub)
            .ok_or(AuthError::UnknownIdentity)?;

        Ok(Auth(AuthenticatedUser {
            user_id: user.id.clone(),
            role: user.role,
            expires_at: claims.exp,
        }))
    }
}

/// Extractor that requires the admin role.
///
/// Composes on [`Auth`]: authentication failures stay 401, a valid
/// non-admin identity gets 403.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(user))
    }
}

/// Optional authentication extractor.
///
/// For endpoints usable both anonymously and authenticated: absence of
/// a token (or a bad one) yields `None` instead of rejecting.
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(user)) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::models::RegisterRequest;
    use axum::http::Request;

    async fn seeded_state() -> (AppState, String, String) {
        let state = AppState::default();
        let user = state
            .users
            .write()
            .await
            .create_with_password(RegisterRequest {
                email: "a@x.com".into(),
                password: "correct horse".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
            })
            .unwrap();
        let token = state.tokens.issue(&user.id, user.role).unwrap();
        (state, user.id, token)
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_requires_header() {
        let (state, _, _) = seeded_state().await;
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_rejects_non_bearer_scheme() {
        let (state, _, _) = seeded_state().await;
        let mut parts = parts_with_header(Some("Basic dXNlcjpwdw==".into()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_resolves_identity_from_valid_token() {
        let (state, user_id, token) = seeded_state().await;
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn auth_rejects_token_for_deleted_subject() {
        let (state, _, _) = seeded_state().await;
        // A well-signed token whose subject was never created.
        let token = state.tokens.issue("ghost", Role::User).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UnknownIdentity)));
    }

    #[tokio::test]
    async fn auth_uses_stored_role_not_token_claim() {
        let (state, user_id, token) = seeded_state().await;
        state
            .users
            .write()
            .await
            .set_role(&user_id, Role::Admin)
            .unwrap();

        // Token still says "user"; the request sees the current role.
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));
        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn admin_only_rejects_non_admin() {
        let (state, _, token) = seeded_state().await;
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn admin_only_admits_admin() {
        let (state, user_id, token) = seeded_state().await;
        state
            .users
            .write()
            .await
            .set_role(&user_id, Role::Admin)
            .unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn optional_auth_is_none_without_token() {
        let (state, _, _) = seeded_state().await;
        let mut parts = parts_with_header(None);

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn optional_auth_resolves_with_token() {
        let (state, user_id, token) = seeded_state().await;
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(user.unwrap().user_id, user_id);
    }
}
