// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! User endpoints: registration, login, profile, avatar.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    models::{
        AccessTokenResponse, LoginRequest, Recipe, RegisterRequest, UpdateProfileRequest, User,
    },
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

fn validate_email(email: &str) -> Result<(), ApiError> {
    // Real validation happens when mail is sent; this catches typos.
    if email.contains('@') && !email.starts_with('@') && !email.ends_with('@') {
        Ok(())
    } else {
        Err(ApiError::bad_request("A valid email address is required"))
    }
}

fn issue_token(state: &AppState, user: &User) -> Result<AccessTokenResponse, ApiError> {
    let access_token = state
        .tokens
        .issue(&user.id, user.role)
        .map_err(|_| ApiError::internal())?;
    Ok(AccessTokenResponse { access_token })
}

/// Register a new account and return an access token.
#[utoipa::path(
    post,
    path = "/v1/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccessTokenResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccessTokenResponse>), ApiError> {
    validate_email(&request.email)?;
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = state.users.write().await.create_with_password(request)?;
    tracing::info!(user_id = %user.id, "registered user");

    let response = issue_token(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password.
///
/// Unknown email and wrong password produce the same 401 body.
#[utoipa::path(
    post,
    path = "/v1/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AccessTokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    // Clone out of the read lock; Argon2 verification is CPU-bound and
    // must not hold the repository lock.
    let user = state
        .users
        .read()
        .await
        .find_by_email(&request.email)
        .cloned();

    let verified = user.as_ref().is_some_and(|user| {
        user.password_hash
            .as_deref()
            .is_some_and(|hash| crate::auth::password::verify_password(&request.password, hash))
    });

    match (user, verified) {
        (Some(user), true) => Ok(Json(issue_token(&state, &user)?)),
        _ => Err(ApiError::invalid_credentials()),
    }
}

/// Get the current authenticated user's record.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let record = state
        .users
        .read()
        .await
        .find_by_id(&user.user_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(record))
}

/// Update the current user's profile. The role field does not exist on
/// the request, so this path cannot change authorization.
#[utoipa::path(
    put,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user record", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already in use"),
    )
)]
pub async fn update_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    let updated = state
        .users
        .write()
        .await
        .update_profile(&user.user_id, request)?;
    Ok(Json(updated))
}

/// Upload a profile picture.
///
/// Expects a multipart body with an `avatar` field. The bytes go to the
/// blob store; only the returned URL is persisted on the user.
#[utoipa::path(
    post,
    path = "/v1/users/me/avatar",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Avatar stored, updated user returned", body = User),
        (status = 400, description = "Missing or empty avatar field"),
        (status = 502, description = "Blob store unavailable"),
    )
)]
pub async fn upload_avatar(
    Auth(user): Auth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("Malformed multipart body"))?;
        upload = Some((content_type, bytes.to_vec()));
        break;
    }

    let Some((content_type, bytes)) = upload else {
        return Err(ApiError::bad_request("An 'avatar' file field is required"));
    };
    if bytes.is_empty() {
        return Err(ApiError::bad_request("Avatar upload is empty"));
    }

    let url = state
        .avatars
        .store(&user.user_id, &content_type, bytes)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "avatar store failed");
            ApiError::upstream("Avatar storage is unavailable")
        })?;

    let updated = state.users.write().await.set_avatar(&user.user_id, url)?;
    Ok((StatusCode::CREATED, Json(updated)))
}

/// List the caller's recipes.
#[utoipa::path(
    get,
    path = "/v1/users/me/recipes",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [Recipe]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn my_recipes(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.recipes.read().await.list_by_owner(&user.user_id);
    Ok(Json(recipes))
}

/// List every user. Admin only.
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an admin"),
    )
)]
pub async fn list_users(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.read().await.list()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        }
    }

    #[tokio::test]
    async fn register_returns_created_and_usable_token() {
        let state = AppState::default();

        let (status, Json(response)) = register(
            State(state.clone()),
            Json(register_request("a@x.com", "long enough password")),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        let claims = state.tokens.verify(&response.access_token).unwrap();
        let users = state.users.read().await;
        assert_eq!(users.find_by_id(&claims.sub).unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn register_rejects_bad_email_and_short_password() {
        let state = AppState::default();

        let err = register(
            State(state.clone()),
            Json(register_request("not-an-email", "long enough password")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = register(State(state), Json(register_request("a@x.com", "short")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let state = AppState::default();
        register(
            State(state.clone()),
            Json(register_request("a@x.com", "long enough password")),
        )
        .await
        .unwrap();

        let err = register(
            State(state),
            Json(register_request("a@x.com", "another password")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_round_trip_yields_matching_claims() {
        let state = AppState::default();
        register(
            State(state.clone()),
            Json(register_request("a@x.com", "correct horse battery")),
        )
        .await
        .unwrap();

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".into(),
                password: "correct horse battery".into(),
            }),
        )
        .await
        .expect("login succeeds");

        let claims = state.tokens.verify(&response.access_token).unwrap();
        let users = state.users.read().await;
        let user = users.find_by_email("a@x.com").unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, user.role);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = AppState::default();
        register(
            State(state.clone()),
            Json(register_request("a@x.com", "correct horse battery")),
        )
        .await
        .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@x.com".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();

        let unknown_email = login(
            State(state),
            Json(LoginRequest {
                email: "nobody@x.com".into(),
                password: "whatever".into(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.message, unknown_email.message);
    }
}
