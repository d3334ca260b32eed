// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Google federated login routes.
//!
//! `/users/google/login` sends the browser to the provider;
//! `/users/google/callback` consumes the code the provider sends back,
//! resolves it to a local account through the federated bridge, and
//! redirects to the frontend with the issued token. A user abandoning
//! the redirect never reaches the callback; nothing is created.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{auth::federated, error::ApiError, state::AppState};

#[derive(Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by Google.
    pub code: String,
}

fn google_client(state: &AppState) -> Result<&crate::providers::GoogleClient, ApiError> {
    state.google.as_deref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Google login is not configured",
        )
    })
}

/// Start the Google login handshake.
#[utoipa::path(
    get,
    path = "/v1/users/google/login",
    tag = "Users",
    responses(
        (status = 307, description = "Redirect to the Google authorize URL"),
        (status = 503, description = "Google login is not configured"),
    )
)]
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let client = google_client(&state)?;
    let url = client
        .authorize_url(&Uuid::new_v4().to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "failed to build authorize URL");
            ApiError::internal()
        })?;
    Ok(Redirect::temporary(&url))
}

/// Complete the Google login handshake.
#[utoipa::path(
    get,
    path = "/v1/users/google/callback",
    params(CallbackQuery),
    tag = "Users",
    responses(
        (status = 303, description = "Redirect to the frontend with the access token"),
        (status = 502, description = "Provider exchange failed"),
        (status = 503, description = "Google login is not configured"),
    )
)]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let client = google_client(&state)?;

    let profile = client.exchange_code(&query.code).await.map_err(|e| {
        tracing::warn!(error = %e, "Google code exchange failed");
        ApiError::upstream("Identity provider exchange failed")
    })?;

    let token = federated::exchange_profile(&state, profile)
        .await
        .map_err(|_| ApiError::internal())?;

    Ok(Redirect::to(&client.frontend_redirect(&token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_answer_service_unavailable_when_unconfigured() {
        let state = AppState::default();
        assert!(state.google.is_none());

        let err = google_login(State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);

        let err = google_callback(
            State(state),
            Query(CallbackQuery {
                code: "abc".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
