// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Federated identity bridge.
//!
//! Exchanges a verified provider assertion for a local account and an
//! access token. Password login and federated login converge here: both
//! end in [`TokenService::issue`](super::TokenService::issue) with the
//! resolved user's id and stored role.

use crate::providers::FederatedProfile;
use crate::state::AppState;

use super::AuthError;

/// Resolve a verified profile to a local user and issue a token.
///
/// Creates the account on first login (role `user`, no password hash).
/// The whole find-or-create runs under one write lock, so two callbacks
/// racing on the same email still yield a single account. An existing
/// account's role and credentials are never modified.
pub async fn exchange_profile(
    state: &AppState,
    profile: FederatedProfile,
) -> Result<String, AuthError> {
    let user = state.users.write().await.find_or_create_federated(
        &profile.email,
        &profile.first_name,
        &profile.last_name,
        profile.avatar_url,
    );

    state.tokens.issue(&user.id, user.role)
}
