// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenService;
use crate::providers::{AvatarStore, GoogleClient, InMemoryAvatarStore};
use crate::storage::{RecipeRepository, UserRepository};

/// Shared application state.
///
/// Repositories sit behind `Arc<RwLock<...>>`; the token service and
/// provider clients are immutable after startup and shared as-is.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserRepository>>,
    pub recipes: Arc<RwLock<RecipeRepository>>,
    pub tokens: TokenService,
    pub avatars: Arc<dyn AvatarStore>,
    /// Present only when Google login is configured.
    pub google: Option<Arc<GoogleClient>>,
}

impl AppState {
    pub fn new(tokens: TokenService) -> Self {
        Self {
            users: Arc::new(RwLock::new(UserRepository::new())),
            recipes: Arc::new(RwLock::new(RecipeRepository::new())),
            tokens,
            avatars: Arc::new(InMemoryAvatarStore::new("http://localhost:8080")),
            google: None,
        }
    }

    pub fn with_avatar_store(mut self, avatars: Arc<dyn AvatarStore>) -> Self {
        self.avatars = avatars;
        self
    }

    pub fn with_google(mut self, google: GoogleClient) -> Self {
        self.google = Some(Arc::new(google));
        self
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(TokenService::new(
            b"test-secret-at-least-32-bytes-long",
            3600,
        ))
    }
}
