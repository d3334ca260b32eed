// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Avatar blob storage seam.
//!
//! The service hands avatar bytes to an external object store and
//! persists only the URL it gets back. The trait is the contract; the
//! in-memory implementation backs development and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

/// Error from the blob store collaborator. Surfaced as 502 upstream
/// failure; the user record is left untouched when storing fails.
#[derive(Debug, thiserror::Error)]
#[error("avatar store failure: {0}")]
pub struct AvatarStoreError(pub String);

/// External object store for avatar images.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Store the image bytes for a user, returning a stable URL.
    /// Re-uploading overwrites the previous image at the same URL.
    async fn store(
        &self,
        user_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AvatarStoreError>;
}

/// In-memory store used in development and tests.
#[derive(Default)]
pub struct InMemoryAvatarStore {
    blobs: Mutex<HashMap<String, (String, Vec<u8>)>>,
    base_url: String,
}

impl InMemoryAvatarStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            base_url: base_url.into(),
        }
    }

    #[cfg(test)]
    pub fn blob_for(&self, user_id: &str) -> Option<(String, Vec<u8>)> {
        self.blobs.lock().unwrap().get(user_id).cloned()
    }
}

#[async_trait]
impl AvatarStore for InMemoryAvatarStore {
    async fn store(
        &self,
        user_id: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AvatarStoreError> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| AvatarStoreError("store poisoned".to_string()))?;
        blobs.insert(user_id.to_string(), (content_type.to_string(), bytes));
        Ok(format!(
            "{}/avatars/{user_id}",
            self.base_url.trim_end_matches('/')
        ))
    }
}
