// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! # Storage Module
//!
//! In-process repositories for users and recipes, fronted by the same
//! find/update/delete-by-id operations a document store would expose.
//! The repositories live behind `Arc<RwLock<...>>` in [`AppState`]; no
//! other cross-request mutable state exists.
//!
//! [`AppState`]: crate::state::AppState

pub mod ownership;
pub mod repository;

pub use ownership::{OwnedResource, OwnershipCheck, OwnershipEnforcer};
pub use repository::{RecipeRepository, UserRepository};

/// Error type for repository operations.
#[derive(Debug)]
pub enum StorageError {
    /// Entity not found
    NotFound(String),
    /// Entity already exists (unique constraint)
    AlreadyExists(String),
    /// Ownership check failed
    PermissionDenied { user_id: String, resource: String },
    /// Unexpected internal failure (e.g. password hashing)
    Internal(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(entity) => write!(f, "Not found: {entity}"),
            StorageError::AlreadyExists(entity) => write!(f, "Already exists: {entity}"),
            StorageError::PermissionDenied { user_id, resource } => {
                write!(f, "Permission denied: user {user_id} cannot access {resource}")
            }
            StorageError::Internal(msg) => write!(f, "Internal storage error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;
