// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! User repository: the credential store behind the auth core.
//!
//! Invariants enforced here rather than in handlers:
//! - email is globally unique
//! - role defaults to `user` and is untouched by the self-update path
//! - federated creation never overwrites an existing account's role

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::Role;
use crate::models::{RegisterRequest, UpdateProfileRequest, User};

use super::super::{StorageError, StorageResult};

#[derive(Default)]
pub struct UserRepository {
    users: HashMap<String, User>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user by email.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }

    /// Look up a user by id.
    pub fn find_by_id(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// All users, for the admin listing.
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    /// Create a password-based account with role `user`.
    pub fn create_with_password(&mut self, request: RegisterRequest) -> StorageResult<User> {
        if self.find_by_email(&request.email).is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {}",
                request.email
            )));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| StorageError::Internal(format!("password hash: {e}")))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: request.email,
            password_hash: Some(password_hash),
            first_name: request.first_name,
            last_name: request.last_name,
            role: Role::default(),
            avatar_url: None,
            created_at: Utc::now(),
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Find a federated account by email, creating it if absent.
    ///
    /// Created accounts carry no password hash and role `user`. Existing
    /// accounts are returned untouched: in particular their role is
    /// never downgraded, so repeated calls are idempotent.
    pub fn find_or_create_federated(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
        avatar_url: Option<String>,
    ) -> User {
        if let Some(existing) = self.find_by_email(email) {
            return existing.clone();
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: Role::default(),
            avatar_url,
            created_at: Utc::now(),
        };
        tracing::info!(user_id = %user.id, "created federated user");
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    /// Apply a self-update. Role is not part of the request type, so
    /// this path cannot escalate.
    pub fn update_profile(
        &mut self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> StorageResult<User> {
        if let Some(new_email) = &request.email {
            let taken = self
                .find_by_email(new_email)
                .is_some_and(|other| other.id != user_id);
            if taken {
                return Err(StorageError::AlreadyExists(format!(
                    "User with email {new_email}"
                )));
            }
        }

        let Some(user) = self.users.get_mut(user_id) else {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        };

        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }

        Ok(user.clone())
    }

    /// Persist the URL the blob store returned for the user's avatar.
    pub fn set_avatar(&mut self, user_id: &str, avatar_url: String) -> StorageResult<User> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        };
        user.avatar_url = Some(avatar_url);
        Ok(user.clone())
    }

    /// Promote or demote a user. No HTTP route exposes this yet; role
    /// changes happen out of band until an admin endpoint lands.
    pub fn set_role(&mut self, user_id: &str, role: Role) -> StorageResult<User> {
        let Some(user) = self.users.get_mut(user_id) else {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        };
        user.role = role;
        Ok(user.clone())
    }
}
