// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Ownership enforcement for resource-scoped operations.
//!
//! Every access to an owned resource passes through these checks: the
//! caller must be the recorded owner or hold the admin role. Missing
//! resources and denied resources are distinct at this layer; the HTTP
//! layer collapses both to 404 so unauthorized callers learn nothing
//! about existence.

use crate::auth::AuthenticatedUser;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user id.
    fn owner_id(&self) -> &str;

    /// Resource label and id used in error messages, e.g. `recipe abc`.
    fn resource_label(&self) -> String;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify the caller may access this resource: owner or admin.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` for everyone else.
    fn verify_access(&self, user: &AuthenticatedUser) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_access(&self, user: &AuthenticatedUser) -> StorageResult<()> {
        if self.owner_id() == user.user_id || user.is_admin() {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: user.user_id.clone(),
                resource: self.resource_label(),
            })
        }
    }
}

/// Extension trait combining lookup results with the ownership check.
pub trait OwnershipCheck<T> {
    /// Verify ownership and return the resource if authorized.
    fn authorize(self, user: &AuthenticatedUser) -> StorageResult<T>;
}

impl<T: OwnedResource> OwnershipCheck<T> for StorageResult<T> {
    fn authorize(self, user: &AuthenticatedUser) -> StorageResult<T> {
        let resource = self?;
        resource.verify_access(user)?;
        Ok(resource)
    }
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn authorize(self, user: &AuthenticatedUser) -> StorageResult<T> {
        match self {
            Some(resource) => {
                resource.verify_access(user)?;
                Ok(resource)
            }
            None => Err(StorageError::NotFound("resource".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    struct TestResource {
        owner: String,
    }

    impl OwnedResource for TestResource {
        fn owner_id(&self) -> &str {
            &self.owner
        }

        fn resource_label(&self) -> String {
            "test resource".to_string()
        }
    }

    fn make_user(user_id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id.to_string(),
            role,
            expires_at: 0,
        }
    }

    #[test]
    fn owner_is_granted_access() {
        let resource = TestResource {
            owner: "user_123".to_string(),
        };
        let user = make_user("user_123", Role::User);

        assert!(resource.verify_access(&user).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let resource = TestResource {
            owner: "user_123".to_string(),
        };
        let user = make_user("user_456", Role::User);

        let result = resource.verify_access(&user);
        assert!(matches!(result, Err(StorageError::PermissionDenied { .. })));
    }

    #[test]
    fn admin_bypasses_ownership() {
        let resource = TestResource {
            owner: "user_123".to_string(),
        };
        let admin = make_user("admin_1", Role::Admin);

        assert!(resource.verify_access(&admin).is_ok());
    }

    #[test]
    fn authorize_on_result() {
        let resource = TestResource {
            owner: "user_123".to_string(),
        };
        let user = make_user("user_123", Role::User);

        let result: StorageResult<TestResource> = Ok(resource);
        assert!(result.authorize(&user).is_ok());
    }

    #[test]
    fn authorize_on_option_none_is_not_found() {
        let user = make_user("user_123", Role::User);

        let option: Option<TestResource> = None;
        let result = option.authorize(&user);
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn authorize_on_option_foreign_resource_is_denied() {
        let user = make_user("user_456", Role::User);

        let option = Some(TestResource {
            owner: "user_123".to_string(),
        });
        let result = option.authorize(&user);
        assert!(matches!(result, Err(StorageError::PermissionDenied { .. })));
    }
}
