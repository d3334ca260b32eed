// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! External collaborators: the Google identity provider and the avatar
//! blob store. The auth core only sees their interfaces.

pub mod avatars;
pub mod google;

pub use avatars::{AvatarStore, AvatarStoreError, InMemoryAvatarStore};
pub use google::{FederatedProfile, GoogleClient, GoogleError};
