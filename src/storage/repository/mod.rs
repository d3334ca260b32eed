// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Repositories for users and recipes.
//!
//! Each repository is a plain in-memory map exposing the find/update/
//! delete-by-id operations of the auth core and the recipe handlers.
//! All locking happens at the [`AppState`](crate::state::AppState)
//! level, so methods here are synchronous.

pub mod recipes;
pub mod users;

pub use recipes::RecipeRepository;
pub use users::UserRepository;
