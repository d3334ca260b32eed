// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! ReciGuard - Authenticated Recipe Backend
//!
//! This crate provides a recipe sharing service with stateless JWT bearer
//! authentication, role and ownership gating, and Google federated login.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential hashing, token issue/verify, request extractors
//! - `providers` - External integrations (Google OAuth, avatar blob store)
//! - `storage` - In-memory repositories with ownership enforcement

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;
