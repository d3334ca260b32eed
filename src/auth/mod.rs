// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! # Authentication Module
//!
//! Credential verification, stateless JWT issuance/validation, and the
//! extractors that gate handlers.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in (password) or completes the Google
//!    redirect (federated); either path ends in `TokenService::issue`
//! 2. Client sends `Authorization: Bearer <JWT>` on every request
//! 3. The `Auth` extractor:
//!    - verifies signature and expiry against the process-wide secret
//!    - re-fetches the user by `sub` and attaches its current role
//!
//! ## Security
//!
//! - Tokens are HS256-signed and time-bound; clock skew tolerance 60 s
//! - Malformed / tampered / expired tokens share one external 401
//! - Login failures never reveal whether the email exists
//! - No server-side token state: invalidation is by expiry only

pub mod claims;
pub mod error;
pub mod extractor;
pub mod federated;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::{AccessClaims, AuthenticatedUser};
pub use error::{AuthError, TokenRejection};
pub use extractor::{AdminOnly, Auth, OptionalAuth};
pub use roles::Role;
pub use token::TokenService;
