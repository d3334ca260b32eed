// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! # Runtime Configuration Constants
//!
//! Environment variable names and default values used throughout the
//! application. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 signing secret | **Required** |
//! | `JWT_TTL_SECS` | Access token validity window | `86400` |
//! | `FRONTEND_URL` | Frontend base URL for the OAuth redirect | Required for Google login |
//! | `GOOGLE_CLIENT_ID` | OAuth client id | Required for Google login |
//! | `GOOGLE_CLIENT_SECRET` | OAuth client secret | Required for Google login |
//! | `GOOGLE_REDIRECT_URI` | OAuth callback URL of this server | Required for Google login |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the token signing secret.
///
/// The secret is read once at startup and shared read-only across all
/// concurrent verifications. The server refuses to start without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token validity window in seconds.
pub const JWT_TTL_ENV: &str = "JWT_TTL_SECS";

/// Default token validity window: one day.
pub const DEFAULT_JWT_TTL_SECS: i64 = 86_400;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";
