// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Stateless access token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with a process-wide secret that is read
//! once at startup and shared read-only across requests. No issued token
//! is persisted and there is no revocation list: invalidation is by
//! expiry only. That trades revocability for horizontal scalability; a
//! short-lived denylist keyed by token id could be added later without
//! touching issuance or verification.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::AccessClaims;
use super::error::{AuthError, TokenRejection};
use super::roles::Role;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Issues and verifies signed, time-bound bearer tokens.
///
/// Cheap to clone; the keys are behind `Arc` and shared.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    /// Validity window applied to every issued token, in seconds.
    ttl_secs: i64,
}

impl TokenService {
    /// Create a token service from the signing secret and expiry window.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret)),
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            ttl_secs,
        }
    }

    /// Issue a signed token for the given identity and role.
    ///
    /// Pure computation over the shared key: nothing is stored.
    pub fn issue(&self, user_id: &str, role: Role) -> Result<String, AuthError> {
        self.issue_with_lifetime(user_id, role, self.ttl_secs)
    }

    fn issue_with_lifetime(
        &self,
        user_id: &str,
        role: Role,
        lifetime_secs: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            role,
            iat: now,
            exp: now + lifetime_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Verify a token string: signature integrity, then expiry.
    ///
    /// Malformed input, bad signatures and expired tokens map to
    /// distinct [`TokenRejection`] reasons internally, all surfaced as
    /// the same external 401.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenRejection::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenRejection::BadSignature
                    }
                    _ => TokenRejection::Malformed,
                };
                AuthError::InvalidToken(reason)
            })
    }
}
