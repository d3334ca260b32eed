// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Google OAuth integration for federated login.
//!
//! This client owns the redirect handshake plumbing: building the
//! authorize URL, exchanging the callback code for an access token, and
//! fetching the userinfo document. The result is a [`FederatedProfile`]
//! - a verified identity assertion - which is all the auth core ever
//! sees. A user abandoning the redirect simply never produces a
//! callback; no partial state exists to clean up.

use std::{env, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use url::Url;

const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const OAUTH_SCOPES: &str = "openid email profile";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Verified identity assertion produced by the provider handshake.
///
/// Carries no password; accounts resolved through it are federated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    #[error("Google OAuth configuration missing: {0}")]
    MissingConfig(String),

    #[error("Google token exchange failed: {0}")]
    Exchange(String),

    #[error("Google response was invalid: {0}")]
    InvalidResponse(String),
}

/// Google OAuth client configured from the environment.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    authorize_url: String,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    /// Frontend location the callback redirects to, token appended.
    frontend_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: String,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleClient {
    pub fn is_configured() -> bool {
        required_env_present("GOOGLE_CLIENT_ID")
            && required_env_present("GOOGLE_CLIENT_SECRET")
            && required_env_present("GOOGLE_REDIRECT_URI")
            && required_env_present("FRONTEND_URL")
    }

    pub fn from_env() -> Result<Self, GoogleError> {
        let authorize_url = env_or_default("GOOGLE_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL);
        let token_url = env_or_default("GOOGLE_TOKEN_URL", DEFAULT_TOKEN_URL);
        let userinfo_url = env_or_default("GOOGLE_USERINFO_URL", DEFAULT_USERINFO_URL);
        let client_id = env_required("GOOGLE_CLIENT_ID")?;
        let client_secret = env_required("GOOGLE_CLIENT_SECRET")?;
        let redirect_uri = env_required("GOOGLE_REDIRECT_URI")?;
        let frontend_url = env_required("FRONTEND_URL")?;

        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| GoogleError::Exchange(e.to_string()))?;

        Ok(Self {
            authorize_url,
            token_url,
            userinfo_url,
            client_id,
            client_secret,
            redirect_uri,
            frontend_url,
            http,
        })
    }

    /// Build the provider authorize URL the login route redirects to.
    pub fn authorize_url(&self, state: &str) -> Result<String, GoogleError> {
        let mut url = Url::parse(&self.authorize_url)
            .map_err(|e| GoogleError::InvalidResponse(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", OAUTH_SCOPES)
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Where the callback sends the browser, with the issued token.
    pub fn frontend_redirect(&self, access_token: &str) -> String {
        format!("{}/{access_token}", self.frontend_url.trim_end_matches('/'))
    }

    /// Exchange the callback code for a verified profile.
    pub async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, GoogleError> {
        let token: OAuthTokenResponse = self
            .http
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("redirect_uri", &self.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| GoogleError::Exchange(e.to_string()))?
            .error_for_status()
            .map_err(|e| GoogleError::Exchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| GoogleError::InvalidResponse(e.to_string()))?;

        let info: UserInfoResponse = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| GoogleError::Exchange(e.to_string()))?
            .error_for_status()
            .map_err(|e| GoogleError::Exchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| GoogleError::InvalidResponse(e.to_string()))?;

        Ok(FederatedProfile {
            email: info.email,
            first_name: info.given_name.unwrap_or_default(),
            last_name: info.family_name.unwrap_or_default(),
            avatar_url: info.picture,
        })
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_required(key: &str) -> Result<String, GoogleError> {
    env::var(key).map_err(|_| GoogleError::MissingConfig(key.to_string()))
}

fn required_env_present(key: &str) -> bool {
    env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleClient {
        GoogleClient {
            authorize_url: DEFAULT_AUTHORIZE_URL.into(),
            token_url: DEFAULT_TOKEN_URL.into(),
            userinfo_url: DEFAULT_USERINFO_URL.into(),
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_uri: "https://api.example.com/v1/users/google/callback".into(),
            frontend_url: "https://app.example.com/".into(),
            http: Client::new(),
        }
    }

    #[test]
    fn authorize_url_carries_client_and_state() {
        let url = test_client().authorize_url("xyz").unwrap();
        let parsed = Url::parse(&url).unwrap();

        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "client-id".into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("state".into(), "xyz".into())));
        assert!(pairs.contains(&("scope".into(), OAUTH_SCOPES.into())));
    }

    #[test]
    fn frontend_redirect_appends_token_without_double_slash() {
        let client = test_client();
        assert_eq!(
            client.frontend_redirect("tok123"),
            "https://app.example.com/tok123"
        );
    }

    #[test]
    fn userinfo_parses_with_missing_optional_fields() {
        let info: UserInfoResponse =
            serde_json::from_str(r#"{"email":"g@x.com"}"#).unwrap();
        assert_eq!(info.email, "g@x.com");
        assert!(info.given_name.is_none());
        assert!(info.picture.is_none());
    }
}
