// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

use std::{env, net::SocketAddr, process};

use tracing_subscriber::EnvFilter;

use reciguard_server::{
    api::router,
    auth::TokenService,
    config::{DEFAULT_JWT_TTL_SECS, DEFAULT_LOG_FILTER, JWT_SECRET_ENV, JWT_TTL_ENV},
    providers::GoogleClient,
    state::AppState,
};

#[tokio::main]
async fn main() {
    init_tracing();

    // The signing secret is mandatory: without it every issued token would
    // be forgeable by anyone who reads the source.
    let secret = match env::var(JWT_SECRET_ENV) {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            eprintln!("{JWT_SECRET_ENV} must be set");
            process::exit(1);
        }
    };

    let ttl_secs = env::var(JWT_TTL_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_JWT_TTL_SECS);

    let tokens = TokenService::new(secret.as_bytes(), ttl_secs);
    let mut state = AppState::new(tokens);

    if GoogleClient::is_configured() {
        match GoogleClient::from_env() {
            Ok(google) => {
                tracing::info!("Google federated login enabled");
                state = state.with_google(google);
            }
            Err(err) => {
                tracing::warn!(%err, "incomplete Google OAuth configuration, federated login disabled");
            }
        }
    } else {
        tracing::info!("Google federated login not configured, skipping");
    }

    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = match parse_port(env::var("PORT").ok().as_deref()) {
        Ok(port) => port,
        Err(raw) => {
            eprintln!("invalid PORT value: {raw}");
            process::exit(1);
        }
    };

    let addr: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!("invalid bind address {host}:{port}: {err}");
            process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("failed to bind {addr}: {err}");
            process::exit(1);
        }
    };

    tracing::info!("ReciGuard server listening on http://{addr} (docs at /docs)");

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("server failed: {err}");
        process::exit(1);
    }
}

/// Resolve the bind port from the environment value. Absent means the
/// default; a present but unparseable value is an error, not a silent
/// fallback.
fn parse_port(raw: Option<&str>) -> Result<u16, String> {
    match raw {
        None => Ok(8080),
        Some(raw) => raw.parse().map_err(|_| raw.to_string()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown signal handler");
    }
    tracing::info!("shutdown signal received");
}
