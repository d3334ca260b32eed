// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        AccessTokenResponse, CreateRecipeRequest, LoginRequest, Recipe, RegisterRequest,
        UpdateProfileRequest, UpdateRecipeRequest, User,
    },
    state::AppState,
};

pub mod health;
pub mod oauth;
pub mod recipes;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/google/login", get(oauth::google_login))
        .route("/users/google/callback", get(oauth::google_callback))
        .route(
            "/users/me",
            get(users::get_current_user).put(users::update_profile),
        )
        .route("/users/me/avatar", post(users::upload_avatar))
        .route("/users/me/recipes", get(users::my_recipes))
        .route("/users", get(users::list_users))
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/{recipe_id}",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::get_current_user,
        users::update_profile,
        users::upload_avatar,
        users::my_recipes,
        users::list_users,
        oauth::google_login,
        oauth::google_callback,
        recipes::create_recipe,
        recipes::list_recipes,
        recipes::get_recipe,
        recipes::update_recipe,
        recipes::delete_recipe,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            User,
            Recipe,
            Role,
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            AccessTokenResponse,
            CreateRecipeRequest,
            UpdateRecipeRequest,
            health::ReadyResponse,
            health::HealthResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Users", description = "Registration, login and profile management"),
        (name = "Recipes", description = "Owner-scoped recipe CRUD"),
        (name = "Health", description = "Service probes")
    )
)]
struct ApiDoc;
