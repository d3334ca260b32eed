// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Recipe CRUD endpoints.
//!
//! Every route requires authentication. Reads and writes on a specific
//! recipe pass the ownership gate in the repository; a missing recipe
//! and someone else's recipe both answer 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateRecipeRequest, Recipe, UpdateRecipeRequest},
    state::AppState,
};

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/v1/recipes",
    tag = "Recipes",
    security(("bearer" = [])),
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Missing title or category"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_recipe(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if request.title.trim().is_empty() || request.category.trim().is_empty() {
        return Err(ApiError::bad_request("Title and category are required"));
    }

    let recipe = state.recipes.write().await.create(&user, request);
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// List recipes. Users see their own; admins see everything.
#[utoipa::path(
    get,
    path = "/v1/recipes",
    tag = "Recipes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Recipe list", body = [Recipe]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_recipes(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.recipes.read().await;
    let list = if user.is_admin() {
        recipes.list_all()
    } else {
        recipes.list_by_owner(&user.user_id)
    };
    Ok(Json(list))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/v1/recipes/{recipe_id}",
    params(
        ("recipe_id" = String, Path, description = "Identifier of the recipe")
    ),
    tag = "Recipes",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The recipe", body = Recipe),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such recipe for this caller"),
    )
)]
pub async fn get_recipe(
    Auth(user): Auth,
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.recipes.read().await.get_authorized(&recipe_id, &user)?;
    Ok(Json(recipe))
}

/// Update one recipe.
#[utoipa::path(
    put,
    path = "/v1/recipes/{recipe_id}",
    params(
        ("recipe_id" = String, Path, description = "Identifier of the recipe")
    ),
    tag = "Recipes",
    security(("bearer" = [])),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such recipe for this caller"),
    )
)]
pub async fn update_recipe(
    Auth(user): Auth,
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<Recipe>, ApiError> {
    let updated = state
        .recipes
        .write()
        .await
        .update_authorized(&recipe_id, &user, request)?;
    Ok(Json(updated))
}

/// Delete one recipe.
#[utoipa::path(
    delete,
    path = "/v1/recipes/{recipe_id}",
    params(
        ("recipe_id" = String, Path, description = "Identifier of the recipe")
    ),
    tag = "Recipes",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such recipe for this caller"),
    )
)]
pub async fn delete_recipe(
    Auth(user): Auth,
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state
        .recipes
        .write()
        .await
        .delete_authorized(&recipe_id, &user)?;
    Ok(StatusCode::NO_CONTENT)
}
