// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ReciGuard

//! Recipe repository with owner-scoped access.
//!
//! Reads and writes on a specific recipe go through the ownership gate:
//! the caller must own the recipe or be an admin. A lookup that fails
//! the gate surfaces `PermissionDenied`, which the HTTP layer renders
//! identically to a miss.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::models::{CreateRecipeRequest, Recipe, UpdateRecipeRequest};

use super::super::{OwnedResource, OwnershipCheck, StorageError, StorageResult};

impl OwnedResource for Recipe {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn resource_label(&self) -> String {
        format!("recipe {}", self.id)
    }
}

#[derive(Default)]
pub struct RecipeRepository {
    recipes: HashMap<String, Recipe>,
}

impl RecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recipe owned by the caller. Ownership is fixed here and
    /// never changes afterwards.
    pub fn create(&mut self, owner: &AuthenticatedUser, request: CreateRecipeRequest) -> Recipe {
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.user_id.clone(),
            title: request.title,
            category: request.category,
            ingredients: request.ingredients,
            instructions: request.instructions,
            created_at: Utc::now(),
        };
        self.recipes.insert(recipe.id.clone(), recipe.clone());
        recipe
    }

    /// Recipes owned by the given user.
    pub fn list_by_owner(&self, owner_id: &str) -> Vec<Recipe> {
        self.recipes
            .values()
            .filter(|recipe| recipe.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Every recipe, for admin listings.
    pub fn list_all(&self) -> Vec<Recipe> {
        self.recipes.values().cloned().collect()
    }

    /// Fetch a recipe the caller is allowed to see.
    pub fn get_authorized(
        &self,
        recipe_id: &str,
        user: &AuthenticatedUser,
    ) -> StorageResult<Recipe> {
        self.recipes.get(recipe_id).cloned().authorize(user)
    }

    /// Update a recipe after passing the ownership gate.
    pub fn update_authorized(
        &mut self,
        recipe_id: &str,
        user: &AuthenticatedUser,
        request: UpdateRecipeRequest,
    ) -> StorageResult<Recipe> {
        // Authorize against a snapshot, then mutate in place.
        self.get_authorized(recipe_id, user)?;

        let Some(recipe) = self.recipes.get_mut(recipe_id) else {
            return Err(StorageError::NotFound(format!("Recipe {recipe_id}")));
        };

        if let Some(title) = request.title {
            recipe.title = title;
        }
        if let Some(category) = request.category {
            recipe.category = category;
        }
        if let Some(ingredients) = request.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = request.instructions {
            recipe.instructions = instructions;
        }

        Ok(recipe.clone())
    }

    /// Delete a recipe after passing the ownership gate.
    pub fn delete_authorized(
        &mut self,
        recipe_id: &str,
        user: &AuthenticatedUser,
    ) -> StorageResult<()> {
        self.get_authorized(recipe_id, user)?;
        self.recipes.remove(recipe_id);
        Ok(())
    }
}
