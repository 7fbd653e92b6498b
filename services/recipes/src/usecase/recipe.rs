use recipedb_domain::ingredient::Ingredient;
use recipedb_domain::tag::Tag;

use crate::domain::repository::{RecipeRepository, UserRepository};
use crate::domain::types::{CurrentUser, NewRecipe, RecipePatch, RecipeView, normalize_set};
use crate::error::RecipesServiceError;

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: i32,
    pub steps: String,
    pub image_url: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

pub struct CreateRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> CreateRecipeUseCase<R> {
    pub async fn execute(
        &self,
        owner: &CurrentUser,
        input: CreateRecipeInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = NewRecipe {
            owner_id: owner.id,
            title: input.title,
            description: input.description,
            prep_time: input.prep_time,
            cook_time: input.cook_time,
            servings: input.servings,
            difficulty: input.difficulty,
            steps: input.steps,
            image_url: input.image_url,
            tags: normalize_set(input.tags),
            ingredients: normalize_set(input.ingredients),
        };
        recipe.validate()?;

        let id = self.recipes.create(&recipe).await?;
        tracing::info!(recipe_id = id, user_id = owner.id, "recipe created");
        self.recipes
            .find_view(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<RecipeView, RecipesServiceError> {
        self.recipes
            .find_view(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<RecipeView>, RecipesServiceError> {
        self.recipes.list_views().await
    }
}

// ── ListRecipesByOwner ───────────────────────────────────────────────────────

pub struct ListRecipesByOwnerUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> ListRecipesByOwnerUseCase<U, R> {
    pub async fn execute(&self, username: &str) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let owner = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        self.recipes.list_views_by_owner(owner.id).await
    }
}

// ── ListRecipesByTags ────────────────────────────────────────────────────────

pub struct ListRecipesByTagsUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesByTagsUseCase<R> {
    /// Recipes carrying any of `tags`. No tags yields an empty list.
    pub async fn execute(&self, tags: Vec<Tag>) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let tags = normalize_set(tags);
        if tags.is_empty() {
            return Ok(vec![]);
        }
        self.recipes.list_views_by_tags(&tags).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> UpdateRecipeUseCase<R> {
    /// Apply `patch` to the recipe. Ownership is checked by the caller.
    pub async fn execute(
        &self,
        recipe_id: i32,
        patch: RecipePatch,
    ) -> Result<RecipeView, RecipesServiceError> {
        patch.validate()?;
        if !patch.is_empty() {
            self.recipes.update(recipe_id, &patch).await?;
            tracing::info!(recipe_id, "recipe updated");
        }
        self.recipes
            .find_view(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    /// Cascading delete. Ownership is checked by the caller.
    pub async fn execute(&self, recipe_id: i32) -> Result<(), RecipesServiceError> {
        self.recipes.delete_cascade(recipe_id).await?;
        tracing::info!(recipe_id, "recipe deleted");
        Ok(())
    }
}
