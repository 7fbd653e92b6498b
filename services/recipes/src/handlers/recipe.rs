use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use recipedb_domain::ingredient::Ingredient;
use recipedb_domain::tag::Tag;

use crate::domain::types::{CurrentUser, RecipePatch, RecipeView};
use crate::error::RecipesServiceError;
use crate::handlers::comment::CommentResponse;
use crate::handlers::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;
use crate::usecase::ownership::RecipeOwnershipGuard;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesByOwnerUseCase, ListRecipesByTagsUseCase, ListRecipesUseCase, UpdateRecipeUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(rename = "recipeID")]
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: i32,
    pub upvotes: u64,
    pub steps: String,
    pub image_url: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub owner_username: String,
    pub comments: Vec<CommentResponse>,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let recipe = view.recipe;
        Self {
            recipe_id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            upvotes: view.upvotes,
            steps: recipe.steps,
            image_url: recipe.image_url,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            owner_username: view.owner_username,
            comments: view.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

fn into_responses(views: Vec<RecipeView>) -> Json<Vec<RecipeResponse>> {
    Json(views.into_iter().map(RecipeResponse::from).collect())
}

// ── POST /api/recipes/create ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: i32,
    pub steps: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

pub async fn create_recipe(
    user: CurrentUser,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let view = usecase
        .execute(
            &user,
            CreateRecipeInput {
                title: body.title,
                description: body.description,
                prep_time: body.prep_time,
                cook_time: body.cook_time,
                servings: body.servings,
                difficulty: body.difficulty,
                steps: body.steps,
                image_url: body.image_url,
                tags: body.tags,
                ingredients: body.ingredients,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /api/recipes/all ─────────────────────────────────────────────────────

pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    Ok(into_responses(usecase.execute().await?))
}

// ── GET /api/recipes/r/byId/{id} ─────────────────────────────────────────────

pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    Ok(Json(usecase.execute(recipe_id).await?.into()))
}

// ── GET /api/recipes/u/{username} ────────────────────────────────────────────

pub async fn list_recipes_by_owner(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let usecase = ListRecipesByOwnerUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    Ok(into_responses(usecase.execute(&username).await?))
}

// ── GET /api/recipes/tags?tags=... ───────────────────────────────────────────

/// Collect `tags` values from the query string. Accepts repeated keys
/// (`tags=A&tags=B`) and comma-separated values (`tags=A,B`).
pub fn parse_tag_params(params: &[(String, String)]) -> Result<Vec<Tag>, RecipesServiceError> {
    params
        .iter()
        .filter(|(key, _)| key == "tags")
        .flat_map(|(_, value)| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<Tag>()
                .map_err(|e| RecipesServiceError::validation(e.to_string()))
        })
        .collect()
}

pub async fn list_recipes_by_tags(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<Vec<(String, String)>>,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let tags = parse_tag_params(&params)?;
    let usecase = ListRecipesByTagsUseCase {
        recipes: state.recipe_repo(),
    };
    Ok(into_responses(usecase.execute(tags).await?))
}

// ── PUT /api/recipes/r/{id}/edit ─────────────────────────────────────────────

/// Absent and `null` fields are left unchanged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<i32>,
    pub steps: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(body: UpdateRecipeRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            prep_time: body.prep_time,
            cook_time: body.cook_time,
            servings: body.servings,
            difficulty: body.difficulty,
            steps: body.steps,
            image_url: body.image_url,
            tags: body.tags,
            ingredients: body.ingredients,
        }
    }
}

pub async fn edit_recipe(
    user: CurrentUser,
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
    AppJson(body): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    RecipeOwnershipGuard {
        recipes: state.recipe_repo(),
    }
    .ensure_owner(recipe_id, &user.username)
    .await?;

    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    Ok(Json(usecase.execute(recipe_id, body.into()).await?.into()))
}

// ── DELETE /api/recipes/r/{id}/delete ────────────────────────────────────────

pub async fn delete_recipe(
    user: CurrentUser,
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    RecipeOwnershipGuard {
        recipes: state.recipe_repo(),
    }
    .ensure_owner(recipe_id, &user.username)
    .await?;

    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    usecase.execute(recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
