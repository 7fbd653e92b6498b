use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, DeleteResult, EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionError, TransactionTrait,
};

use recipedb_core::sea_ext::DbErrExt as _;
use recipedb_domain::ingredient::Ingredient;
use recipedb_domain::tag::Tag;
use recipedb_recipes_schema::{
    comments, recipe_ingredients, recipe_tags, recipe_upvotes, recipes, sessions, users,
};

use crate::domain::repository::{
    CommentRepository, RecipeRepository, SessionRepository, UpvoteRepository, UserRepository,
};
use crate::domain::types::{
    Comment, NewRecipe, NewUser, Recipe, RecipePatch, RecipeView, Session, UpvoteToggle, User,
    normalize_set,
};
use crate::error::RecipesServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RecipesServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RecipesServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .context("count users by email")?;
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError> {
        let result = users::ActiveModel {
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => Ok(user_from_model(model)),
            // Postgres names the violated constraint, SQLite the column; both mention "email".
            Err(e) => match e.unique_violation_message() {
                Some(message) if message.contains("email") => {
                    Err(RecipesServiceError::EmailAlreadyExists)
                }
                Some(_) => Err(RecipesServiceError::UsernameAlreadyExists),
                None => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RecipesServiceError> {
        self.db
            .transaction::<_, Result<(), RecipesServiceError>, DbErr>(|txn| {
                Box::pin(async move {
                    if users::Entity::find_by_id(id).one(txn).await?.is_none() {
                        return Ok(Err(RecipesServiceError::UserNotFound));
                    }

                    let recipe_ids: Vec<i32> = recipes::Entity::find()
                        .select_only()
                        .column(recipes::Column::Id)
                        .filter(recipes::Column::UserId.eq(id))
                        .into_tuple()
                        .all(txn)
                        .await?;

                    comments::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(comments::Column::UserId.eq(id))
                                .add(comments::Column::RecipeId.is_in(recipe_ids.iter().copied())),
                        )
                        .exec(txn)
                        .await?;
                    recipe_upvotes::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(recipe_upvotes::Column::UserId.eq(id))
                                .add(
                                    recipe_upvotes::Column::RecipeId
                                        .is_in(recipe_ids.iter().copied()),
                                ),
                        )
                        .exec(txn)
                        .await?;
                    if !recipe_ids.is_empty() {
                        recipe_tags::Entity::delete_many()
                            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                            .exec(txn)
                            .await?;
                        recipe_ingredients::Entity::delete_many()
                            .filter(
                                recipe_ingredients::Column::RecipeId
                                    .is_in(recipe_ids.iter().copied()),
                            )
                            .exec(txn)
                            .await?;
                        recipes::Entity::delete_many()
                            .filter(recipes::Column::UserId.eq(id))
                            .exec(txn)
                            .await?;
                    }
                    sessions::Entity::delete_many()
                        .filter(sessions::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(Ok(()))
                })
            })
            .await
            .context("delete user cascade")?
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), RecipesServiceError> {
        sessions::ActiveModel {
            user_id: Set(session.user_id),
            token_hash: Set(session.token_hash.clone()),
            expires_at: Set(session.expires_at),
            created_at: Set(session.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RecipesServiceError> {
        let model = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(token_hash))
            .filter(sessions::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find active session")?;
        Ok(model.map(|m| Session {
            user_id: m.user_id,
            token_hash: m.token_hash,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }))
    }

    async fn delete(&self, token_hash: &str) -> Result<(), RecipesServiceError> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(())
    }

    async fn delete_expired(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<u64, RecipesServiceError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired sessions")?;
        Ok(result.rows_affected)
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError> {
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let now = Utc::now();
                    let model = recipes::ActiveModel {
                        user_id: Set(recipe.owner_id),
                        title: Set(recipe.title),
                        description: Set(recipe.description),
                        prep_time: Set(recipe.prep_time),
                        cook_time: Set(recipe.cook_time),
                        servings: Set(recipe.servings),
                        difficulty: Set(recipe.difficulty),
                        steps: Set(recipe.steps),
                        image_url: Set(recipe.image_url),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_tags(txn, model.id, recipe.tags).await?;
                    replace_ingredients(txn, model.id, recipe.ingredients).await?;
                    Ok(model.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn find_owner_username(
        &self,
        recipe_id: i32,
    ) -> Result<Option<String>, RecipesServiceError> {
        let row = recipes::Entity::find_by_id(recipe_id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find recipe owner")?;
        Ok(row.and_then(|(_, owner)| owner).map(|owner| owner.username))
    }

    async fn find_view(&self, recipe_id: i32) -> Result<Option<RecipeView>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(recipe_id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        let mut views = hydrate(&self.db, vec![model])
            .await
            .context("load recipe details")?;
        Ok(views.pop())
    }

    async fn list_views(&self) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let models = recipes::Entity::find()
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(hydrate(&self.db, models)
            .await
            .context("load recipe details")?)
    }

    async fn list_views_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::UserId.eq(owner_id))
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes by owner")?;
        Ok(hydrate(&self.db, models)
            .await
            .context("load recipe details")?)
    }

    async fn list_views_by_tags(
        &self,
        tags: &[Tag],
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        if tags.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = recipe_tags::Entity::find()
            .select_only()
            .column(recipe_tags::Column::RecipeId)
            .distinct()
            .filter(recipe_tags::Column::Tag.is_in(tags.iter().map(|t| t.as_str())))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find recipe ids by tags")?;
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = recipes::Entity::find()
            .filter(recipes::Column::Id.is_in(ids))
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .context("list recipes by tags")?;
        Ok(hydrate(&self.db, models)
            .await
            .context("load recipe details")?)
    }

    async fn update(
        &self,
        recipe_id: i32,
        patch: &RecipePatch,
    ) -> Result<(), RecipesServiceError> {
        self.db
            .transaction::<_, Result<(), RecipesServiceError>, DbErr>(|txn| {
                let patch = patch.clone();
                Box::pin(async move {
                    let Some(model) = recipes::Entity::find_by_id(recipe_id).one(txn).await?
                    else {
                        return Ok(Err(RecipesServiceError::RecipeNotFound));
                    };

                    let mut recipe = recipe_from_model(model.clone(), vec![], vec![]);
                    patch.apply(&mut recipe);

                    let mut am = model.into_active_model();
                    am.title = Set(recipe.title);
                    am.description = Set(recipe.description);
                    am.prep_time = Set(recipe.prep_time);
                    am.cook_time = Set(recipe.cook_time);
                    am.servings = Set(recipe.servings);
                    am.difficulty = Set(recipe.difficulty);
                    am.steps = Set(recipe.steps);
                    am.image_url = Set(recipe.image_url);
                    am.updated_at = Set(Utc::now());
                    am.update(txn).await?;

                    if patch.tags.is_some() {
                        replace_tags(txn, recipe_id, recipe.tags).await?;
                    }
                    if patch.ingredients.is_some() {
                        replace_ingredients(txn, recipe_id, recipe.ingredients).await?;
                    }
                    Ok(Ok(()))
                })
            })
            .await
            .context("update recipe")?
    }

    async fn delete_cascade(&self, recipe_id: i32) -> Result<(), RecipesServiceError> {
        self.db
            .transaction::<_, Result<(), RecipesServiceError>, DbErr>(|txn| {
                Box::pin(async move {
                    if recipes::Entity::find_by_id(recipe_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Ok(Err(RecipesServiceError::RecipeNotFound));
                    }
                    comments::Entity::delete_many()
                        .filter(comments::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    recipe_upvotes::Entity::delete_many()
                        .filter(recipe_upvotes::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
                        .exec(txn)
                        .await?;
                    recipes::Entity::delete_by_id(recipe_id).exec(txn).await?;
                    Ok(Ok(()))
                })
            })
            .await
            .context("delete recipe cascade")?
    }
}

async fn replace_tags<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    tags: Vec<Tag>,
) -> Result<(), DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(db)
        .await?;
    let rows: Vec<recipe_tags::ActiveModel> = normalize_set(tags)
        .into_iter()
        .map(|tag| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag: Set(tag.as_str().to_owned()),
        })
        .collect();
    if !rows.is_empty() {
        recipe_tags::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}

async fn replace_ingredients<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    ingredients: Vec<Ingredient>,
) -> Result<(), DbErr> {
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(db)
        .await?;
    let rows: Vec<recipe_ingredients::ActiveModel> = normalize_set(ingredients)
        .into_iter()
        .map(|ingredient| recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient: Set(ingredient.as_str().to_owned()),
        })
        .collect();
    if !rows.is_empty() {
        recipe_ingredients::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}

/// Load tags, ingredients, owners, upvote counts and comments for `models`
/// in one batch query per table. Preserves the order of `models`.
async fn hydrate<C: ConnectionTrait>(
    db: &C,
    models: Vec<recipes::Model>,
) -> Result<Vec<RecipeView>, DbErr> {
    if models.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let owner_ids: Vec<i32> = models.iter().map(|m| m.user_id).collect();

    let mut tags: HashMap<i32, Vec<Tag>> = HashMap::new();
    for row in recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
        .all(db)
        .await?
    {
        let tag = row
            .tag
            .parse::<Tag>()
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        tags.entry(row.recipe_id).or_default().push(tag);
    }

    let mut ingredients: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for row in recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
        .all(db)
        .await?
    {
        let ingredient = row
            .ingredient
            .parse::<Ingredient>()
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        ingredients
            .entry(row.recipe_id)
            .or_default()
            .push(ingredient);
    }

    let owners: HashMap<i32, String> = users::Entity::find()
        .filter(users::Column::Id.is_in(owner_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let upvotes: HashMap<i32, i64> = recipe_upvotes::Entity::find()
        .select_only()
        .column(recipe_upvotes::Column::RecipeId)
        .column_as(recipe_upvotes::Column::Id.count(), "upvotes")
        .filter(recipe_upvotes::Column::RecipeId.is_in(ids.iter().copied()))
        .group_by(recipe_upvotes::Column::RecipeId)
        .into_tuple::<(i32, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut comments_by_recipe: HashMap<i32, Vec<Comment>> = HashMap::new();
    for (comment, author) in comments::Entity::find()
        .filter(comments::Column::RecipeId.is_in(ids.iter().copied()))
        .order_by_asc(comments::Column::Id)
        .find_also_related(users::Entity)
        .all(db)
        .await?
    {
        comments_by_recipe
            .entry(comment.recipe_id)
            .or_default()
            .push(comment_from_model(comment, author));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let id = model.id;
            let owner_username = owners.get(&model.user_id).cloned().unwrap_or_default();
            let recipe = recipe_from_model(
                model,
                normalize_set(tags.remove(&id).unwrap_or_default()),
                normalize_set(ingredients.remove(&id).unwrap_or_default()),
            );
            RecipeView {
                recipe,
                owner_username,
                upvotes: upvotes.get(&id).copied().unwrap_or(0).max(0) as u64,
                comments: comments_by_recipe.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

fn recipe_from_model(
    model: recipes::Model,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
) -> Recipe {
    Recipe {
        id: model.id,
        owner_id: model.user_id,
        title: model.title,
        description: model.description,
        prep_time: model.prep_time,
        cook_time: model.cook_time,
        servings: model.servings,
        difficulty: model.difficulty,
        steps: model.steps,
        image_url: model.image_url,
        tags,
        ingredients,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn comment_from_model(model: comments::Model, author: Option<users::Model>) -> Comment {
    Comment {
        id: model.id,
        recipe_id: model.recipe_id,
        author_id: model.user_id,
        author_username: author.map(|a| a.username).unwrap_or_default(),
        text: model.text,
        created_at: model.created_at,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(
        &self,
        recipe_id: i32,
        author_id: i32,
        text: &str,
    ) -> Result<Comment, RecipesServiceError> {
        let result = self
            .db
            .transaction::<_, Result<Comment, RecipesServiceError>, DbErr>(|txn| {
                let text = text.to_owned();
                Box::pin(async move {
                    if recipes::Entity::find_by_id(recipe_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Ok(Err(RecipesServiceError::RecipeNotFound));
                    }
                    let Some(author) = users::Entity::find_by_id(author_id).one(txn).await?
                    else {
                        return Ok(Err(RecipesServiceError::UserNotFound));
                    };
                    let model = comments::ActiveModel {
                        recipe_id: Set(recipe_id),
                        user_id: Set(author_id),
                        text: Set(text),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(Ok(comment_from_model(model, Some(author))))
                })
            })
            .await;

        match result {
            Ok(outcome) => outcome,
            // Recipe deleted between the lookup and the insert.
            Err(TransactionError::Transaction(e)) if e.is_foreign_key_violation() => {
                Err(RecipesServiceError::RecipeNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create comment").into()),
        }
    }
}

// ── Upvote repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUpvoteRepository {
    pub db: DatabaseConnection,
}

impl UpvoteRepository for DbUpvoteRepository {
    async fn toggle(
        &self,
        recipe_id: i32,
        user_id: i32,
    ) -> Result<UpvoteToggle, RecipesServiceError> {
        let result = self
            .db
            .transaction::<_, Result<UpvoteToggle, RecipesServiceError>, DbErr>(|txn| {
                Box::pin(async move {
                    if recipes::Entity::find_by_id(recipe_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Ok(Err(RecipesServiceError::RecipeNotFound));
                    }
                    if users::Entity::find_by_id(user_id).one(txn).await?.is_none() {
                        return Ok(Err(RecipesServiceError::UserNotFound));
                    }

                    let existing = recipe_upvotes::Entity::find()
                        .filter(recipe_upvotes::Column::RecipeId.eq(recipe_id))
                        .filter(recipe_upvotes::Column::UserId.eq(user_id))
                        .one(txn)
                        .await?;
                    let upvoted = match existing {
                        Some(row) => {
                            let deleted = recipe_upvotes::Entity::delete_by_id(row.id)
                                .exec(txn)
                                .await?;
                            if let Err(e) = upvote_removed(deleted) {
                                return Ok(Err(e));
                            }
                            false
                        }
                        None => {
                            recipe_upvotes::ActiveModel {
                                recipe_id: Set(recipe_id),
                                user_id: Set(user_id),
                                created_at: Set(Utc::now()),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?;
                            true
                        }
                    };

                    let upvotes = recipe_upvotes::Entity::find()
                        .filter(recipe_upvotes::Column::RecipeId.eq(recipe_id))
                        .count(txn)
                        .await?;
                    Ok(Ok(UpvoteToggle { upvotes, upvoted }))
                })
            })
            .await;

        match result {
            Ok(outcome) => outcome,
            Err(TransactionError::Transaction(e)) if e.is_unique_violation() => {
                Err(RecipesServiceError::UpvoteConflict)
            }
            Err(TransactionError::Transaction(e)) if e.is_foreign_key_violation() => {
                Err(RecipesServiceError::RecipeNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e).context("toggle upvote").into()),
        }
    }
}

/// A concurrent toggle may delete the row between our read and our delete.
fn upvote_removed(deleted: DeleteResult) -> Result<(), RecipesServiceError> {
    if deleted.rows_affected == 0 {
        return Err(RecipesServiceError::UpvoteConflict);
    }
    Ok(())
}
