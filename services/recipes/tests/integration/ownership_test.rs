use recipedb_recipes::error::RecipesServiceError;
use recipedb_recipes::usecase::ownership::RecipeOwnershipGuard;
use recipedb_recipes::usecase::recipe::CreateRecipeUseCase;

use crate::helpers::{MockStore, current_user, recipe_input, seed_user};

async fn seeded() -> (MockStore, i32) {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");
    seed_user(&store, "bob");
    let view = CreateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(&current_user(&alice), recipe_input("Soup", vec![]))
    .await
    .unwrap();
    (store, view.recipe.id)
}

#[tokio::test]
async fn should_grant_exact_owner() {
    let (store, recipe_id) = seeded().await;
    let guard = RecipeOwnershipGuard { recipes: store };

    assert!(guard.is_owner(recipe_id, "alice").await.unwrap());
    guard.ensure_owner(recipe_id, "alice").await.unwrap();
}

#[tokio::test]
async fn should_deny_other_user() {
    let (store, recipe_id) = seeded().await;
    let guard = RecipeOwnershipGuard { recipes: store };

    assert!(!guard.is_owner(recipe_id, "bob").await.unwrap());
    let result = guard.ensure_owner(recipe_id, "bob").await;
    assert!(
        matches!(result, Err(RecipesServiceError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_compare_usernames_case_sensitively() {
    let (store, recipe_id) = seeded().await;
    let guard = RecipeOwnershipGuard { recipes: store };

    assert!(!guard.is_owner(recipe_id, "Alice").await.unwrap());
    assert!(!guard.is_owner(recipe_id, "alice ").await.unwrap());
}

#[tokio::test]
async fn should_deny_missing_recipe() {
    let (store, _) = seeded().await;
    let guard = RecipeOwnershipGuard { recipes: store };

    assert!(!guard.is_owner(9999, "alice").await.unwrap());
    assert!(matches!(
        guard.ensure_owner(9999, "alice").await,
        Err(RecipesServiceError::Forbidden)
    ));
}
