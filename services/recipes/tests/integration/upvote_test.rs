use recipedb_recipes::error::RecipesServiceError;
use recipedb_recipes::usecase::recipe::CreateRecipeUseCase;
use recipedb_recipes::usecase::upvote::ToggleUpvoteUseCase;

use crate::helpers::{MockStore, current_user, recipe_input, seed_user};

async fn seeded_recipe(store: &MockStore) -> i32 {
    let owner = seed_user(store, "alice");
    CreateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(&current_user(&owner), recipe_input("Stew", vec![]))
    .await
    .unwrap()
    .recipe
    .id
}

#[tokio::test]
async fn should_upvote_then_restore_on_second_toggle() {
    let store = MockStore::new();
    let recipe_id = seeded_recipe(&store).await;
    let bob = current_user(&seed_user(&store, "bob"));
    let usecase = ToggleUpvoteUseCase {
        upvotes: store.clone(),
    };

    let first = usecase.execute(recipe_id, &bob).await.unwrap();
    assert_eq!((first.upvotes, first.upvoted), (1, true));

    let second = usecase.execute(recipe_id, &bob).await.unwrap();
    assert_eq!((second.upvotes, second.upvoted), (0, false));
    assert!(store.with(|s| s.upvotes.is_empty()));
}

#[tokio::test]
async fn should_count_upvotes_across_users() {
    let store = MockStore::new();
    let recipe_id = seeded_recipe(&store).await;
    let bob = current_user(&seed_user(&store, "bob"));
    let carol = current_user(&seed_user(&store, "carol"));
    let usecase = ToggleUpvoteUseCase {
        upvotes: store.clone(),
    };

    usecase.execute(recipe_id, &bob).await.unwrap();
    let toggle = usecase.execute(recipe_id, &carol).await.unwrap();
    assert_eq!(toggle.upvotes, 2);
    assert!(toggle.upvoted);

    let toggle = usecase.execute(recipe_id, &bob).await.unwrap();
    assert_eq!(toggle.upvotes, 1);
    assert!(!toggle.upvoted);
}

#[tokio::test]
async fn should_let_owner_upvote_own_recipe() {
    let store = MockStore::new();
    let recipe_id = seeded_recipe(&store).await;
    let alice = store.with(|s| s.users[0].clone());

    let toggle = ToggleUpvoteUseCase {
        upvotes: store.clone(),
    }
    .execute(recipe_id, &current_user(&alice))
    .await
    .unwrap();
    assert_eq!(toggle.upvotes, 1);
}

#[tokio::test]
async fn should_fail_on_missing_recipe() {
    let store = MockStore::new();
    let bob = current_user(&seed_user(&store, "bob"));

    let result = ToggleUpvoteUseCase { upvotes: store }
        .execute(42, &bob)
        .await;
    assert!(
        matches!(result, Err(RecipesServiceError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_surface_concurrent_toggle_as_conflict() {
    let store = MockStore::new();
    let recipe_id = seeded_recipe(&store).await;
    let bob = current_user(&seed_user(&store, "bob"));
    store.with(|s| s.conflict_next_toggle = true);
    let usecase = ToggleUpvoteUseCase {
        upvotes: store.clone(),
    };

    let result = usecase.execute(recipe_id, &bob).await;
    assert!(matches!(result, Err(RecipesServiceError::UpvoteConflict)));

    // retry succeeds and nothing was half-applied
    let toggle = usecase.execute(recipe_id, &bob).await.unwrap();
    assert_eq!((toggle.upvotes, toggle.upvoted), (1, true));
}
