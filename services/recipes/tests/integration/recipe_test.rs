use recipedb_domain::tag::Tag;
use recipedb_recipes::domain::types::{RecipePatch, STEPS_MAX_LEN};
use recipedb_recipes::error::RecipesServiceError;
use recipedb_recipes::usecase::comment::AddCommentUseCase;
use recipedb_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesByOwnerUseCase,
    ListRecipesByTagsUseCase, ListRecipesUseCase, UpdateRecipeUseCase,
};
use recipedb_recipes::usecase::upvote::ToggleUpvoteUseCase;

use crate::helpers::{MockStore, current_user, recipe_input, seed_user};

async fn create(store: &MockStore, owner: &str, title: &str, tags: Vec<Tag>) -> i32 {
    let user = store
        .with(|s| s.users.iter().find(|u| u.username == owner).cloned())
        .unwrap_or_else(|| seed_user(store, owner));
    CreateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(&current_user(&user), recipe_input(title, tags))
    .await
    .unwrap()
    .recipe
    .id
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_normalized_sets() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");

    let view = CreateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(
        &current_user(&alice),
        recipe_input("Salad", vec![Tag::Keto, Tag::Vegan, Tag::Keto]),
    )
    .await
    .unwrap();

    assert_eq!(view.owner_username, "alice");
    assert_eq!(view.recipe.owner_id, alice.id);
    assert_eq!(view.recipe.tags, vec![Tag::Vegan, Tag::Keto]);
    assert_eq!(view.upvotes, 0);
    assert!(view.comments.is_empty());
}

#[tokio::test]
async fn should_reject_invalid_recipe_without_storing() {
    let store = MockStore::new();
    let alice = current_user(&seed_user(&store, "alice"));
    let usecase = CreateRecipeUseCase {
        recipes: store.clone(),
    };

    assert!(matches!(
        usecase.execute(&alice, recipe_input("  ", vec![])).await,
        Err(RecipesServiceError::Validation(_))
    ));

    let mut negative = recipe_input("Bread", vec![]);
    negative.servings = -1;
    let err = usecase.execute(&alice, negative).await.unwrap_err();
    assert_eq!(err.to_string(), "servings must not be negative");

    let mut long = recipe_input("Bread", vec![]);
    long.steps = "s".repeat(STEPS_MAX_LEN + 1);
    assert!(matches!(
        usecase.execute(&alice, long).await,
        Err(RecipesServiceError::Validation(_))
    ));

    assert!(store.with(|s| s.recipes.is_empty()));
}

// ── Get / List ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_get_for_missing_recipe() {
    let result = GetRecipeUseCase {
        recipes: MockStore::new(),
    }
    .execute(1)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_list_all_recipes() {
    let store = MockStore::new();
    create(&store, "alice", "One", vec![]).await;
    create(&store, "bob", "Two", vec![]).await;

    let views = ListRecipesUseCase { recipes: store }.execute().await.unwrap();
    let titles: Vec<_> = views.iter().map(|v| v.recipe.title.as_str()).collect();
    assert_eq!(titles, ["One", "Two"]);
}

#[tokio::test]
async fn should_list_recipes_by_owner() {
    let store = MockStore::new();
    create(&store, "alice", "Mine", vec![]).await;
    create(&store, "bob", "Theirs", vec![]).await;
    let usecase = ListRecipesByOwnerUseCase {
        users: store.clone(),
        recipes: store.clone(),
    };

    let views = usecase.execute("alice").await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].recipe.title, "Mine");

    let result = usecase.execute("nobody").await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_list_recipes_with_any_requested_tag() {
    let store = MockStore::new();
    create(&store, "alice", "A", vec![Tag::Vegan]).await;
    create(&store, "alice", "B", vec![Tag::Keto, Tag::Vegan]).await;
    create(&store, "alice", "C", vec![Tag::Dessert]).await;
    let usecase = ListRecipesByTagsUseCase {
        recipes: store.clone(),
    };

    let titles = |views: Vec<recipedb_recipes::domain::types::RecipeView>| {
        views
            .into_iter()
            .map(|v| v.recipe.title)
            .collect::<Vec<_>>()
    };

    assert_eq!(titles(usecase.execute(vec![Tag::Vegan]).await.unwrap()), ["A", "B"]);
    assert_eq!(titles(usecase.execute(vec![Tag::Keto]).await.unwrap()), ["B"]);
    assert_eq!(
        titles(usecase.execute(vec![Tag::Keto, Tag::Dessert]).await.unwrap()),
        ["B", "C"]
    );
    assert!(usecase.execute(vec![Tag::Paleo]).await.unwrap().is_empty());
    assert!(usecase.execute(vec![]).await.unwrap().is_empty());
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_only_present_fields() {
    let store = MockStore::new();
    let id = create(&store, "alice", "Chili", vec![Tag::HighProtein]).await;
    let before = store.with(|s| s.recipes[0].clone());

    let view = UpdateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(
        id,
        RecipePatch {
            title: Some("Chili con carne".into()),
            cook_time: Some(90),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(view.recipe.title, "Chili con carne");
    assert_eq!(view.recipe.cook_time, 90);
    assert_eq!(view.recipe.description, before.description);
    assert_eq!(view.recipe.tags, before.tags);
    assert_eq!(view.recipe.ingredients, before.ingredients);
    assert_eq!(view.recipe.created_at, before.created_at);
}

#[tokio::test]
async fn should_clear_tags_with_empty_list() {
    let store = MockStore::new();
    let id = create(&store, "alice", "Tofu bowl", vec![Tag::Vegan, Tag::LowCarb]).await;

    let view = UpdateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(
        id,
        RecipePatch {
            tags: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(view.recipe.tags.is_empty());
    assert_eq!(view.recipe.ingredients.len(), 2);
}

#[tokio::test]
async fn should_return_recipe_unchanged_for_empty_patch() {
    let store = MockStore::new();
    let id = create(&store, "alice", "Toast", vec![]).await;
    let before = store.with(|s| s.recipes[0].clone());

    let view = UpdateRecipeUseCase { recipes: store }
        .execute(id, RecipePatch::default())
        .await
        .unwrap();
    assert_eq!(view.recipe, before);
}

#[tokio::test]
async fn should_reject_invalid_patch() {
    let store = MockStore::new();
    let id = create(&store, "alice", "Toast", vec![]).await;

    let result = UpdateRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(
        id,
        RecipePatch {
            prep_time: Some(-5),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(RecipesServiceError::Validation(_))));
    assert_eq!(store.with(|s| s.recipes[0].prep_time), 10);
}

#[tokio::test]
async fn should_fail_update_for_missing_recipe() {
    let result = UpdateRecipeUseCase {
        recipes: MockStore::new(),
    }
    .execute(
        3,
        RecipePatch {
            servings: Some(2),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_recipe_with_comments_and_upvotes() {
    let store = MockStore::new();
    let id = create(&store, "alice", "Gone soon", vec![Tag::Vegan]).await;
    let keep = create(&store, "alice", "Stays", vec![]).await;
    let bob = current_user(&seed_user(&store, "bob"));

    AddCommentUseCase {
        comments: store.clone(),
    }
    .execute(id, &bob, "nice")
    .await
    .unwrap();
    ToggleUpvoteUseCase {
        upvotes: store.clone(),
    }
    .execute(id, &bob)
    .await
    .unwrap();
    ToggleUpvoteUseCase {
        upvotes: store.clone(),
    }
    .execute(keep, &bob)
    .await
    .unwrap();

    DeleteRecipeUseCase {
        recipes: store.clone(),
    }
    .execute(id)
    .await
    .unwrap();

    store.with(|s| {
        assert_eq!(s.recipes.len(), 1);
        assert!(s.comments.is_empty());
        assert_eq!(s.upvotes.len(), 1);
    });
    let result = GetRecipeUseCase { recipes: store }.execute(id).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_fail_delete_for_missing_recipe() {
    let result = DeleteRecipeUseCase {
        recipes: MockStore::new(),
    }
    .execute(11)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}
