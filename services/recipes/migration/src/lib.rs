use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users;
mod m20260110_000002_create_sessions;
mod m20260110_000003_create_recipes;
mod m20260110_000004_create_recipe_tags;
mod m20260110_000005_create_recipe_ingredients;
mod m20260110_000006_create_comments;
mod m20260110_000007_create_recipe_upvotes;
mod m20260110_000008_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users::Migration),
            Box::new(m20260110_000002_create_sessions::Migration),
            Box::new(m20260110_000003_create_recipes::Migration),
            Box::new(m20260110_000004_create_recipe_tags::Migration),
            Box::new(m20260110_000005_create_recipe_ingredients::Migration),
            Box::new(m20260110_000006_create_comments::Migration),
            Box::new(m20260110_000007_create_recipe_upvotes::Migration),
            Box::new(m20260110_000008_add_lookup_indexes::Migration),
        ]
    }
}
