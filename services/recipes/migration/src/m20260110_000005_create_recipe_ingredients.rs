use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeIngredients::RecipeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipeIngredients::Ingredient)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RecipeIngredients::RecipeId)
                            .col(RecipeIngredients::Ingredient),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_ingredients_recipe_id")
                            .from(RecipeIngredients::Table, RecipeIngredients::RecipeId)
                            .to(Recipes::Table, Recipes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeIngredients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeIngredients {
    Table,
    RecipeId,
    Ingredient,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
