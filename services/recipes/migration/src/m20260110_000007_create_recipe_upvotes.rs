use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeUpvotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeUpvotes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeUpvotes::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeUpvotes::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeUpvotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_upvotes_recipe_id")
                            .from(RecipeUpvotes::Table, RecipeUpvotes::RecipeId)
                            .to(Recipes::Table, Recipes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_upvotes_user_id")
                            .from(RecipeUpvotes::Table, RecipeUpvotes::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_recipe_upvotes_recipe_id_user_id")
                    .table(RecipeUpvotes::Table)
                    .col(RecipeUpvotes::RecipeId)
                    .col(RecipeUpvotes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeUpvotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeUpvotes {
    Table,
    Id,
    RecipeId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
