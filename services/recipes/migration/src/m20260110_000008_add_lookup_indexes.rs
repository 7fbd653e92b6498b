use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::UserId)
                    .name("idx_recipes_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RecipeTags::Table)
                    .col(RecipeTags::Tag)
                    .name("idx_recipe_tags_tag")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::RecipeId)
                    .name("idx_comments_recipe_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Sessions::Table)
                    .col(Sessions::UserId)
                    .name("idx_sessions_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_sessions_user_id",
            "idx_comments_recipe_id",
            "idx_recipe_tags_tag",
            "idx_recipes_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    UserId,
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    Tag,
}

#[derive(Iden)]
enum Comments {
    Table,
    RecipeId,
}

#[derive(Iden)]
enum Sessions {
    Table,
    UserId,
}
