use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipeTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RecipeTags::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeTags::Tag).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(RecipeTags::RecipeId)
                            .col(RecipeTags::Tag),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_tags_recipe_id")
                            .from(RecipeTags::Table, RecipeTags::RecipeId)
                            .to(Recipes::Table, Recipes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeTags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    RecipeId,
    Tag,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
