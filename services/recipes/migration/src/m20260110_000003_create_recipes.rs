use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipes::UserId).integer().not_null())
                    .col(ColumnDef::new(Recipes::Title).string().not_null())
                    .col(ColumnDef::new(Recipes::Description).text().not_null())
                    .col(ColumnDef::new(Recipes::PrepTime).integer().not_null())
                    .col(ColumnDef::new(Recipes::CookTime).integer().not_null())
                    .col(ColumnDef::new(Recipes::Servings).integer().not_null())
                    .col(ColumnDef::new(Recipes::Difficulty).integer().not_null())
                    .col(ColumnDef::new(Recipes::Steps).text().not_null())
                    .col(ColumnDef::new(Recipes::ImageUrl).string())
                    .col(
                        ColumnDef::new(Recipes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Recipes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipes_user_id")
                            .from(Recipes::Table, Recipes::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    UserId,
    Title,
    Description,
    PrepTime,
    CookTime,
    Servings,
    Difficulty,
    Steps,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
