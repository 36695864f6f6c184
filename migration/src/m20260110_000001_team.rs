use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(pk_auto(Team::Id))
                    .col(big_integer_uniq(Team::TeamId))
                    .col(string(Team::Name))
                    .col(string(Team::Abbreviation))
                    .col(string(Team::Location))
                    .col(string_null(Team::Conference))
                    .col(string_null(Team::Division))
                    .col(timestamp(Team::CreatedAt))
                    .col(timestamp(Team::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Team {
    Table,
    Id,
    TeamId,
    Name,
    Abbreviation,
    Location,
    Conference,
    Division,
    CreatedAt,
    UpdatedAt,
}
