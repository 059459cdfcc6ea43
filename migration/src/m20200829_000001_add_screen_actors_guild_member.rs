use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Actors::Table)
                    .add_column(boolean(Actors::ScreenActorsGuildMember).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Actors::Table)
                    .drop_column(Actors::ScreenActorsGuildMember)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Actors {
    Table,
    ScreenActorsGuildMember,
}
