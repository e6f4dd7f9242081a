use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Counselor::Table)
                    .if_not_exists()
                    .col(uuid(Counselor::Id).primary_key())
                    .col(string_len(Counselor::Name, 64).not_null())
                    .col(ColumnDef::new(Counselor::Introduction).text().null())
                    .col(timestamp_with_time_zone(Counselor::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Counselor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Counselor { Table, Id, Name, Introduction, CreatedAt }
