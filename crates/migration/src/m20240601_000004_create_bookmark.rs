//! Create `bookmark` table linking `account` and `counselor`.
//!
//! The (account_id, counselor_id) unique index lives in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(uuid(Bookmark::Id).primary_key())
                    .col(uuid(Bookmark::AccountId).not_null())
                    .col(uuid(Bookmark::CounselorId).not_null())
                    .col(timestamp_with_time_zone(Bookmark::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_account")
                            .from(Bookmark::Table, Bookmark::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_counselor")
                            .from(Bookmark::Table, Bookmark::CounselorId)
                            .to(Counselor::Table, Counselor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookmark::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookmark { Table, Id, AccountId, CounselorId, CreatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }

#[derive(DeriveIden)]
enum Counselor { Table, Id }
