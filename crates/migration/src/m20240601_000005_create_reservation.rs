use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(uuid(Reservation::Id).primary_key())
                    .col(uuid(Reservation::AccountId).not_null())
                    .col(uuid(Reservation::CounselorId).not_null())
                    .col(date(Reservation::CounselDate).not_null())
                    .col(time(Reservation::CounselTime).not_null())
                    .col(ColumnDef::new(Reservation::Location).string_len(255).null())
                    .col(string_len(Reservation::Status, 32).not_null())
                    .col(timestamp_with_time_zone(Reservation::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_account")
                            .from(Reservation::Table, Reservation::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_counselor")
                            .from(Reservation::Table, Reservation::CounselorId)
                            .to(Counselor::Table, Counselor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservation { Table, Id, AccountId, CounselorId, CounselDate, CounselTime, Location, Status, CreatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }

#[derive(DeriveIden)]
enum Counselor { Table, Id }
