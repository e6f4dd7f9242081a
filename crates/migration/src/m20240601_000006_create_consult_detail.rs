//! Create `consult_detail` table: one row per finished consultation.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsultDetail::Table)
                    .if_not_exists()
                    .col(uuid(ConsultDetail::Id).primary_key())
                    .col(uuid(ConsultDetail::AccountId).not_null())
                    .col(uuid(ConsultDetail::ReservationId).not_null())
                    .col(ColumnDef::new(ConsultDetail::Content).text().null())
                    .col(timestamp_with_time_zone(ConsultDetail::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consult_detail_account")
                            .from(ConsultDetail::Table, ConsultDetail::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consult_detail_reservation")
                            .from(ConsultDetail::Table, ConsultDetail::ReservationId)
                            .to(Reservation::Table, Reservation::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ConsultDetail::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ConsultDetail { Table, Id, AccountId, ReservationId, Content, CreatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }

#[derive(DeriveIden)]
enum Reservation { Table, Id }
