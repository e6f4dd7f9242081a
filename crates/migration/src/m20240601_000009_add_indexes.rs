use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bookmark: one row per (account, counselor); backs ON CONFLICT DO NOTHING
        manager
            .create_index(
                Index::create()
                    .name("uniq_bookmark_account_counselor")
                    .table(Bookmark::Table)
                    .col(Bookmark::AccountId)
                    .col(Bookmark::CounselorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // CounselingField: lookups by counselor
        manager
            .create_index(
                Index::create()
                    .name("idx_counseling_field_counselor")
                    .table(CounselingField::Table)
                    .col(CounselingField::CounselorId)
                    .to_owned(),
            )
            .await?;

        // Reservation: per-account listing and per-counselor slot checks
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_account")
                    .table(Reservation::Table)
                    .col(Reservation::AccountId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_counselor_slot")
                    .table(Reservation::Table)
                    .col(Reservation::CounselorId)
                    .col(Reservation::CounselDate)
                    .col(Reservation::CounselTime)
                    .to_owned(),
            )
            .await?;

        // ConsultDetail: history by account
        manager
            .create_index(
                Index::create()
                    .name("idx_consult_detail_account")
                    .table(ConsultDetail::Table)
                    .col(ConsultDetail::AccountId)
                    .to_owned(),
            )
            .await?;

        // Review: listing by counselor
        manager
            .create_index(
                Index::create()
                    .name("idx_review_counselor")
                    .table(Review::Table)
                    .col(Review::CounselorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_bookmark_account_counselor").table(Bookmark::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_counseling_field_counselor").table(CounselingField::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_account").table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_counselor_slot").table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_consult_detail_account").table(ConsultDetail::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_counselor").table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookmark { Table, AccountId, CounselorId }

#[derive(DeriveIden)]
enum CounselingField { Table, CounselorId }

#[derive(DeriveIden)]
enum Reservation { Table, AccountId, CounselorId, CounselDate, CounselTime }

#[derive(DeriveIden)]
enum ConsultDetail { Table, AccountId }

#[derive(DeriveIden)]
enum Review { Table, CounselorId }
