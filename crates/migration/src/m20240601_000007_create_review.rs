use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(uuid(Review::AccountId).not_null())
                    .col(uuid(Review::CounselorId).not_null())
                    .col(string_len(Review::Title, 100).not_null())
                    .col(text(Review::Content).not_null())
                    .col(double(Review::Rating).not_null())
                    .col(integer(Review::RecommendationCount).not_null().default(0))
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_account")
                            .from(Review::Table, Review::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_counselor")
                            .from(Review::Table, Review::CounselorId)
                            .to(Counselor::Table, Counselor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review { Table, Id, AccountId, CounselorId, Title, Content, Rating, RecommendationCount, CreatedAt }

#[derive(DeriveIden)]
enum Account { Table, Id }

#[derive(DeriveIden)]
enum Counselor { Table, Id }
