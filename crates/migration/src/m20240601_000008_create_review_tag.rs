//! Create `review_tag` and the `review_tag_map` join table.
//!
//! Tags are shared across reviews and identified by name.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReviewTag::Table)
                    .if_not_exists()
                    .col(uuid(ReviewTag::Id).primary_key())
                    .col(string_len(ReviewTag::Name, 32).unique_key().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewTagMap::Table)
                    .if_not_exists()
                    .col(uuid(ReviewTagMap::ReviewId).not_null())
                    .col(uuid(ReviewTagMap::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .col(ReviewTagMap::ReviewId)
                            .col(ReviewTagMap::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_tag_map_review")
                            .from(ReviewTagMap::Table, ReviewTagMap::ReviewId)
                            .to(Review::Table, Review::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_tag_map_tag")
                            .from(ReviewTagMap::Table, ReviewTagMap::TagId)
                            .to(ReviewTag::Table, ReviewTag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ReviewTagMap::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ReviewTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ReviewTag { Table, Id, Name }

#[derive(DeriveIden)]
enum ReviewTagMap { Table, ReviewId, TagId }

#[derive(DeriveIden)]
enum Review { Table, Id }
