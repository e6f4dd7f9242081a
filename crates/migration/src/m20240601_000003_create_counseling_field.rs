//! Create `counseling_field` table with FK to `counselor`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CounselingField::Table)
                    .if_not_exists()
                    .col(uuid(CounselingField::Id).primary_key())
                    .col(uuid(CounselingField::CounselorId).not_null())
                    .col(string_len(CounselingField::Field, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_counseling_field_counselor")
                            .from(CounselingField::Table, CounselingField::CounselorId)
                            .to(Counselor::Table, Counselor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CounselingField::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CounselingField { Table, Id, CounselorId, Field }

#[derive(DeriveIden)]
enum Counselor { Table, Id }
