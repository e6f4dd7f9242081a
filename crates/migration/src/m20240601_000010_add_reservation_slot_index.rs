use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// 同一咨询师同一时段只允许一条未取消的预约；部分唯一索引 sea-query 无法直接表达，使用原生 SQL
const CREATE_SLOT_UNIQUE: &str = "CREATE UNIQUE INDEX IF NOT EXISTS uniq_reservation_counselor_slot \
     ON reservation (counselor_id, counsel_date, counsel_time) WHERE status <> 'cancelled'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 替换之前的普通索引
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reservation_counselor_slot")
                    .table(Reservation::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager.get_connection().execute_unprepared(CREATE_SLOT_UNIQUE).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_reservation_counselor_slot")
                    .table(Reservation::Table)
                    .if_exists()
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
            .await
    }
}

#[derive(DeriveIden)]
enum Reservation { Table, CounselorId, CounselDate, CounselTime }
