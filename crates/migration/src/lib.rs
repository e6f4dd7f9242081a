//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_account;
mod m20240601_000002_create_counselor;
mod m20240601_000003_create_counseling_field;
mod m20240601_000004_create_bookmark;
mod m20240601_000005_create_reservation;
mod m20240601_000006_create_consult_detail;
mod m20240601_000007_create_review;
mod m20240601_000008_create_review_tag;
mod m20240601_000009_add_indexes;
mod m20240601_000010_add_reservation_slot_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_account::Migration),
            Box::new(m20240601_000002_create_counselor::Migration),
            Box::new(m20240601_000003_create_counseling_field::Migration),
            Box::new(m20240601_000004_create_bookmark::Migration),
            Box::new(m20240601_000005_create_reservation::Migration),
            Box::new(m20240601_000006_create_consult_detail::Migration),
            Box::new(m20240601_000007_create_review::Migration),
            Box::new(m20240601_000008_create_review_tag::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000009_add_indexes::Migration),
            Box::new(m20240601_000010_add_reservation_slot_index::Migration),
        ]
    }
}
