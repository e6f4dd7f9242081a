#![cfg(test)]
use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use models::db::{connect_with_config, DatabaseConfig};

// migrations run once per test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Fresh migrated connection, or `None` when no database is configured.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: DATABASE_URL not set or SKIP_DB_TESTS present");
        return None;
    }
    let cfg = DatabaseConfig {
        min_connections: 1,
        connect_timeout: Duration::from_secs(5),
        acquire_timeout: Duration::from_secs(10),
        ..DatabaseConfig::from_file().unwrap_or_else(DatabaseConfig::from_env)
    };
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !migrated {
        eprintln!("skip: cannot connect or migrate");
        return None;
    }
    connect_with_config(&cfg).await.ok()
}
