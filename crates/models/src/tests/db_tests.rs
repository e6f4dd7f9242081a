use crate::db::test_connection;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::test_db;

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    test_connection(&db).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT current_database()".to_string());
    let result = db.query_one(stmt).await?;
    assert!(result.is_some());
    Ok(())
}

/// Every table created by the migrator is queryable
#[tokio::test]
async fn test_schema_tables_exist() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    for table in ["account", "counselor", "counseling_field", "bookmark", "reservation", "consult_detail", "review", "review_tag", "review_tag_map"] {
        let stmt = Statement::from_string(DatabaseBackend::Postgres, format!("SELECT COUNT(*) FROM {table}"));
        let row = db.query_one(stmt).await?;
        assert!(row.is_some(), "table {table} not queryable");
    }
    Ok(())
}
