use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::repo::SeaOrmRepository;
use service::token::TokenCodec;
use service::{Services, Store};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the pool, optionally migrate, and wire services over it.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
        info!(event = "migrated", "database schema up to date");
    } else {
        warn!("database.run_migrations = false; assuming schema is current");
    }

    let tokens = TokenCodec::new(&cfg.auth.jwt_secret, cfg.auth.token_ttl_hours);
    let store: Arc<dyn Store> = Arc::new(SeaOrmRepository::new(db));
    Ok(ServerState { services: Services::new(store, tokens.clone()), tokens })
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Serve with an already loaded config until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.data_dir).await?;

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
        })
        .await?;
    Ok(())
}

/// Public entry: load config (file or env) and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    serve(cfg).await
}
