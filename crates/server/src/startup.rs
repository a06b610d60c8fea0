use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use service::auth::{repo::SeaOrmAuthRepository, AuthConfig, AuthService};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

/// Assemble state and router around an already migrated database.
pub fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Router {
    let state = build_state(cfg, db);
    routes::build_router(state, routes::build_cors())
}

fn build_state(cfg: &AppConfig, db: DatabaseConnection) -> ServerState {
    let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
    let auth = AuthService::new(
        repo,
        AuthConfig {
            jwt_secret: cfg.security.jwt_secret.clone(),
            token_ttl_minutes: cfg.security.token_ttl_minutes,
        },
    );
    ServerState { db, auth: Arc::new(auth), security_enabled: cfg.security.enabled }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Creates the configured administrator with every role if it is missing.
async fn bootstrap_admin(cfg: &AppConfig, state: &ServerState) -> Result<(), StartupError> {
    let Some((username, password)) = cfg.security.bootstrap_admin() else {
        return Ok(());
    };
    let created = state
        .auth
        .ensure_user(username, password)
        .await
        .map_err(|e| StartupError::Bootstrap(e.to_string()))?;
    if created {
        info!(%username, "bootstrap admin created");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: load config, migrate the database and serve until Ctrl+C.
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::utils::logging::init_logging(cfg.logging.format);

    if cfg.security.enabled && cfg.security.jwt_secret == configs::DEFAULT_JWT_SECRET {
        warn!("security.jwt_secret is the development default; set JWT_SECRET");
    }
    if !cfg.security.enabled {
        warn!("security disabled: every caller holds every role");
    }

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::migrate(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;

    let state = build_state(&cfg, db);
    bootstrap_admin(&cfg, &state).await?;
    let app = routes::build_router(state, routes::build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    info!("server stopped");
    Ok(())
}
