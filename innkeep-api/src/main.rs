use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use innkeep_api::{app, AppState, AuthConfig};
use innkeep_store::{
    app_config::Config, DbClient, MemoryStore, StoreBookingRepository, StoreContactRepository,
    StoreRoomRepository, StoreUserRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `database.url = "memory"` runs against the in-process store.
const MEMORY_DATABASE_URL: &str = "memory";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "innkeep_api=debug,innkeep_core=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Innkeep API on port {}", config.server.port);

    let auth = AuthConfig {
        secret: config.auth.jwt_secret.clone(),
        expiration: config.auth.jwt_expiration_seconds,
    };

    let app_state = if config.database.url == MEMORY_DATABASE_URL {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        AppState::with_store(Arc::new(MemoryStore::new()), auth)
    } else {
        let db = DbClient::new(&config.database)
            .await
            .context("Failed to connect to Postgres")?;
        if config.database.run_migrations {
            db.migrate().await.context("Failed to run migrations")?;
        }

        AppState::new(
            Arc::new(StoreRoomRepository::new(db.pool.clone())),
            Arc::new(StoreBookingRepository::new(db.pool.clone())),
            Arc::new(StoreUserRepository::new(db.pool.clone())),
            Arc::new(StoreContactRepository::new(db.pool)),
            auth,
        )
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
