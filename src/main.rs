use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use easybook_api::{
    config::Config,
    password::PasswordHasher,
    store::{DocumentStore, InMemoryStore, MongoStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easybook_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn DocumentStore> = if config.in_memory {
        warn!("using the in-memory store; data is lost on exit");
        Arc::new(InMemoryStore::new())
    } else {
        let uri = config
            .mongodb_uri
            .as_deref()
            .context("MONGODB_URI is required unless --in-memory is set")?;
        let store = MongoStore::connect(uri, &config.database)
            .await
            .context("failed to configure MongoDB client")?;
        store
            .ping()
            .await
            .with_context(|| format!("failed to reach MongoDB database {}", config.database))?;
        info!(database = %config.database, "connected to MongoDB");
        Arc::new(store)
    };

    let state = AppState::new(store, PasswordHasher::new(config.bcrypt_cost))
        .with_strict_login_status(config.strict_login_status);
    let app = easybook_api::router(state, &config.static_dir, config.allowed_origin()?);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, static_dir = %config.static_dir.display(), "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
