use std::sync::Arc;

use ideashare::{
    auth::JwtKeys,
    config::{Config, StorageBackend},
    store::{DynStore, MemoryStore, SqliteStore},
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: DynStore = match &config.storage {
        StorageBackend::Sqlite { url } => Arc::new(SqliteStore::connect(url).await?),
        StorageBackend::Memory => {
            info!("using in-memory storage, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };
    info!("storage backend: {}", store.backend());

    let app = ideashare::app(AppState {
        store,
        jwt: JwtKeys::new(&config.jwt_secret),
    });

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("IdeaShare API listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
