use std::env;

use tracing::warn;

// Fallback secret for local dev. Set JWT_SECRET in production.
const DEFAULT_JWT_SECRET: &str = "your_secret_key_here";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: StorageBackend,
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub enum StorageBackend {
    Sqlite { url: String },
    Memory,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_owned())
            .parse()?;

        // Backend selection is explicit: STORAGE wins, otherwise the presence
        // of DATABASE_URL decides. Never a silent fallback after a failed
        // connection.
        let storage = match env::var("STORAGE").ok().as_deref() {
            Some("memory") => StorageBackend::Memory,
            Some("sqlite") => StorageBackend::Sqlite {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:ideashare.db".to_owned()),
            },
            Some(other) => anyhow::bail!("unknown STORAGE backend: {other}"),
            None => match env::var("DATABASE_URL") {
                Ok(url) => StorageBackend::Sqlite { url },
                Err(_) => StorageBackend::Memory,
            },
        };

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using built-in default");
            DEFAULT_JWT_SECRET.to_owned()
        });

        Ok(Self {
            port,
            storage,
            jwt_secret,
        })
    }
}
