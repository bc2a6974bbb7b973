//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use reqwest::Url;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use faishion_backend::inbound::http::health::HealthState;
use faishion_backend::outbound::persistence::{DbPool, PoolConfig};
use faishion_backend::outbound::suggestion::SuggestionClientConfig;
use server::{create_server, run_migrations, ServerConfig};

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn load_suggestion_config() -> std::io::Result<Option<SuggestionClientConfig>> {
    let Ok(endpoint) = env::var("SUGGESTION_ENDPOINT") else {
        return Ok(None);
    };
    let endpoint = Url::parse(&endpoint)
        .map_err(|e| std::io::Error::other(format!("invalid SUGGESTION_ENDPOINT: {e}")))?;

    let mut config = SuggestionClientConfig::new(endpoint, env::var("SUGGESTION_API_KEY").ok());
    if let Ok(model) = env::var("SUGGESTION_MODEL") {
        config = config.with_model(model);
    }
    Ok(Some(config))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        run_migrations(&database_url).await?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; using in-memory stores (dev only)");
    }

    if let Some(suggestion) = load_suggestion_config()? {
        config = config.with_suggestion_endpoint(suggestion);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting server");
    let server = create_server(health_state, config)?;
    server.await
}
