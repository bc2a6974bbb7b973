//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use faishion_backend::outbound::persistence::DbPool;
use faishion_backend::outbound::suggestion::SuggestionClientConfig;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) suggestion: Option<SuggestionClientConfig>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            suggestion: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server falls back to in-memory stores, which is only
    /// suitable for local development.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach connection settings for the AI suggestion endpoint.
    ///
    /// Without them, image captions answer 503 and recommendations degrade
    /// to `null`.
    #[must_use]
    pub fn with_suggestion_endpoint(mut self, suggestion: SuggestionClientConfig) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
