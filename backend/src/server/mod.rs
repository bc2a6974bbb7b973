//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::info;
use utoipa::OpenApi;

use faishion_backend::doc::ApiDoc;
use faishion_backend::domain::ports::SuggestionSource;
use faishion_backend::domain::{AccountService, OutfitService, WardrobeService};
use faishion_backend::inbound::http::accounts::{login, logout, register};
use faishion_backend::inbound::http::health::{live, ready, HealthState};
use faishion_backend::inbound::http::outfits::{create_outfit, list_outfits, recommend};
use faishion_backend::inbound::http::state::HttpState;
use faishion_backend::inbound::http::wardrobe::{
    add_item, delete_item, get_item, list_items, update_item,
};
use faishion_backend::outbound::memory::{
    MemoryAccountRepository, MemoryOutfitRepository, MemoryWardrobeRepository,
};
use faishion_backend::outbound::persistence::{
    DieselAccountRepository, DieselOutfitRepository, DieselWardrobeRepository,
};
use faishion_backend::outbound::suggestion::{HttpSuggestionSource, UnconfiguredSuggestionSource};
use faishion_backend::Trace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a blocking wrapper around the async
/// connection; Diesel's migration harness is synchronous.
///
/// # Errors
///
/// Propagates connection and migration failures as [`std::io::Error`].
pub async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
        use diesel_async::AsyncPgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
            .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
        info!(count = applied.len(), "migrations applied");
        Ok(())
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task panicked: {err}")))?
}

fn build_suggestion_source(config: &mut ServerConfig) -> std::io::Result<Arc<dyn SuggestionSource>> {
    match config.suggestion.take() {
        Some(settings) => {
            let source = HttpSuggestionSource::new(settings)
                .map_err(|err| std::io::Error::other(format!("suggestion client failed: {err}")))?;
            Ok(Arc::new(source))
        }
        None => {
            info!("no suggestion endpoint configured; captions and recommendations degrade");
            Ok(Arc::new(UnconfiguredSuggestionSource))
        }
    }
}

/// Build the HTTP state from configuration.
///
/// Database-backed adapters when a pool is available, in-memory stores
/// otherwise.
fn build_http_state(
    config: &ServerConfig,
    suggestions: Arc<dyn SuggestionSource>,
) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let items = Arc::new(DieselWardrobeRepository::new(pool.clone()));
            let outfits = Arc::new(DieselOutfitRepository::new(pool.clone()));
            HttpState::new(
                AccountService::new(Arc::new(DieselAccountRepository::new(pool.clone()))),
                WardrobeService::new(items.clone(), outfits.clone(), suggestions.clone()),
                OutfitService::new(outfits, items, suggestions),
            )
        }
        None => {
            let items = Arc::new(MemoryWardrobeRepository::default());
            let outfits = Arc::new(MemoryOutfitRepository::default());
            HttpState::new(
                AccountService::new(Arc::new(MemoryAccountRepository::default())),
                WardrobeService::new(items.clone(), outfits.clone(), suggestions.clone()),
                OutfitService::new(outfits, items, suggestions),
            )
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(add_item)
        .service(list_items)
        .service(get_item)
        .service(update_item)
        .service(delete_item)
        .service(create_outfit)
        .service(list_outfits)
        .service(recommend);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket or constructing an
/// adapter fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    mut config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let suggestions = build_suggestion_source(&mut config)?;
    let http_state = web::Data::new(build_http_state(&config, suggestions));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        suggestion: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
