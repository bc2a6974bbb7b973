//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use crate::domain::{AccountService, OutfitService, WardrobeService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, outfits, wardrobe};
use crate::middleware::Trace;
use crate::outbound::memory::{
    CannedSuggestionSource, MemoryAccountRepository, MemoryOutfitRepository,
    MemoryWardrobeRepository,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build the full API surface over in-memory adapters and a canned AI source.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let accounts_repo = Arc::new(MemoryAccountRepository::default());
    let items_repo = Arc::new(MemoryWardrobeRepository::default());
    let outfits_repo = Arc::new(MemoryOutfitRepository::default());
    let suggestions = Arc::new(CannedSuggestionSource::new(
        "pair the green hoodie with blue jeans",
    ));

    let state = HttpState::new(
        AccountService::new(accounts_repo),
        WardrobeService::new(items_repo.clone(), outfits_repo.clone(), suggestions.clone()),
        OutfitService::new(outfits_repo, items_repo, suggestions),
    );

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .service(accounts::register)
                .service(accounts::login)
                .service(accounts::logout)
                .service(wardrobe::add_item)
                .service(wardrobe::list_items)
                .service(wardrobe::get_item)
                .service(wardrobe::update_item)
                .service(wardrobe::delete_item)
                .service(outfits::create_outfit)
                .service(outfits::list_outfits)
                .service(outfits::recommend),
        )
}

/// Register `username` and log in, returning the session cookie.
pub async fn authenticate(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> Cookie<'static> {
    let register = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, register).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, login).await;
    assert_eq!(response.status(), StatusCode::OK);

    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("login sets a session cookie")
        .into_owned()
}
