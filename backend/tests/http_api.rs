//! End-to-end API tests over in-memory adapters.
//!
//! Drives the full surface the way a client would: register, log in, build
//! up a wardrobe, compose outfits, and ask for suggestions, all through the
//! session cookie.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use faishion_backend::domain::ports::SuggestionSource;
use faishion_backend::domain::{AccountService, OutfitService, WardrobeService};
use faishion_backend::inbound::http::state::HttpState;
use faishion_backend::inbound::http::{accounts, outfits, wardrobe};
use faishion_backend::outbound::memory::{
    CannedSuggestionSource, MemoryAccountRepository, MemoryOutfitRepository,
    MemoryWardrobeRepository,
};
use faishion_backend::outbound::suggestion::UnconfiguredSuggestionSource;
use faishion_backend::Trace;

const SUGGESTION_TEXT: &str = "Shirt: white tee\nPants: chinos\nAccessories: watch\nShoes: loafers";

fn app_with(
    suggestions: Arc<dyn SuggestionSource>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let items = Arc::new(MemoryWardrobeRepository::default());
    let outfits = Arc::new(MemoryOutfitRepository::default());
    let state = HttpState::new(
        AccountService::new(Arc::new(MemoryAccountRepository::default())),
        WardrobeService::new(items.clone(), outfits.clone(), suggestions.clone()),
        OutfitService::new(outfits, items, suggestions),
    );

    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
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

async fn post_json<S, B>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = test::TestRequest::post().uri(uri).set_json(&body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get_json<S, B>(app: &S, uri: &str, cookie: &Cookie<'static>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(app, request).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn sign_up<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let credentials = json!({ "username": username, "password": "correct-horse" });
    let (status, _) = post_json(app, "/api/v1/register", None, credentials.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&credentials)
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn add_item<S>(app: &S, cookie: &Cookie<'static>, category: &str, description: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/v1/wardrobe",
        Some(cookie),
        json!({ "category": category, "description": description }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body.get("itemId")
        .and_then(Value::as_str)
        .expect("itemId present")
        .to_owned()
}

#[actix_web::test]
async fn full_wardrobe_journey() {
    let app =
        test::init_service(app_with(Arc::new(CannedSuggestionSource::new(SUGGESTION_TEXT)))).await;
    let cookie = sign_up(&app, "ada").await;

    let shirt = add_item(&app, &cookie, "tops", "white linen shirt").await;
    let jeans = add_item(&app, &cookie, "bottoms", "raw denim jeans").await;
    let boots = add_item(&app, &cookie, "shoes", "brown leather boots").await;

    // Newest first, then narrowed by category.
    let (status, body) = get_json(&app, "/api/v1/wardrobe", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("item array");
    assert_eq!(listed.len(), 3);
    assert_eq!(
        listed[0].get("description").and_then(Value::as_str),
        Some("brown leather boots")
    );

    let (status, body) = get_json(&app, "/api/v1/wardrobe?category=tops", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("item array").len(), 1);

    // Update, then fetch the updated item.
    let uri = format!("/api/v1/wardrobe/{shirt}");
    let request = test::TestRequest::put()
        .uri(&uri)
        .cookie(cookie.clone())
        .set_json(json!({ "description": "white linen shirt, pressed" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = get_json(&app, &uri, &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("description").and_then(Value::as_str),
        Some("white linen shirt, pressed")
    );

    // Compose an outfit with a rationale from the suggestion source.
    let (status, body) = post_json(
        &app,
        "/api/v1/outfits",
        Some(&cookie),
        json!({ "name": "smart casual", "itemIds": [shirt, jeans], "occasion": "dinner" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("outfitId").and_then(Value::as_str).is_some());

    let (status, body) = get_json(&app, "/api/v1/outfits", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let outfits = body.as_array().expect("outfit array");
    assert_eq!(outfits.len(), 1);
    assert_eq!(
        outfits[0].get("rationale").and_then(Value::as_str),
        Some(SUGGESTION_TEXT)
    );
    assert_eq!(
        outfits[0]
            .get("itemIds")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(2)
    );

    // Whole-wardrobe recommendation.
    let (status, body) = post_json(
        &app,
        "/api/v1/outfits/recommend",
        Some(&cookie),
        json!({ "occasion": "dinner", "stylePreferences": "minimal" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("suggestion").and_then(Value::as_str),
        Some(SUGGESTION_TEXT)
    );

    // The jeans are part of the outfit now, so they cannot be deleted.
    let uri = format!("/api/v1/wardrobe/{jeans}");
    let request = test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let (status, body) = get_json(&app, "/api/v1/outfits", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("outfit array").len(), 1);

    // The boots are unreferenced; delete and verify they are gone.
    let uri = format!("/api/v1/wardrobe/{boots}");
    let request = test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let (status, _) = get_json(&app, &uri, &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn image_only_item_is_captioned() {
    let app = test::init_service(app_with(Arc::new(CannedSuggestionSource::new(
        "a red wool jumper",
    ))))
    .await;
    let cookie = sign_up(&app, "ada").await;

    let (status, body) = post_json(
        &app,
        "/api/v1/wardrobe",
        Some(&cookie),
        json!({ "category": "tops", "imageUrl": "https://img.example/jumper.png" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body.get("itemId").and_then(Value::as_str).expect("itemId");

    let (status, body) = get_json(&app, &format!("/api/v1/wardrobe/{id}"), &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("description").and_then(Value::as_str),
        Some("a red wool jumper")
    );
    assert_eq!(
        body.get("imageUrl").and_then(Value::as_str),
        Some("https://img.example/jumper.png")
    );
}

#[actix_web::test]
async fn degraded_ai_endpoint_keeps_the_api_usable() {
    let app = test::init_service(app_with(Arc::new(UnconfiguredSuggestionSource))).await;
    let cookie = sign_up(&app, "ada").await;

    // Caption path blocks the write with 503.
    let (status, body) = post_json(
        &app,
        "/api/v1/wardrobe",
        Some(&cookie),
        json!({ "category": "tops", "imageUrl": "https://img.example/shirt.png" }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("service_unavailable")
    );

    // Recommendation degrades to null instead of failing.
    add_item(&app, &cookie, "tops", "white shirt").await;
    let (status, body) = post_json(
        &app,
        "/api/v1/outfits/recommend",
        Some(&cookie),
        json!({ "occasion": "office" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("suggestion").expect("key present").is_null());

    // Outfit creation with an occasion still succeeds, just without a rationale.
    let shirt = add_item(&app, &cookie, "tops", "blue oxford shirt").await;
    let (status, _) = post_json(
        &app,
        "/api/v1/outfits",
        Some(&cookie),
        json!({ "name": "work", "itemIds": [shirt], "occasion": "office" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get_json(&app, "/api/v1/outfits", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("outfit array")[0]
        .get("rationale")
        .is_none());
}

#[actix_web::test]
async fn logout_invalidates_the_session() {
    let app =
        test::init_service(app_with(Arc::new(CannedSuggestionSource::new(SUGGESTION_TEXT)))).await;
    let cookie = sign_up(&app, "ada").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The purge response carries a removal cookie; the old value no longer
    // grants access once the client honours it.
    let removal = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();
    let request = test::TestRequest::get()
        .uri("/api/v1/wardrobe")
        .cookie(removal)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn users_cannot_see_each_other() {
    let app =
        test::init_service(app_with(Arc::new(CannedSuggestionSource::new(SUGGESTION_TEXT)))).await;
    let ada = sign_up(&app, "ada").await;
    let mallory = sign_up(&app, "mallory").await;

    let shirt = add_item(&app, &ada, "tops", "white shirt").await;

    let (status, _) = get_json(&app, "/api/v1/wardrobe", &mallory).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, &format!("/api/v1/wardrobe/{shirt}"), &mallory).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("forbidden"));

    let (status, _) = post_json(
        &app,
        "/api/v1/outfits",
        Some(&mallory),
        json!({ "name": "stolen", "itemIds": [shirt] }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
