//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and request/response schema into
//! one document, served at `/api-docs/openapi.json`. The session cookie
//! security scheme is attached via a modifier so handlers can opt out with
//! `security([])`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{CredentialsRequest, RegisterResponse};
use crate::inbound::http::outfits::{
    OutfitCreatedResponse, OutfitDto, OutfitRequest, RecommendRequest, RecommendResponse,
};
use crate::inbound::http::wardrobe::{
    ItemCreatedResponse, ItemDto, ItemRequest, UpdateItemRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the wardrobe REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "fAIshion backend API",
        description = "Wardrobe catalogue, outfit composition, and AI outfit suggestions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::wardrobe::add_item,
        crate::inbound::http::wardrobe::list_items,
        crate::inbound::http::wardrobe::get_item,
        crate::inbound::http::wardrobe::update_item,
        crate::inbound::http::wardrobe::delete_item,
        crate::inbound::http::outfits::create_outfit,
        crate::inbound::http::outfits::list_outfits,
        crate::inbound::http::outfits::recommend,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsRequest,
        RegisterResponse,
        ItemRequest,
        UpdateItemRequest,
        ItemCreatedResponse,
        ItemDto,
        OutfitRequest,
        OutfitCreatedResponse,
        OutfitDto,
        RecommendRequest,
        RecommendResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and logout"),
        (name = "wardrobe", description = "Clothing item catalogue"),
        (name = "outfits", description = "Outfit composition and suggestions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
