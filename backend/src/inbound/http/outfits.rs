//! Outfit API handlers.
//!
//! ```text
//! POST /api/v1/outfits           {"name":"office","itemIds":[...],"occasion":"work"}
//! GET  /api/v1/outfits
//! POST /api/v1/outfits/recommend {"occasion":"dinner","stylePreferences":"minimal"}
//! ```
//!
//! Recommendation is best-effort: when the AI endpoint is down the response
//! is still 200 with `"suggestion": null`.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ItemId, Outfit, OutfitName, RecommendationRequest};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/outfits`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRequest {
    /// Display label for the outfit.
    #[schema(example = "office")]
    pub name: String,
    /// Ordered wardrobe item references; order is preserved.
    pub item_ids: Vec<Uuid>,
    /// When given, the AI adapter is asked for a rationale.
    pub occasion: Option<String>,
}

/// Response body for a successful outfit creation.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutfitCreatedResponse {
    /// Identifier of the stored outfit.
    pub outfit_id: String,
}

/// Outfit as returned to its owner.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutfitDto {
    /// Stable outfit identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Ordered wardrobe item references.
    pub item_ids: Vec<String>,
    /// AI-generated rationale, when one was attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl From<Outfit> for OutfitDto {
    fn from(outfit: Outfit) -> Self {
        Self {
            id: outfit.id.to_string(),
            name: outfit.name.to_string(),
            item_ids: outfit.items.iter().map(ItemId::to_string).collect(),
            rationale: outfit.rationale,
        }
    }
}

/// Request body for `POST /api/v1/outfits/recommend`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// What the outfit is for.
    #[schema(example = "dinner party")]
    pub occasion: String,
    /// The wearer's age.
    #[schema(example = 34)]
    pub age: Option<u32>,
    /// Optional free-text style constraints.
    pub style_preferences: Option<String>,
    /// Where the outfit will be worn.
    #[schema(example = "Dublin")]
    pub location: Option<String>,
}

/// Response body for `POST /api/v1/outfits/recommend`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// Suggestion text, or `null` when the AI endpoint was unavailable.
    pub suggestion: Option<String>,
}

fn parse_name(raw: String) -> Result<OutfitName, Error> {
    OutfitName::new(raw).map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(json!({ "field": "name" }))
    })
}

/// Compose a new outfit from owned items.
#[utoipa::path(
    post,
    path = "/api/v1/outfits",
    request_body = OutfitRequest,
    responses(
        (status = 201, description = "Outfit stored", body = OutfitCreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Referenced item owned by another user", body = Error),
        (status = 404, description = "Referenced item not found", body = Error)
    ),
    tags = ["outfits"],
    operation_id = "createOutfit"
)]
#[post("/outfits")]
pub async fn create_outfit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OutfitRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let payload = payload.into_inner();

    let name = parse_name(payload.name)?;
    let item_ids = payload
        .item_ids
        .into_iter()
        .map(ItemId::from_uuid)
        .collect();

    let outfit_id = state
        .outfits
        .create_outfit(&owner, name, item_ids, payload.occasion)
        .await?;
    Ok(HttpResponse::Created().json(OutfitCreatedResponse {
        outfit_id: outfit_id.to_string(),
    }))
}

/// List the caller's outfits.
#[utoipa::path(
    get,
    path = "/api/v1/outfits",
    responses(
        (status = 200, description = "Outfits owned by the caller", body = [OutfitDto]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["outfits"],
    operation_id = "listOutfits"
)]
#[get("/outfits")]
pub async fn list_outfits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OutfitDto>>> {
    let owner = session.require_user_id()?;
    let outfits = state.outfits.list_outfits(&owner).await?;
    Ok(web::Json(outfits.into_iter().map(OutfitDto::from).collect()))
}

/// Ask for an outfit suggestion over the caller's whole wardrobe.
#[utoipa::path(
    post,
    path = "/api/v1/outfits/recommend",
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Suggestion, possibly null", body = RecommendResponse),
        (status = 400, description = "Wardrobe is empty", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["outfits"],
    operation_id = "recommendOutfit"
)]
#[post("/outfits/recommend")]
pub async fn recommend(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecommendRequest>,
) -> ApiResult<web::Json<RecommendResponse>> {
    let owner = session.require_user_id()?;
    let payload = payload.into_inner();

    let suggestion = state
        .outfits
        .recommend(
            &owner,
            RecommendationRequest {
                occasion: payload.occasion,
                age: payload.age,
                style_preferences: payload.style_preferences,
                location: payload.location,
            },
        )
        .await?;
    Ok(web::Json(RecommendResponse { suggestion }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{authenticate, test_app};
    use crate::inbound::http::wardrobe::{ItemCreatedResponse, ItemRequest};
    use actix_http::Request;
    use actix_web::body::MessageBody;
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    async fn add_item<S, B>(app: &S, cookie: &Cookie<'static>, description: &str) -> Uuid
    where
        S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let request = test::TestRequest::post()
            .uri("/api/v1/wardrobe")
            .cookie(cookie.clone())
            .set_json(&ItemRequest {
                category: "tops".into(),
                description: Some(description.into()),
                image_url: None,
            })
            .to_request();
        let response = test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: ItemCreatedResponse = test::read_body_json(response).await;
        Uuid::parse_str(&created.item_id).expect("itemId is a UUID")
    }

    #[actix_web::test]
    async fn create_and_list_preserves_item_order() {
        let app = test::init_service(test_app()).await;
        let cookie = authenticate(&app, "ada", "pw-one").await;
        let first = add_item(&app, &cookie, "white shirt").await;
        let second = add_item(&app, &cookie, "navy blazer").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits")
            .cookie(cookie.clone())
            .set_json(&OutfitRequest {
                name: "office".into(),
                item_ids: vec![second, first],
                occasion: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = test::TestRequest::get()
            .uri("/api/v1/outfits")
            .cookie(cookie)
            .to_request();
        let response = test::call_service(&app, request).await;
        let outfits: Vec<OutfitDto> = test::read_body_json(response).await;
        assert_eq!(outfits.len(), 1);
        assert_eq!(
            outfits[0].item_ids,
            vec![second.to_string(), first.to_string()]
        );
    }

    #[actix_web::test]
    async fn foreign_item_reference_is_forbidden() {
        let app = test::init_service(test_app()).await;
        let owner = authenticate(&app, "ada", "pw-one").await;
        let intruder = authenticate(&app, "mallory", "pw-two").await;
        let item = add_item(&app, &owner, "silk scarf").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits")
            .cookie(intruder)
            .set_json(&OutfitRequest {
                name: "borrowed".into(),
                item_ids: vec![item],
                occasion: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("itemId"))
                .and_then(Value::as_str),
            Some(item.to_string().as_str())
        );
    }

    #[actix_web::test]
    async fn empty_item_list_is_rejected() {
        let app = test::init_service(test_app()).await;
        let cookie = authenticate(&app, "ada", "pw-one").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits")
            .cookie(cookie)
            .set_json(&OutfitRequest {
                name: "empty".into(),
                item_ids: Vec::new(),
                occasion: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn deleting_a_referenced_item_is_a_conflict() {
        let app = test::init_service(test_app()).await;
        let cookie = authenticate(&app, "ada", "pw-one").await;
        let item = add_item(&app, &cookie, "white shirt").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits")
            .cookie(cookie.clone())
            .set_json(&OutfitRequest {
                name: "office".into(),
                item_ids: vec![item],
                occasion: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: OutfitCreatedResponse = test::read_body_json(response).await;

        let request = test::TestRequest::delete()
            .uri(&format!("/api/v1/wardrobe/{item}"))
            .cookie(cookie.clone())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("outfitId"))
                .and_then(Value::as_str),
            Some(created.outfit_id.as_str())
        );

        // The listing stays intact and the reference still resolves.
        let request = test::TestRequest::get()
            .uri("/api/v1/outfits")
            .cookie(cookie.clone())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let outfits: Vec<OutfitDto> = test::read_body_json(response).await;
        assert_eq!(outfits[0].item_ids, vec![item.to_string()]);

        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/wardrobe/{item}"))
            .cookie(cookie)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn recommend_returns_suggestion_text() {
        let app = test::init_service(test_app()).await;
        let cookie = authenticate(&app, "ada", "pw-one").await;
        add_item(&app, &cookie, "green hoodie").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits/recommend")
            .cookie(cookie)
            .set_json(&RecommendRequest {
                occasion: "casual walk".into(),
                age: None,
                style_preferences: None,
                location: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: RecommendResponse = test::read_body_json(response).await;
        assert!(body.suggestion.is_some());
    }

    #[actix_web::test]
    async fn recommend_with_empty_wardrobe_is_rejected() {
        let app = test::init_service(test_app()).await;
        let cookie = authenticate(&app, "ada", "pw-one").await;

        let request = test::TestRequest::post()
            .uri("/api/v1/outfits/recommend")
            .cookie(cookie)
            .set_json(&RecommendRequest {
                occasion: "gala".into(),
                age: None,
                style_preferences: None,
                location: None,
            })
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
