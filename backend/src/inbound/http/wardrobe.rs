//! Wardrobe API handlers.
//!
//! ```text
//! POST   /api/v1/wardrobe          {"category":"tops","description":"red t-shirt"}
//! GET    /api/v1/wardrobe?category=tops
//! GET    /api/v1/wardrobe/{id}
//! PUT    /api/v1/wardrobe/{id}
//! DELETE /api/v1/wardrobe/{id}
//! ```
//!
//! Every route requires an authenticated session; items are only ever
//! visible to their owner.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Category, Error, ImageUrl, ItemChanges, ItemDescription, ItemId, NewItem, WardrobeItem,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/wardrobe`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// One of the seven fixed categories.
    #[schema(example = "tops")]
    pub category: String,
    /// Free-text description. Optional when `imageUrl` is supplied; the AI
    /// adapter captions the image instead.
    #[schema(example = "red cotton t-shirt")]
    pub description: Option<String>,
    /// Reference to an already-uploaded image.
    pub image_url: Option<String>,
}

/// Request body for `PUT /api/v1/wardrobe/{id}`. Absent fields are left
/// unchanged.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    /// Move the item to another category.
    pub category: Option<String>,
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the image reference. An explicit `null` clears the stored
    /// image; leaving the field out keeps it.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
}

/// Distinguish an absent field from an explicit `null`: absent stays `None`
/// via the serde default, while `null` becomes `Some(None)`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Response body for a successful item creation.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreatedResponse {
    /// Identifier of the stored item.
    pub item_id: String,
}

/// Wardrobe item as returned to its owner.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Stable item identifier.
    pub id: String,
    /// Item category.
    #[schema(example = "tops")]
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Image reference, when one was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<WardrobeItem> for ItemDto {
    fn from(item: WardrobeItem) -> Self {
        Self {
            id: item.id.to_string(),
            category: item.category.to_string(),
            description: item.description.into(),
            image_url: item.image.map(String::from),
        }
    }
}

/// Query parameters for `GET /api/v1/wardrobe`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    /// Restrict the listing to one category.
    pub category: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request(format!("unknown category: {raw}"))
            .with_details(json!({ "field": "category", "allowed": Category::ALL }))
    })
}

fn parse_description(raw: String) -> Result<ItemDescription, Error> {
    ItemDescription::new(raw).map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(json!({ "field": "description" }))
    })
}

fn parse_image_url(raw: String) -> Result<ImageUrl, Error> {
    ImageUrl::parse(raw).map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(json!({ "field": "imageUrl" }))
    })
}

/// Add a wardrobe item.
#[utoipa::path(
    post,
    path = "/api/v1/wardrobe",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item stored", body = ItemCreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Caption service unavailable", body = Error)
    ),
    tags = ["wardrobe"],
    operation_id = "addItem"
)]
#[post("/wardrobe")]
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ItemRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let payload = payload.into_inner();

    let new_item = NewItem {
        category: parse_category(&payload.category)?,
        description: payload.description.map(parse_description).transpose()?,
        image: payload.image_url.map(parse_image_url).transpose()?,
    };

    let item_id = state.wardrobe.add_item(&owner, new_item).await?;
    Ok(HttpResponse::Created().json(ItemCreatedResponse {
        item_id: item_id.to_string(),
    }))
}

/// List the caller's items, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/v1/wardrobe",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Items owned by the caller", body = [ItemDto]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["wardrobe"],
    operation_id = "listItems"
)]
#[get("/wardrobe")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListItemsQuery>,
) -> ApiResult<web::Json<Vec<ItemDto>>> {
    let owner = session.require_user_id()?;
    let category = query
        .into_inner()
        .category
        .as_deref()
        .map(parse_category)
        .transpose()?;

    let items = state.wardrobe.list_items(&owner, category).await?;
    Ok(web::Json(items.into_iter().map(ItemDto::from).collect()))
}

/// Fetch a single owned item.
#[utoipa::path(
    get,
    path = "/api/v1/wardrobe/{id}",
    params(("id" = Uuid, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The item", body = ItemDto),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Owned by another user", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["wardrobe"],
    operation_id = "getItem"
)]
#[get("/wardrobe/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ItemDto>> {
    let owner = session.require_user_id()?;
    let id = ItemId::from_uuid(path.into_inner());
    let item = state.wardrobe.get_item(&owner, &id).await?;
    Ok(web::Json(item.into()))
}

/// Update an owned item.
#[utoipa::path(
    put,
    path = "/api/v1/wardrobe/{id}",
    params(("id" = Uuid, Path, description = "Item identifier")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Owned by another user", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["wardrobe"],
    operation_id = "updateItem"
)]
#[put("/wardrobe/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<ItemDto>> {
    let owner = session.require_user_id()?;
    let id = ItemId::from_uuid(path.into_inner());
    let payload = payload.into_inner();

    let changes = ItemChanges {
        category: payload.category.as_deref().map(parse_category).transpose()?,
        description: payload.description.map(parse_description).transpose()?,
        image: payload
            .image_url
            .map(|image| image.map(parse_image_url).transpose())
            .transpose()?,
    };

    let item = state.wardrobe.update_item(&owner, &id, changes).await?;
    Ok(web::Json(item.into()))
}

/// Delete an owned item.
#[utoipa::path(
    delete,
    path = "/api/v1/wardrobe/{id}",
    params(("id" = Uuid, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Owned by another user", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Item still referenced by an outfit", body = Error)
    ),
    tags = ["wardrobe"],
    operation_id = "deleteItem"
)]
#[delete("/wardrobe/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = ItemId::from_uuid(path.into_inner());
    state.wardrobe.delete_item(&owner, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
