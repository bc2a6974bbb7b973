//! Wardrobe catalogue use-cases: item CRUD under strict per-user ownership.

use std::sync::Arc;

use tracing::{info, warn};

use super::account::UserId;
use super::error::Error;
use super::ports::{
    OutfitPersistenceError, OutfitRepository, SuggestionSource, WardrobePersistenceError,
    WardrobeRepository,
};
use super::wardrobe::{Category, ImageUrl, ItemDescription, ItemId, WardrobeItem};

/// Inputs for adding a wardrobe item.
///
/// At least one of `description` and `image` must be present; when only an
/// image is supplied the AI adapter captions it.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Target category.
    pub category: Category,
    /// Caller-provided description, if any.
    pub description: Option<ItemDescription>,
    /// Reference to an already-uploaded image, if any.
    pub image: Option<ImageUrl>,
}

/// Partial update applied to an owned item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    /// Move the item to another category.
    pub category: Option<Category>,
    /// Replace the description.
    pub description: Option<ItemDescription>,
    /// Replace the image reference; `Some(None)` clears it.
    pub image: Option<Option<ImageUrl>>,
}

/// Use-case service over wardrobe and outfit storage plus the AI adapter.
///
/// The outfit port is read-only here: deletion consults it so an item can
/// never disappear out from under an outfit that references it.
#[derive(Clone)]
pub struct WardrobeService {
    items: Arc<dyn WardrobeRepository>,
    outfits: Arc<dyn OutfitRepository>,
    suggestions: Arc<dyn SuggestionSource>,
}

fn map_persistence_error(error: WardrobePersistenceError) -> Error {
    match error {
        WardrobePersistenceError::UnknownOwner => Error::not_found("user not found"),
        WardrobePersistenceError::ItemInUse => Error::conflict("item is referenced by an outfit"),
        WardrobePersistenceError::Connection { message }
        | WardrobePersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_outfit_error(error: OutfitPersistenceError) -> Error {
    match error {
        OutfitPersistenceError::Connection { message }
        | OutfitPersistenceError::Query { message } => Error::internal(message),
    }
}

impl WardrobeService {
    /// Create a new service from its ports.
    pub fn new(
        items: Arc<dyn WardrobeRepository>,
        outfits: Arc<dyn OutfitRepository>,
        suggestions: Arc<dyn SuggestionSource>,
    ) -> Self {
        Self {
            items,
            outfits,
            suggestions,
        }
    }

    /// Persist a new item for `owner` and return its identifier.
    pub async fn add_item(&self, owner: &UserId, new_item: NewItem) -> Result<ItemId, Error> {
        let description = match (new_item.description, &new_item.image) {
            (Some(description), _) => description,
            (None, Some(image)) => self.caption_image(image).await?,
            (None, None) => {
                return Err(Error::invalid_request(
                    "provide either a description or an image",
                ));
            }
        };

        let item = WardrobeItem {
            id: ItemId::random(),
            owner: *owner,
            category: new_item.category,
            description,
            image: new_item.image,
        };

        self.items
            .insert(&item)
            .await
            .map_err(map_persistence_error)?;

        info!(item_id = %item.id, owner = %owner, category = %item.category, "wardrobe item added");
        Ok(item.id)
    }

    async fn caption_image(&self, image: &ImageUrl) -> Result<ItemDescription, Error> {
        let caption = self.suggestions.describe_image(image).await.map_err(|error| {
            warn!(%error, "image caption request failed");
            Error::service_unavailable("item description service unavailable")
        })?;

        ItemDescription::new(caption)
            .map_err(|error| Error::internal(format!("caption failed validation: {error}")))
    }

    /// List `owner`'s items, optionally restricted to one category.
    pub async fn list_items(
        &self,
        owner: &UserId,
        category: Option<Category>,
    ) -> Result<Vec<WardrobeItem>, Error> {
        self.items
            .list_for_owner(owner, category)
            .await
            .map_err(map_persistence_error)
    }

    /// Fetch a single item, enforcing ownership.
    pub async fn get_item(&self, owner: &UserId, id: &ItemId) -> Result<WardrobeItem, Error> {
        let item = self
            .items
            .find(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("item not found"))?;

        if item.owner != *owner {
            return Err(Error::forbidden("item belongs to another user"));
        }
        Ok(item)
    }

    /// Apply `changes` to an owned item and return the updated state.
    pub async fn update_item(
        &self,
        owner: &UserId,
        id: &ItemId,
        changes: ItemChanges,
    ) -> Result<WardrobeItem, Error> {
        let mut item = self.get_item(owner, id).await?;

        if let Some(category) = changes.category {
            item.category = category;
        }
        if let Some(description) = changes.description {
            item.description = description;
        }
        if let Some(image) = changes.image {
            item.image = image;
        }

        let updated = self
            .items
            .update(&item)
            .await
            .map_err(map_persistence_error)?;
        if !updated {
            // Deleted between the ownership check and the write.
            return Err(Error::not_found("item not found"));
        }
        Ok(item)
    }

    /// Remove an owned item.
    ///
    /// An item still referenced by one of the owner's outfits cannot be
    /// removed; doing so would leave the outfit dangling or empty.
    pub async fn delete_item(&self, owner: &UserId, id: &ItemId) -> Result<(), Error> {
        self.get_item(owner, id).await?;

        let outfits = self
            .outfits
            .list_for_owner(owner)
            .await
            .map_err(map_outfit_error)?;
        if let Some(outfit) = outfits.iter().find(|outfit| outfit.items.contains(id)) {
            return Err(
                Error::conflict("item is referenced by an outfit").with_details(
                    serde_json::json!({ "outfitId": outfit.id.to_string() }),
                ),
            );
        }

        let deleted = self
            .items
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(Error::not_found("item not found"));
        }
        info!(item_id = %id, owner = %owner, "wardrobe item deleted");
        Ok(())
    }
}
