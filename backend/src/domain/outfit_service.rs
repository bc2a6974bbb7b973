//! Outfit composition use-cases.
//!
//! The recommendation call is advisory: when the AI endpoint fails, the
//! operation degrades to "no suggestion" instead of failing the request.

use std::sync::Arc;

use tracing::{info, warn};

use super::account::UserId;
use super::error::Error;
use super::outfit::{Outfit, OutfitId, OutfitName, OutfitValidationError};
use super::ports::{
    OutfitPersistenceError, OutfitRepository, OutfitSuggestionRequest, SuggestionSource,
    WardrobePersistenceError, WardrobeRepository,
};
use super::wardrobe::ItemId;

/// Caller-supplied context for a whole-wardrobe recommendation.
///
/// Everything except the occasion is optional; the prompt falls back to
/// "N/A" for absent fields.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// What the outfit is for.
    pub occasion: String,
    /// The wearer's age.
    pub age: Option<u32>,
    /// Free-text style preferences.
    pub style_preferences: Option<String>,
    /// Where the outfit will be worn.
    pub location: Option<String>,
}

/// Use-case service over outfit and wardrobe storage plus the AI adapter.
#[derive(Clone)]
pub struct OutfitService {
    outfits: Arc<dyn OutfitRepository>,
    items: Arc<dyn WardrobeRepository>,
    suggestions: Arc<dyn SuggestionSource>,
}

fn map_outfit_error(error: OutfitPersistenceError) -> Error {
    match error {
        OutfitPersistenceError::Connection { message }
        | OutfitPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_wardrobe_error(error: WardrobePersistenceError) -> Error {
    match error {
        WardrobePersistenceError::UnknownOwner => Error::not_found("user not found"),
        WardrobePersistenceError::ItemInUse => Error::conflict("item is referenced by an outfit"),
        WardrobePersistenceError::Connection { message }
        | WardrobePersistenceError::Query { message } => Error::internal(message),
    }
}

impl OutfitService {
    /// Create a new service from its ports.
    pub fn new(
        outfits: Arc<dyn OutfitRepository>,
        items: Arc<dyn WardrobeRepository>,
        suggestions: Arc<dyn SuggestionSource>,
    ) -> Self {
        Self {
            outfits,
            items,
            suggestions,
        }
    }

    /// Compose and persist an outfit from `owner`'s items.
    ///
    /// Every referenced item must exist and belong to `owner`. When
    /// `occasion` is given, the AI adapter is asked for a rationale; a
    /// failure there leaves `rationale` empty rather than blocking creation.
    pub async fn create_outfit(
        &self,
        owner: &UserId,
        name: OutfitName,
        item_ids: Vec<ItemId>,
        occasion: Option<String>,
    ) -> Result<OutfitId, Error> {
        let descriptions = self.check_ownership(owner, &item_ids).await?;

        let rationale = match occasion {
            Some(occasion) => {
                self.fetch_suggestion(OutfitSuggestionRequest {
                    item_descriptions: descriptions,
                    occasion,
                    age: None,
                    style_preferences: None,
                    location: None,
                })
                .await
            }
            None => None,
        };

        let outfit = Outfit::new(OutfitId::random(), *owner, name, item_ids, rationale)
            .map_err(map_validation_error)?;

        self.outfits
            .insert(&outfit)
            .await
            .map_err(map_outfit_error)?;

        info!(outfit_id = %outfit.id, owner = %owner, items = outfit.items.len(), "outfit created");
        Ok(outfit.id)
    }

    /// List `owner`'s outfits, newest first.
    pub async fn list_outfits(&self, owner: &UserId) -> Result<Vec<Outfit>, Error> {
        self.outfits
            .list_for_owner(owner)
            .await
            .map_err(map_outfit_error)
    }

    /// Ask the AI adapter for an outfit suggestion over the whole wardrobe.
    ///
    /// Returns `None` when the adapter fails; the caller still gets a 200.
    pub async fn recommend(
        &self,
        owner: &UserId,
        request: RecommendationRequest,
    ) -> Result<Option<String>, Error> {
        let items = self
            .items
            .list_for_owner(owner, None)
            .await
            .map_err(map_wardrobe_error)?;

        if items.is_empty() {
            return Err(Error::invalid_request(
                "no wardrobe items found; add clothing items first",
            ));
        }

        let item_descriptions = items
            .into_iter()
            .map(|item| item.description.into())
            .collect();

        Ok(self
            .fetch_suggestion(OutfitSuggestionRequest {
                item_descriptions,
                occasion: request.occasion,
                age: request.age,
                style_preferences: request.style_preferences,
                location: request.location,
            })
            .await)
    }

    async fn check_ownership(
        &self,
        owner: &UserId,
        item_ids: &[ItemId],
    ) -> Result<Vec<String>, Error> {
        if item_ids.is_empty() {
            return Err(map_validation_error(OutfitValidationError::NoItems));
        }

        let mut descriptions = Vec::with_capacity(item_ids.len());
        for id in item_ids {
            let item = self
                .items
                .find(id)
                .await
                .map_err(map_wardrobe_error)?
                .ok_or_else(|| {
                    Error::not_found("item not found")
                        .with_details(serde_json::json!({ "itemId": id.to_string() }))
                })?;

            if item.owner != *owner {
                return Err(Error::forbidden("item belongs to another user")
                    .with_details(serde_json::json!({ "itemId": id.to_string() })));
            }
            descriptions.push(item.description.into());
        }
        Ok(descriptions)
    }

    async fn fetch_suggestion(&self, request: OutfitSuggestionRequest) -> Option<String> {
        match self.suggestions.suggest_outfit(&request).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(%error, "outfit suggestion failed; continuing without one");
                None
            }
        }
    }
}

fn map_validation_error(error: OutfitValidationError) -> Error {
    Error::invalid_request(error.to_string())
}
