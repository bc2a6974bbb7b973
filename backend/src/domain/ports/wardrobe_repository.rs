//! Port abstraction for wardrobe item persistence adapters.

use async_trait::async_trait;

use crate::domain::{Category, ItemId, UserId, WardrobeItem};

/// Persistence errors raised by wardrobe repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WardrobePersistenceError {
    /// Repository connection could not be established.
    #[error("wardrobe repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("wardrobe repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The owning user does not exist.
    #[error("item owner does not exist")]
    UnknownOwner,
    /// The item is still referenced by at least one outfit.
    #[error("item is referenced by an outfit")]
    ItemInUse,
}

impl WardrobePersistenceError {
    /// Connection failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage port for wardrobe items.
///
/// Lookups return the item regardless of owner; ownership decisions belong
/// to the service layer so `Forbidden` and `NotFound` stay distinguishable.
#[async_trait]
pub trait WardrobeRepository: Send + Sync {
    /// Persist a new item.
    async fn insert(&self, item: &WardrobeItem) -> Result<(), WardrobePersistenceError>;

    /// Fetch a single item by identifier.
    async fn find(&self, id: &ItemId) -> Result<Option<WardrobeItem>, WardrobePersistenceError>;

    /// List items owned by `owner`, newest first, optionally restricted to
    /// one category.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        category: Option<Category>,
    ) -> Result<Vec<WardrobeItem>, WardrobePersistenceError>;

    /// Replace the stored item. Returns `false` when the item is absent.
    async fn update(&self, item: &WardrobeItem) -> Result<bool, WardrobePersistenceError>;

    /// Remove an item. Returns `false` when the item is absent and
    /// [`WardrobePersistenceError::ItemInUse`] when an outfit still
    /// references it.
    async fn delete(&self, id: &ItemId) -> Result<bool, WardrobePersistenceError>;
}
