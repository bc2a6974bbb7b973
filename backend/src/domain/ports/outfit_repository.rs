//! Port abstraction for outfit persistence adapters.

use async_trait::async_trait;

use crate::domain::{Outfit, UserId};

/// Persistence errors raised by outfit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutfitPersistenceError {
    /// Repository connection could not be established.
    #[error("outfit repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("outfit repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl OutfitPersistenceError {
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

/// Storage port for composed outfits.
#[async_trait]
pub trait OutfitRepository: Send + Sync {
    /// Persist a new outfit together with its ordered item references.
    async fn insert(&self, outfit: &Outfit) -> Result<(), OutfitPersistenceError>;

    /// List outfits owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Outfit>, OutfitPersistenceError>;
}
