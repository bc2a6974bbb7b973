//! Driven port for the external AI suggestion endpoint.
//!
//! The adapter behind this port owns transport details only; the domain sees
//! free text in and free text out. Callers decide whether a failure blocks
//! the operation or degrades to "no suggestion".

use async_trait::async_trait;

use crate::domain::ImageUrl;

/// Inputs for an outfit suggestion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitSuggestionRequest {
    /// Descriptions of the caller's wardrobe items.
    pub item_descriptions: Vec<String>,
    /// The occasion the outfit is for.
    pub occasion: String,
    /// The wearer's age, when shared.
    pub age: Option<u32>,
    /// Optional free-text style preferences.
    pub style_preferences: Option<String>,
    /// Where the outfit will be worn, when shared.
    pub location: Option<String>,
}

/// Errors raised by suggestion source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionSourceError {
    /// The endpoint could not be reached or timed out.
    #[error("suggestion endpoint unreachable: {message}")]
    Transport {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The endpoint answered with a non-success status.
    #[error("suggestion endpoint returned status {status}")]
    Status {
        /// HTTP status code received.
        status: u16,
    },
    /// The response body could not be decoded.
    #[error("suggestion response could not be decoded: {message}")]
    Decode {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl SuggestionSourceError {
    /// Transport failure with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Non-success HTTP status.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Decode failure with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// External AI endpoint used for suggestions and image captions.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Produce a free-text outfit suggestion from the given wardrobe.
    async fn suggest_outfit(
        &self,
        request: &OutfitSuggestionRequest,
    ) -> Result<String, SuggestionSourceError>;

    /// Produce a caption describing the image behind `url`.
    async fn describe_image(&self, url: &ImageUrl) -> Result<String, SuggestionSourceError>;
}
