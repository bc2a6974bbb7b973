//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers. Keep types immutable where practical and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc. Nothing in this
//! module knows about HTTP or SQL.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod outfit;
pub mod outfit_service;
pub mod ports;
pub mod wardrobe;
pub mod wardrobe_service;

pub use self::account::{Account, AccountValidationError, UserId, Username};
pub use self::account_service::AccountService;
pub use self::auth::{CredentialValidationError, Credentials, PasswordHash};
pub use self::error::{Error, ErrorCode};
pub use self::outfit::{Outfit, OutfitId, OutfitName, OutfitValidationError};
pub use self::outfit_service::{OutfitService, RecommendationRequest};
pub use self::wardrobe::{
    Category, ImageUrl, ItemDescription, ItemId, UnknownCategory, WardrobeItem,
    WardrobeValidationError,
};
pub use self::wardrobe_service::{ItemChanges, NewItem, WardrobeService};
