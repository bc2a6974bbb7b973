//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (databases, external AI endpoints). Each trait exposes strongly typed
//! errors so adapters map their failures into predictable variants instead
//! of returning `anyhow::Result`.

pub mod account_repository;
pub mod outfit_repository;
pub mod suggestion_source;
pub mod wardrobe_repository;

pub use account_repository::{AccountPersistenceError, AccountRepository};
pub use outfit_repository::{OutfitPersistenceError, OutfitRepository};
pub use suggestion_source::{
    OutfitSuggestionRequest, SuggestionSource, SuggestionSourceError,
};
pub use wardrobe_repository::{WardrobePersistenceError, WardrobeRepository};
