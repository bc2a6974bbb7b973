//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are deliberately thin: they translate between Diesel row
//! structs and domain types and map database failures to the port error
//! enums. Row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal and never cross into the domain.

mod diesel_account_repository;
mod diesel_helpers;
mod diesel_outfit_repository;
mod diesel_wardrobe_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_outfit_repository::DieselOutfitRepository;
pub use diesel_wardrobe_repository::DieselWardrobeRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
