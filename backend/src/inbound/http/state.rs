//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services (use-cases) and remain testable without I/O.

use crate::domain::{AccountService, OutfitService, WardrobeService};

/// Dependency bundle for HTTP handlers.
///
/// The services carry `Arc<dyn Port>` internally, so cloning this per worker
/// is cheap.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login use-cases.
    pub accounts: AccountService,
    /// Wardrobe item CRUD use-cases.
    pub wardrobe: WardrobeService,
    /// Outfit composition use-cases.
    pub outfits: OutfitService,
}

impl HttpState {
    /// Bundle the three services.
    #[must_use]
    pub const fn new(
        accounts: AccountService,
        wardrobe: WardrobeService,
        outfits: OutfitService,
    ) -> Self {
        Self {
            accounts,
            wardrobe,
            outfits,
        }
    }
}
