//! Inbound HTTP adapter: handlers, session plumbing, and error mapping.

pub mod accounts;
pub mod error;
pub mod health;
pub mod outfits;
pub mod session;
pub mod state;
pub mod wardrobe;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
