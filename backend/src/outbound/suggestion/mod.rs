//! Outbound adapters for the AI suggestion endpoint.

mod dto;
mod http_client;

pub use http_client::{HttpSuggestionSource, SuggestionClientConfig, UnconfiguredSuggestionSource};
