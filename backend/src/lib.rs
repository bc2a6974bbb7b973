//! Wardrobe backend library.
//!
//! Hexagonal layout: `domain` holds the models, use-case services, and
//! ports; `inbound` adapts HTTP onto the services; `outbound` implements the
//! ports against PostgreSQL, in-memory stores, and the AI suggestion
//! endpoint.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Tracing middleware attaching a request-scoped trace identifier.
pub use middleware::Trace;
