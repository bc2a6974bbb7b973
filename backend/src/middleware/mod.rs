//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns,
//! currently request tracing.

pub mod trace;

pub use trace::Trace;
