//! HTTP API layer for the proxy.
//!
//! Provides the carrier check endpoint and a health probe.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
