//! Authentication module for the proxy.
//!
//! Callers authenticate with a single pre-shared bearer key.

mod api_key;
mod middleware;

pub use api_key::*;
pub use middleware::*;
