//! Evaluation engine for the proxy.
//!
//! - Assessment: applies the condition table to provider answers
//! - Dispatcher: selects the lookup, runs it, and shapes the response

mod assessment;
mod dispatcher;

pub use assessment::*;
pub use dispatcher::*;

#[cfg(test)]
pub(crate) use dispatcher::tests as test_support;
