//! Domain types for the carrier vetting proxy.
//!
//! Upstream data model, verdicts and the condition table.

mod carrier;
mod conditions;
mod phone;
mod verdict;

pub use carrier::*;
pub use conditions::*;
pub use phone::*;
pub use verdict::*;
