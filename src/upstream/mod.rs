//! Vetting provider seam.
//!
//! The dispatcher talks to the provider only through [`VettingProvider`];
//! [`HighwayClient`] is the HTTP implementation used in production.

mod highway;

pub use highway::*;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::{CarrierRecord, PhoneStatus};

/// Outcome of a lookup that reached the provider.
///
/// A 404 is a regular answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::NotFound => None,
        }
    }
}

/// Failures talking to the vetting provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The provider rejected our bearer token.
    #[error("vetting provider rejected credentials: {body}")]
    Unauthorized { body: String },

    /// Any other non-2xx, non-404 answer. Displays as the raw body.
    #[error("{body}")]
    Status { status: StatusCode, body: String },

    #[error("request to vetting provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response from vetting provider: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid vetting provider URL: {0}")]
    InvalidUrl(String),
}

/// The three lookups offered by the vetting provider.
#[async_trait]
pub trait VettingProvider: Send + Sync {
    /// Rapid check of an E.164 phone number.
    async fn lookup_by_phone(&self, phone_e164: &str)
        -> Result<Lookup<PhoneStatus>, UpstreamError>;

    /// Carrier by MC number.
    async fn lookup_by_mc(&self, mc_number: &str) -> Result<Lookup<CarrierRecord>, UpstreamError>;

    /// Carrier by DOT number.
    async fn lookup_by_dot(&self, dot_number: &str)
        -> Result<Lookup<CarrierRecord>, UpstreamError>;
}
