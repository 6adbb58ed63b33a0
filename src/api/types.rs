//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use crate::engine::CarrierCheck;

// ==================== Carrier Check ====================

/// Query parameters for a carrier check.
///
/// Only the first supplied identifier is honored: phone, then MC, then DOT.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarrierCheckQuery {
    /// Motor carrier number.
    #[serde(default)]
    pub mc_number: Option<String>,
    /// USDOT number.
    #[serde(default)]
    pub dot_number: Option<String>,
    /// Phone number in E.164 format.
    #[serde(default)]
    pub phone_number: Option<String>,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Vetting provider environment (production or staging).
    pub upstream: String,
    /// Number of phone conditions loaded.
    pub phone_conditions: usize,
    /// Number of carrier conditions loaded.
    pub carrier_conditions: usize,
    /// Timestamp.
    pub timestamp: String,
}
