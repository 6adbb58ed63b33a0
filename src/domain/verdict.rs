//! Verdict types.
//!
//! Represents the PASS/FAIL decision returned for a lookup.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Overall outcome of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictResult {
    Pass,
    Fail,
}

impl std::fmt::Display for VerdictResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictResult::Pass => write!(f, "PASS"),
            VerdictResult::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result plus the reason behind a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub result: VerdictResult,
    pub reason: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            result: VerdictResult::Pass,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            result: VerdictResult::Fail,
            reason: Some(reason.into()),
        }
    }
}
