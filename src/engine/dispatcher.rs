//! Request Dispatcher - one lookup, one assessment, one response.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    normalize_number, AuthorityAssessment, CarrierRecord, RulesAssessment, Verdict, VerdictResult,
};
use crate::engine::ConditionAssessor;
use crate::upstream::{Lookup, UpstreamError, VettingProvider};

/// The identifier a check is performed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Phone(String),
    Mc(String),
    Dot(String),
}

impl Identifier {
    /// Pick the identifier to honor: phone, then MC, then DOT.
    ///
    /// Blank values count as absent. Returns `None` when nothing usable
    /// was supplied.
    pub fn select(phone: Option<&str>, mc: Option<&str>, dot: Option<&str>) -> Option<Self> {
        fn present(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        }

        present(phone)
            .map(Identifier::Phone)
            .or_else(|| present(mc).map(Identifier::Mc))
            .or_else(|| present(dot).map(Identifier::Dot))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Identifier::Phone(_) => "phone",
            Identifier::Mc(_) => "mc",
            Identifier::Dot(_) => "dot",
        }
    }
}

/// Response record for a carrier check.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CarrierCheck {
    /// Kind-prefixed requested number, e.g. `mc_12345`; only when found.
    pub carrier_id: Option<String>,
    pub legal_name: Option<String>,
    pub dba_name: Option<String>,
    pub dot_number: Option<String>,
    pub mc_number: Option<String>,
    /// PASS or FAIL.
    pub result: VerdictResult,
    /// Reason for failure if applicable.
    pub reason: Option<String>,
    /// Phone search result category from the provider.
    pub phone_search_result_category: Option<String>,
    pub authority_assessment: Option<AuthorityAssessment>,
    pub rules_assessment: Option<RulesAssessment>,
}

impl CarrierCheck {
    fn from_verdict(verdict: Verdict) -> Self {
        Self {
            carrier_id: None,
            legal_name: None,
            dba_name: None,
            dot_number: None,
            mc_number: None,
            result: verdict.result,
            reason: verdict.reason,
            phone_search_result_category: None,
            authority_assessment: None,
            rules_assessment: None,
        }
    }

    fn with_carrier(mut self, carrier_id: String, carrier: &CarrierRecord) -> Self {
        self.carrier_id = Some(carrier_id);
        self.legal_name = carrier.legal_name.clone();
        self.dba_name = carrier.dba_name.clone();
        self.dot_number = carrier.dot_number.clone();
        self.mc_number = carrier.mc_number.clone();
        self.authority_assessment = carrier.authority_assessment.clone();
        self.rules_assessment = carrier.rules_assessment.clone();
        self
    }
}

/// Runs a single carrier check end to end.
#[derive(Clone)]
pub struct CheckDispatcher {
    provider: Arc<dyn VettingProvider>,
    assessor: ConditionAssessor,
}

impl CheckDispatcher {
    pub fn new(provider: Arc<dyn VettingProvider>, assessor: ConditionAssessor) -> Self {
        Self { provider, assessor }
    }

    pub fn assessor(&self) -> &ConditionAssessor {
        &self.assessor
    }

    /// Perform the lookup for `identifier` and assess the answer.
    ///
    /// Provider errors are returned before any assessment runs.
    pub async fn check(&self, identifier: &Identifier) -> Result<CarrierCheck, UpstreamError> {
        let check = match identifier {
            Identifier::Phone(phone) => {
                let status = self.provider.lookup_by_phone(phone).await?;
                let verdict = self.assessor.assess_phone(&status);
                let mut check = CarrierCheck::from_verdict(verdict);
                check.phone_search_result_category = status
                    .found()
                    .and_then(|s| s.phone_search_result_category.as_ref())
                    .map(|c| c.as_str().to_string());
                check
            }
            Identifier::Mc(mc) => {
                let carrier = self.provider.lookup_by_mc(mc).await?;
                self.carrier_check("mc", mc, &carrier)
            }
            Identifier::Dot(dot) => {
                let carrier = self.provider.lookup_by_dot(dot).await?;
                self.carrier_check("dot", dot, &carrier)
            }
        };

        tracing::info!(
            kind = identifier.kind(),
            result = %check.result,
            reason = ?check.reason,
            "Carrier check complete"
        );

        Ok(check)
    }

    fn carrier_check(
        &self,
        prefix: &str,
        requested: &str,
        carrier: &Lookup<CarrierRecord>,
    ) -> CarrierCheck {
        let verdict = self.assessor.assess_carrier(carrier);
        let check = CarrierCheck::from_verdict(verdict);

        match carrier {
            Lookup::Found(record) => {
                let number = normalize_number(requested).unwrap_or_else(|| requested.to_string());
                check.with_carrier(format!("{prefix}_{number}"), record)
            }
            Lookup::NotFound => check,
        }
    }
}
