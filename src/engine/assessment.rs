//! Assessment Engine - turns provider answers into PASS/FAIL verdicts.
//!
//! Pure functions of the lookup result and the condition table; no I/O.

use std::sync::Arc;

use crate::domain::{CarrierRecord, ConditionTable, PhoneSearchCategory, PhoneStatus, Verdict};
use crate::upstream::Lookup;

pub const PHONE_NOT_FOUND: &str = "Phone number not found";
pub const PHONE_INVALID_RESPONSE: &str = "Invalid response from carrier search";
pub const PHONE_NOT_KNOWN: &str = "Phone number not known";
pub const CARRIER_NOT_FOUND: &str = "Carrier not found";
pub const NO_AUTHORITY_ASSESSMENT: &str = "No authority assessment available";

/// Applies the configured condition table to lookup results.
#[derive(Debug, Clone)]
pub struct ConditionAssessor {
    conditions: Arc<ConditionTable>,
}

impl ConditionAssessor {
    pub fn new(conditions: Arc<ConditionTable>) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &ConditionTable {
        &self.conditions
    }

    /// Evaluate a phone rapid-check result.
    ///
    /// `phone_number_not_known` always fails with its own reason, whatever
    /// the table says about it.
    pub fn assess_phone(&self, status: &Lookup<PhoneStatus>) -> Verdict {
        let status = match status {
            Lookup::Found(status) => status,
            Lookup::NotFound => return Verdict::fail(PHONE_NOT_FOUND),
        };

        let category = match &status.phone_search_result_category {
            Some(category) => category,
            None => return Verdict::fail(PHONE_INVALID_RESPONSE),
        };

        if *category == PhoneSearchCategory::NotKnown {
            return Verdict::fail(PHONE_NOT_KNOWN);
        }

        if self.conditions.is_phone_category_active(category.as_str()) {
            return Verdict::fail(format!("Phone category: {}", category));
        }

        Verdict::pass()
    }

    /// Evaluate a carrier record from either the MC or DOT lookup.
    ///
    /// Active flags are checked in table order and the first failure is
    /// reported. Flags that name no authority check pass.
    pub fn assess_carrier(&self, carrier: &Lookup<CarrierRecord>) -> Verdict {
        let carrier = match carrier {
            Lookup::Found(carrier) => carrier,
            Lookup::NotFound => return Verdict::fail(CARRIER_NOT_FOUND),
        };

        let authority = match &carrier.authority_assessment {
            Some(authority) => authority,
            None => return Verdict::fail(NO_AUTHORITY_ASSESSMENT),
        };

        let failed = self
            .conditions
            .active_carrier_flags()
            .find(|flag| authority.check(flag) == Some(false));

        match failed {
            Some(flag) => Verdict::fail(format!("Failed condition: {}", flag)),
            None => Verdict::pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorityAssessment, VerdictResult};

    fn make_assessor(raw: &str) -> ConditionAssessor {
        ConditionAssessor::new(Arc::new(ConditionTable::from_json(raw).unwrap()))
    }

    fn standard_assessor() -> ConditionAssessor {
        make_assessor(
            r#"{
                "phone_conditions": [
                    {"flag": "phone_number_not_known", "active": 0},
                    {"flag": "found_phone_flagged_for_fraud", "active": 1},
                    {"flag": "found_phone_associated_with_one_carrier_and_passing_rule_assessment", "active": 0}
                ],
                "carrier_conditions": [
                    {"flag": "is_active_insurance", "active": 1},
                    {"flag": "is_satisfactory_safety_rating", "active": 0},
                    {"flag": "no_out_of_service_order", "active": 1},
                    {"flag": "has_cargo_coverage", "active": 1}
                ]
            }"#,
        )
    }

    fn phone(category: Option<&str>) -> Lookup<PhoneStatus> {
        Lookup::Found(PhoneStatus {
            phone_search_result_category: category.map(|c| PhoneSearchCategory::from(c.to_string())),
        })
    }

    fn carrier(authority: Option<AuthorityAssessment>) -> Lookup<CarrierRecord> {
        Lookup::Found(CarrierRecord {
            id: Some("1".to_string()),
            legal_name: Some("Acme Freight LLC".to_string()),
            authority_assessment: authority,
            ..Default::default()
        })
    }

    #[test]
    fn test_phone_not_found() {
        let verdict = standard_assessor().assess_phone(&Lookup::NotFound);
        assert_eq!(verdict, Verdict::fail(PHONE_NOT_FOUND));
    }

    #[test]
    fn test_phone_missing_category() {
        let verdict = standard_assessor().assess_phone(&phone(None));
        assert_eq!(verdict, Verdict::fail(PHONE_INVALID_RESPONSE));
    }

    #[test]
    fn test_phone_not_known_ignores_table() {
        // Inactive in the table, still fails.
        let verdict = standard_assessor().assess_phone(&phone(Some("phone_number_not_known")));
        assert_eq!(verdict, Verdict::fail(PHONE_NOT_KNOWN));

        // Active in the table, still reports the dedicated reason.
        let assessor = make_assessor(
            r#"{"phone_conditions": [{"flag": "phone_number_not_known", "active": 1}], "carrier_conditions": []}"#,
        );
        let verdict = assessor.assess_phone(&phone(Some("phone_number_not_known")));
        assert_eq!(verdict, Verdict::fail(PHONE_NOT_KNOWN));

        // Absent from the table entirely.
        let verdict = make_assessor(r#"{"phone_conditions": [], "carrier_conditions": []}"#)
            .assess_phone(&phone(Some("phone_number_not_known")));
        assert_eq!(verdict, Verdict::fail(PHONE_NOT_KNOWN));
    }

    #[test]
    fn test_phone_active_category_fails() {
        let verdict = standard_assessor().assess_phone(&phone(Some("found_phone_flagged_for_fraud")));
        assert_eq!(verdict.result, VerdictResult::Fail);
        assert_eq!(
            verdict.reason.as_deref(),
            Some("Phone category: found_phone_flagged_for_fraud")
        );
    }

    #[test]
    fn test_phone_inactive_or_unlisted_category_passes() {
        let assessor = standard_assessor();
        let inactive = assessor.assess_phone(&phone(Some(
            "found_phone_associated_with_one_carrier_and_passing_rule_assessment",
        )));
        assert_eq!(inactive, Verdict::pass());

        let unlisted = assessor.assess_phone(&phone(Some("caller_id_spoofing_attempt")));
        assert_eq!(unlisted, Verdict::pass());
    }

    #[test]
    fn test_phone_unrecognized_category_uses_table() {
        let assessor = make_assessor(
            r#"{"phone_conditions": [{"flag": "found_phone_on_watchlist", "active": 1}], "carrier_conditions": []}"#,
        );
        let verdict = assessor.assess_phone(&phone(Some("found_phone_on_watchlist")));
        assert_eq!(
            verdict,
            Verdict::fail("Phone category: found_phone_on_watchlist")
        );
    }

    #[test]
    fn test_carrier_not_found() {
        let verdict = standard_assessor().assess_carrier(&Lookup::NotFound);
        assert_eq!(verdict, Verdict::fail(CARRIER_NOT_FOUND));
    }

    #[test]
    fn test_carrier_without_authority_assessment() {
        let verdict = standard_assessor().assess_carrier(&carrier(None));
        assert_eq!(verdict, Verdict::fail(NO_AUTHORITY_ASSESSMENT));
    }

    #[test]
    fn test_carrier_all_checks_passing() {
        let verdict = standard_assessor().assess_carrier(&carrier(Some(AuthorityAssessment::default())));
        assert_eq!(verdict, Verdict::pass());
    }

    #[test]
    fn test_carrier_inactive_flag_is_ignored() {
        let authority = AuthorityAssessment {
            is_satisfactory_safety_rating: false,
            ..Default::default()
        };
        let verdict = standard_assessor().assess_carrier(&carrier(Some(authority)));
        assert_eq!(verdict, Verdict::pass());
    }

    #[test]
    fn test_carrier_insurance_failure() {
        let assessor = make_assessor(
            r#"{"phone_conditions": [], "carrier_conditions": [{"flag": "is_active_insurance", "active": 1}]}"#,
        );
        let authority = AuthorityAssessment {
            is_active_insurance: false,
            ..Default::default()
        };
        let verdict = assessor.assess_carrier(&carrier(Some(authority)));
        assert_eq!(verdict, Verdict::fail("Failed condition: is_active_insurance"));
    }

    #[test]
    fn test_carrier_reports_first_failure_in_table_order() {
        let authority = AuthorityAssessment {
            is_active_insurance: false,
            no_out_of_service_order: false,
            ..Default::default()
        };
        let verdict = standard_assessor().assess_carrier(&carrier(Some(authority.clone())));
        assert_eq!(verdict, Verdict::fail("Failed condition: is_active_insurance"));

        let reordered = make_assessor(
            r#"{"phone_conditions": [], "carrier_conditions": [
                {"flag": "no_out_of_service_order", "active": 1},
                {"flag": "is_active_insurance", "active": 1}
            ]}"#,
        );
        let verdict = reordered.assess_carrier(&carrier(Some(authority)));
        assert_eq!(verdict, Verdict::fail("Failed condition: no_out_of_service_order"));
    }
}
