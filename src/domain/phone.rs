//! Phone rapid-check result types.

use serde::{Deserialize, Serialize};

/// Outcome category reported by the phone rapid check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhoneSearchCategory {
    FlaggedForFraud,
    CarrierWithIdentityAlert,
    DispatcherService,
    OneCarrierPassingRuleAssessment,
    OneCarrierFailingRuleAssessment,
    OneCarrierIncompleteRuleAssessment,
    OneCarrierNotInBrokersNetwork,
    MultipleCarriers,
    BlockedUserOrCompany,
    CallerIdSpoofingAttempt,
    KnownPhoneNotBelongingToCarrier,
    NotKnownAndHighRisk,
    NotKnown,
    /// A category the provider added after this build; kept verbatim.
    Unrecognized(String),
}

impl PhoneSearchCategory {
    pub fn as_str(&self) -> &str {
        match self {
            PhoneSearchCategory::FlaggedForFraud => "found_phone_flagged_for_fraud",
            PhoneSearchCategory::CarrierWithIdentityAlert => {
                "found_phone_of_carrier_with_identity_alert"
            }
            PhoneSearchCategory::DispatcherService => "found_phone_of_dispatcher_service",
            PhoneSearchCategory::OneCarrierPassingRuleAssessment => {
                "found_phone_associated_with_one_carrier_and_passing_rule_assessment"
            }
            PhoneSearchCategory::OneCarrierFailingRuleAssessment => {
                "found_phone_associated_with_one_carrier_and_failing_rule_assessment"
            }
            PhoneSearchCategory::OneCarrierIncompleteRuleAssessment => {
                "found_phone_associated_with_one_carrier_and_incomplete_rule_assessment"
            }
            PhoneSearchCategory::OneCarrierNotInBrokersNetwork => {
                "found_phone_associated_with_one_carrier_and_not_in_brokers_network"
            }
            PhoneSearchCategory::MultipleCarriers => {
                "found_phone_associated_with_multiple_carriers"
            }
            PhoneSearchCategory::BlockedUserOrCompany => "found_phone_of_blocked_user_or_company",
            PhoneSearchCategory::CallerIdSpoofingAttempt => "caller_id_spoofing_attempt",
            PhoneSearchCategory::KnownPhoneNotBelongingToCarrier => {
                "known_phone_not_belonging_to_carrier"
            }
            PhoneSearchCategory::NotKnownAndHighRisk => "phone_number_not_known_and_high_risk",
            PhoneSearchCategory::NotKnown => "phone_number_not_known",
            PhoneSearchCategory::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<String> for PhoneSearchCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "found_phone_flagged_for_fraud" => PhoneSearchCategory::FlaggedForFraud,
            "found_phone_of_carrier_with_identity_alert" => {
                PhoneSearchCategory::CarrierWithIdentityAlert
            }
            "found_phone_of_dispatcher_service" => PhoneSearchCategory::DispatcherService,
            "found_phone_associated_with_one_carrier_and_passing_rule_assessment" => {
                PhoneSearchCategory::OneCarrierPassingRuleAssessment
            }
            "found_phone_associated_with_one_carrier_and_failing_rule_assessment" => {
                PhoneSearchCategory::OneCarrierFailingRuleAssessment
            }
            "found_phone_associated_with_one_carrier_and_incomplete_rule_assessment" => {
                PhoneSearchCategory::OneCarrierIncompleteRuleAssessment
            }
            "found_phone_associated_with_one_carrier_and_not_in_brokers_network" => {
                PhoneSearchCategory::OneCarrierNotInBrokersNetwork
            }
            "found_phone_associated_with_multiple_carriers" => {
                PhoneSearchCategory::MultipleCarriers
            }
            "found_phone_of_blocked_user_or_company" => PhoneSearchCategory::BlockedUserOrCompany,
            "caller_id_spoofing_attempt" => PhoneSearchCategory::CallerIdSpoofingAttempt,
            "known_phone_not_belonging_to_carrier" => {
                PhoneSearchCategory::KnownPhoneNotBelongingToCarrier
            }
            "phone_number_not_known_and_high_risk" => PhoneSearchCategory::NotKnownAndHighRisk,
            "phone_number_not_known" => PhoneSearchCategory::NotKnown,
            _ => PhoneSearchCategory::Unrecognized(raw),
        }
    }
}

impl From<PhoneSearchCategory> for String {
    fn from(category: PhoneSearchCategory) -> Self {
        match category {
            PhoneSearchCategory::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PhoneSearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful phone rapid check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneStatus {
    #[serde(default)]
    pub phone_search_result_category: Option<PhoneSearchCategory>,
}
