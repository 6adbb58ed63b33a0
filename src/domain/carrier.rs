//! Carrier record returned by the MC and DOT lookups.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Regulatory standing as evaluated by the provider.
///
/// Boolean checks default to passing when the provider omits them or sends
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorityAssessment {
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub carrier_interstate_authority_check: Option<String>,
    #[serde(default)]
    pub broker_interstate_authority_check: Option<String>,
    #[serde(default = "passing", deserialize_with = "deserialize_check")]
    pub is_active_insurance: bool,
    #[serde(default = "passing", deserialize_with = "deserialize_check")]
    pub no_out_of_service_order: bool,
    #[serde(default = "passing", deserialize_with = "deserialize_check")]
    pub is_satisfactory_safety_rating: bool,
    #[serde(default = "passing", deserialize_with = "deserialize_check")]
    pub is_operating_status_active: bool,
    #[serde(default = "passing", deserialize_with = "deserialize_check")]
    pub is_inspection_history_greater_than_zero: bool,
    #[serde(default)]
    pub latest_safety_rating: Option<String>,
}

impl AuthorityAssessment {
    /// Names of the boolean checks a carrier condition can reference.
    pub const CHECKS: [&'static str; 5] = [
        "is_active_insurance",
        "no_out_of_service_order",
        "is_satisfactory_safety_rating",
        "is_operating_status_active",
        "is_inspection_history_greater_than_zero",
    ];

    /// Value of the named check, or `None` if no such check exists.
    pub fn check(&self, flag: &str) -> Option<bool> {
        match flag {
            "is_active_insurance" => Some(self.is_active_insurance),
            "no_out_of_service_order" => Some(self.no_out_of_service_order),
            "is_satisfactory_safety_rating" => Some(self.is_satisfactory_safety_rating),
            "is_operating_status_active" => Some(self.is_operating_status_active),
            "is_inspection_history_greater_than_zero" => {
                Some(self.is_inspection_history_greater_than_zero)
            }
            _ => None,
        }
    }
}

impl Default for AuthorityAssessment {
    fn default() -> Self {
        Self {
            rating: None,
            carrier_interstate_authority_check: None,
            broker_interstate_authority_check: None,
            is_active_insurance: true,
            no_out_of_service_order: true,
            is_satisfactory_safety_rating: true,
            is_operating_status_active: true,
            is_inspection_history_greater_than_zero: true,
            latest_safety_rating: None,
        }
    }
}

/// Evaluation against broker-defined rule sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RulesAssessment {
    #[serde(default)]
    pub overall_result: Option<String>,
}

/// A carrier as described by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierRecord {
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub id: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub dba_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_carrier_number")]
    pub dot_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_carrier_number")]
    pub mc_number: Option<String>,
    #[serde(default)]
    pub authority_assessment: Option<AuthorityAssessment>,
    #[serde(default)]
    pub rules_assessment: Option<RulesAssessment>,
}

/// Strip leading zeros from an MC or DOT number.
///
/// Returns `None` when nothing is left.
pub fn normalize_number(raw: &str) -> Option<String> {
    let stripped = raw.trim().trim_start_matches('0');
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

fn passing() -> bool {
    true
}

/// Accepts booleans, `0`/`1` and the usual yes/no spellings; `null` passes.
fn deserialize_check<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(true),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| {
        serde::de::Error::custom(format!("expected a boolean authority check, got {value}"))
    })
}

/// Render a scalar JSON value as text; `None` for null, empty and non-scalars.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    // Zero is falsy upstream and means "no id".
    if value.as_f64() == Some(0.0) {
        return Ok(None);
    }
    Ok(scalar_to_string(value))
}

fn deserialize_carrier_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).and_then(|raw| normalize_number(&raw)))
}
