//! Condition table loaded from `config/conditions.json`.
//!
//! The table is read once at startup and shared read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::AuthorityAssessment;

/// Failure while loading the condition file.
#[derive(Debug, Error)]
pub enum ConditionsError {
    #[error("failed to read condition file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed condition file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One `{flag, active}` entry as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub flag: String,
    #[serde(deserialize_with = "deserialize_active")]
    pub active: bool,
}

fn deserialize_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match u8::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "active must be 0 or 1, got {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ConditionFile {
    phone_conditions: Vec<ConditionEntry>,
    carrier_conditions: Vec<ConditionEntry>,
}

/// Immutable pair of condition tables.
#[derive(Debug, Clone, Default)]
pub struct ConditionTable {
    phone: HashMap<String, bool>,
    /// Declaration order matters: the first failing flag is reported.
    carrier: Vec<(String, bool)>,
}

impl ConditionTable {
    /// Build the table from parsed entries.
    ///
    /// A repeated flag takes the last `active` value; carrier flags keep
    /// the position of their first occurrence.
    pub fn new(phone: Vec<ConditionEntry>, carrier: Vec<ConditionEntry>) -> Self {
        let phone = phone.into_iter().map(|e| (e.flag, e.active)).collect();

        let mut ordered: Vec<(String, bool)> = Vec::with_capacity(carrier.len());
        for entry in carrier {
            match ordered.iter_mut().find(|(flag, _)| *flag == entry.flag) {
                Some(existing) => existing.1 = entry.active,
                None => ordered.push((entry.flag, entry.active)),
            }
        }

        Self {
            phone,
            carrier: ordered,
        }
    }

    /// Parse a condition document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: ConditionFile = serde_json::from_str(raw)?;
        Ok(Self::new(file.phone_conditions, file.carrier_conditions))
    }

    /// Load and parse the condition file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConditionsError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| ConditionsError::Io {
            path: path_display.clone(),
            source,
        })?;
        let table = Self::from_json(&raw).map_err(|source| ConditionsError::Parse {
            path: path_display.clone(),
            source,
        })?;

        for flag in table.unknown_carrier_flags() {
            tracing::warn!(
                flag = %flag,
                path = %path_display,
                "Carrier condition does not name an authority check and will always pass"
            );
        }

        tracing::info!(
            path = %path_display,
            phone_conditions = table.phone.len(),
            carrier_conditions = table.carrier.len(),
            "Condition table loaded"
        );

        Ok(table)
    }

    /// Whether a phone category is configured as failing.
    pub fn is_phone_category_active(&self, category: &str) -> bool {
        self.phone.get(category).copied().unwrap_or(false)
    }

    /// Active carrier flags in declaration order.
    pub fn active_carrier_flags(&self) -> impl Iterator<Item = &str> {
        self.carrier
            .iter()
            .filter(|(_, active)| *active)
            .map(|(flag, _)| flag.as_str())
    }

    pub fn phone_len(&self) -> usize {
        self.phone.len()
    }

    pub fn carrier_len(&self) -> usize {
        self.carrier.len()
    }

    fn unknown_carrier_flags(&self) -> impl Iterator<Item = &str> {
        self.carrier
            .iter()
            .map(|(flag, _)| flag.as_str())
            .filter(|flag| !AuthorityAssessment::CHECKS.contains(flag))
    }
}
