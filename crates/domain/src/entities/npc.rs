//! Non-player characters.

use serde::{Deserialize, Serialize};

use crate::value_objects::AbilityScores;
use crate::DomainError;

/// A non-player character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    pub name: String,
    pub race: String,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub alignment: String,
    pub appearance: String,
    pub personality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flaws: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<AbilityScores>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Npc {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(level) = self.level {
            if !(1..=20).contains(&level) {
                return Err(DomainError::validation(format!(
                    "NPC level {} is outside 1-20",
                    level
                )));
            }
        }
        match &self.stats {
            Some(stats) => stats.validate(),
            None => Ok(()),
        }
    }
}
