//! Encounters: creatures, difficulty and rewards for one scene.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub name: String,
    pub description: String,
    pub difficulty: EncounterDifficulty,
    pub environment: String,
    pub creatures: Vec<EncounterCreature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub treasures: Vec<Item>,
    pub experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Encounter {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.creatures.is_empty() {
            return Err(DomainError::validation(format!(
                "encounter '{}' needs at least one creature",
                self.name
            )));
        }
        if let Some(c) = self.creatures.iter().find(|c| c.quantity == 0) {
            return Err(DomainError::validation(format!(
                "creature '{}' has a quantity of zero",
                c.name
            )));
        }
        self.treasures.iter().try_for_each(Item::validate)
    }
}

/// One line of the creature roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterCreature {
    /// Catalog id of the stat block, when there is one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub monster_id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EncounterCreature {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            monster_id: String::new(),
            name: name.into(),
            quantity,
            hit_points: None,
            initiative: None,
            conditions: Vec::new(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EncounterDifficulty {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl EncounterDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterDifficulty::Easy => "easy",
            EncounterDifficulty::Medium => "medium",
            EncounterDifficulty::Hard => "hard",
            EncounterDifficulty::Deadly => "deadly",
        }
    }
}

impl FromStr for EncounterDifficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(EncounterDifficulty::Easy),
            "medium" => Ok(EncounterDifficulty::Medium),
            "hard" => Ok(EncounterDifficulty::Hard),
            "deadly" => Ok(EncounterDifficulty::Deadly),
            _ => Err(DomainError::parse(format!(
                "Unknown encounter difficulty: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for EncounterDifficulty {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EncounterDifficulty> for String {
    fn from(d: EncounterDifficulty) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for EncounterDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ambush() -> Encounter {
        serde_json::from_value(json!({
            "name": "Roadside Ambush",
            "description": "Goblins burst from the brush.",
            "difficulty": "Medium",
            "environment": "forest road",
            "creatures": [{ "name": "Goblin", "quantity": 4 }],
            "experience": 200
        }))
        .unwrap()
    }

    #[test]
    fn difficulty_is_case_insensitive() {
        assert_eq!(ambush().difficulty, EncounterDifficulty::Medium);
        assert!("brutal".parse::<EncounterDifficulty>().is_err());
    }

    #[test]
    fn roster_needs_a_creature() {
        let mut encounter = ambush();
        assert!(encounter.validate().is_ok());
        encounter.creatures.clear();
        assert!(encounter.validate().is_err());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let mut encounter = ambush();
        encounter.creatures.push(EncounterCreature::new("Wolf", 0));
        assert!(encounter.validate().is_err());
    }
}
