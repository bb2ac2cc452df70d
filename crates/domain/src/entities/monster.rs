//! Monster stat blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value_objects::AbilityScores;
use crate::DomainError;

/// A creature stat block in the 5e layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub name: String,
    /// Tiny, Small, Medium, Large, Huge or Gargantuan
    pub size: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub alignment: String,
    pub armor_class: u32,
    pub hit_points: u32,
    pub speed: String,
    pub abilities: AbilityScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saving_throws: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub damage_resistances: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub damage_immunities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub condition_immunities: Vec<String>,
    pub senses: String,
    pub languages: String,
    /// Kept as text so fractional ratings ("1/4") survive
    #[serde(deserialize_with = "challenge_rating_from_text_or_number")]
    pub challenge_rating: String,
    pub proficiency_bonus: i32,
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legendary_actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An action, legendary action or reaction on a stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
}

impl Action {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            attack_bonus: None,
            damage: None,
            damage_type: None,
        }
    }

    pub fn with_attack(
        mut self,
        bonus: i32,
        damage: impl Into<String>,
        damage_type: impl Into<String>,
    ) -> Self {
        self.attack_bonus = Some(bonus);
        self.damage = Some(damage.into());
        self.damage_type = Some(damage_type.into());
        self
    }
}

impl Monster {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.actions.is_empty() {
            return Err(DomainError::validation(format!(
                "monster '{}' needs at least one action",
                self.name
            )));
        }
        if self.actions.iter().any(|a| a.name.trim().is_empty()) {
            return Err(DomainError::validation("action name cannot be empty"));
        }
        if self.challenge_rating.trim().is_empty() {
            return Err(DomainError::validation("challenge rating cannot be empty"));
        }
        self.abilities.validate()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Models answer `"challengeRating": 2` as often as `"2"`.
fn challenge_rating_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Float(f) => match f {
            f if (f - 0.125).abs() < f64::EPSILON => "1/8".to_string(),
            f if (f - 0.25).abs() < f64::EPSILON => "1/4".to_string(),
            f if (f - 0.5).abs() < f64::EPSILON => "1/2".to_string(),
            f => f.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn goblin_json() -> serde_json::Value {
        json!({
            "name": "Goblin",
            "size": "Small",
            "type": "humanoid (goblinoid)",
            "alignment": "neutral evil",
            "armorClass": 15,
            "hitPoints": 7,
            "speed": "30 ft.",
            "abilities": {
                "strength": 8, "dexterity": 14, "constitution": 10,
                "intelligence": 10, "wisdom": 8, "charisma": 8
            },
            "skills": { "Stealth": 6 },
            "senses": "darkvision 60 ft., passive Perception 9",
            "languages": "Common, Goblin",
            "challengeRating": "1/4",
            "proficiencyBonus": 2,
            "actions": [
                { "name": "Scimitar", "description": "Melee Weapon Attack", "attackBonus": 4, "damage": "1d6+2", "damageType": "slashing" }
            ]
        })
    }

    #[test]
    fn deserializes_camel_case_stat_block() {
        let monster: Monster = serde_json::from_value(goblin_json()).unwrap();
        assert_eq!(monster.creature_type, "humanoid (goblinoid)");
        assert_eq!(monster.abilities.dexterity, 14);
        assert_eq!(monster.actions[0].attack_bonus, Some(4));
        assert!(monster.legendary_actions.is_empty());
        assert!(monster.validate().is_ok());
    }

    #[test]
    fn numeric_challenge_rating_is_accepted() {
        let mut value = goblin_json();
        value["challengeRating"] = json!(5);
        let monster: Monster = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(monster.challenge_rating, "5");

        value["challengeRating"] = json!(0.5);
        let monster: Monster = serde_json::from_value(value).unwrap();
        assert_eq!(monster.challenge_rating, "1/2");
    }

    #[test]
    fn missing_actions_field_is_a_shape_error() {
        let mut value = goblin_json();
        value.as_object_mut().unwrap().remove("actions");
        assert!(serde_json::from_value::<Monster>(value).is_err());
    }

    #[test]
    fn empty_actions_fail_validation() {
        let mut monster: Monster = serde_json::from_value(goblin_json()).unwrap();
        monster.actions.clear();
        assert!(monster.validate().is_err());
    }
}
