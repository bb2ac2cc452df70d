//! Spells.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Highest spell level in the 5e rules.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// A spell description. Level 0 is a cantrip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub name: String,
    pub level: u8,
    /// School of magic (e.g., "evocation", "necromancy")
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub components: SpellComponents,
    pub duration: String,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub higher_levels: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Spell {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "spell level {} is outside 0-{}",
                self.level, MAX_SPELL_LEVEL
            )));
        }
        if self.school.trim().is_empty() {
            return Err(DomainError::validation("spell school cannot be empty"));
        }
        Ok(())
    }
}

/// Verbal, somatic and material components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellComponents {
    #[serde(default)]
    pub verbal: bool,
    #[serde(default)]
    pub somatic: bool,
    #[serde(default)]
    pub material: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_component: Option<String>,
}

impl SpellComponents {
    /// Short form used in stat blocks: `V, S, M (a bit of fleece)`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.verbal {
            parts.push("V".to_string());
        }
        if self.somatic {
            parts.push("S".to_string());
        }
        if self.material {
            match &self.material_component {
                Some(m) if !m.trim().is_empty() => parts.push(format!("M ({})", m.trim())),
                _ => parts.push("M".to_string()),
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fireball() -> Spell {
        serde_json::from_value(json!({
            "name": "Fireball",
            "level": 3,
            "school": "evocation",
            "castingTime": "1 action",
            "range": "150 feet",
            "components": { "verbal": true, "somatic": true, "material": true, "materialComponent": "a tiny ball of bat guano and sulfur" },
            "duration": "Instantaneous",
            "description": "A bright streak flashes to a point you choose.",
            "higherLevels": "+1d6 per slot level above 3rd.",
            "classes": ["Sorcerer", "Wizard"]
        }))
        .unwrap()
    }

    #[test]
    fn flags_default_to_false() {
        let spell = fireball();
        assert!(!spell.ritual);
        assert!(!spell.concentration);
        assert!(!spell.is_cantrip());
    }

    #[test]
    fn component_summary_lists_material() {
        assert_eq!(
            fireball().components.summary(),
            "V, S, M (a tiny ball of bat guano and sulfur)"
        );
        let bare = SpellComponents { verbal: true, ..Default::default() };
        assert_eq!(bare.summary(), "V");
    }

    #[test]
    fn level_above_nine_fails_validation() {
        let mut spell = fireball();
        spell.level = 10;
        assert!(spell.validate().is_err());
        spell.level = 9;
        assert!(spell.validate().is_ok());
    }
}
