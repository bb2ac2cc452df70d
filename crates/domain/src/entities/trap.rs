//! Traps and hazards.

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trap {
    pub name: String,
    /// mechanical, magical or natural
    #[serde(rename = "type")]
    pub trap_type: String,
    pub trigger: String,
    pub effect: String,
    #[serde(rename = "detectDC")]
    pub detect_dc: u32,
    #[serde(rename = "disarmDC")]
    pub disarm_dc: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saving_throw: Option<SavingThrow>,
    pub description: String,
}

/// Save the victims roll against the trap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrow {
    pub ability: String,
    pub dc: u32,
    pub effect: String,
}

impl Trap {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.trigger.trim().is_empty() {
            return Err(DomainError::validation("trap trigger cannot be empty"));
        }
        for (label, dc) in [("detect", self.detect_dc), ("disarm", self.disarm_dc)] {
            if dc == 0 || dc > 30 {
                return Err(DomainError::validation(format!(
                    "trap {} DC {} is outside 1-30",
                    label, dc
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dc_fields_use_upper_case_wire_names() {
        let trap: Trap = serde_json::from_value(json!({
            "name": "Poison Needle",
            "type": "mechanical",
            "trigger": "Opening the lock without its key",
            "effect": "A needle springs out",
            "detectDC": 20,
            "disarmDC": 15,
            "damage": "1",
            "damageType": "piercing",
            "savingThrow": { "ability": "Constitution", "dc": 15, "effect": "poisoned for 1 hour" },
            "description": "A tiny needle hidden in the lock."
        }))
        .unwrap();
        assert_eq!(trap.detect_dc, 20);
        assert_eq!(trap.saving_throw.as_ref().unwrap().dc, 15);
        let back = serde_json::to_value(&trap).unwrap();
        assert_eq!(back["disarmDC"], 15);
        assert!(trap.validate().is_ok());
    }

    #[test]
    fn zero_dc_fails_validation() {
        let trap = Trap {
            name: "Loose Stone".into(),
            trap_type: "natural".into(),
            trigger: "Stepping on it".into(),
            effect: "You trip".into(),
            detect_dc: 0,
            disarm_dc: 10,
            damage: None,
            damage_type: None,
            saving_throw: None,
            description: "A wobbling flagstone.".into(),
        };
        assert!(trap.validate().is_err());
    }
}
