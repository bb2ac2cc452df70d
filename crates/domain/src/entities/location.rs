//! Locations: rooms, settlements and landmarks.

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    /// Free text: "Dungeon room", "Settlement", "Ruin", ...
    #[serde(rename = "type")]
    pub location_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inhabitants: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exits: Vec<String>,
    /// Adventure hooks rooted here
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<String>,
}

impl Location {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "location '{}' needs a description",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_default_to_empty() {
        let location: Location = serde_json::from_value(json!({
            "name": "Mossy Well",
            "type": "Landmark",
            "description": "An old well at the crossroads."
        }))
        .unwrap();
        assert!(location.features.is_empty());
        assert!(location.hooks.is_empty());
        assert!(location.validate().is_ok());
    }

    #[test]
    fn blank_description_fails_validation() {
        let location = Location {
            name: "Nowhere".into(),
            location_type: "Void".into(),
            description: " ".into(),
            features: vec![],
            inhabitants: vec![],
            exits: vec![],
            hooks: vec![],
        };
        assert!(location.validate().is_err());
    }
}
