//! Content kinds and the tagged payload union.
//!
//! Every piece of generated or catalogued game content is one of seven kinds.
//! `ContentKind` is the single key the rest of the system dispatches on
//! (command table, prompt table, fallback table, formatter).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{Encounter, Item, Location, Monster, Npc, Spell, Trap};
use crate::DomainError;

/// The kinds of content a directive can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Monster,
    Npc,
    Item,
    Spell,
    Trap,
    Location,
    Encounter,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [ContentKind; 7] = [
        ContentKind::Monster,
        ContentKind::Npc,
        ContentKind::Item,
        ContentKind::Spell,
        ContentKind::Trap,
        ContentKind::Location,
        ContentKind::Encounter,
    ];

    /// Wire name (`"monster"`, `"npc"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Monster => "monster",
            ContentKind::Npc => "npc",
            ContentKind::Item => "item",
            ContentKind::Spell => "spell",
            ContentKind::Trap => "trap",
            ContentKind::Location => "location",
            ContentKind::Encounter => "encounter",
        }
    }

    /// Human-readable label for UI and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Monster => "Monster",
            ContentKind::Npc => "NPC",
            ContentKind::Item => "Item",
            ContentKind::Spell => "Spell",
            ContentKind::Trap => "Trap",
            ContentKind::Location => "Location",
            ContentKind::Encounter => "Encounter",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monster" => Ok(ContentKind::Monster),
            "npc" => Ok(ContentKind::Npc),
            "item" => Ok(ContentKind::Item),
            "spell" => Ok(ContentKind::Spell),
            "trap" => Ok(ContentKind::Trap),
            "location" => Ok(ContentKind::Location),
            "encounter" => Ok(ContentKind::Encounter),
            other => Err(DomainError::parse(format!(
                "Unsupported content type: {}",
                other
            ))),
        }
    }
}

/// Structured content of one kind.
///
/// Serialized as `{"kind": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ContentPayload {
    Monster(Monster),
    Npc(Npc),
    Item(Item),
    Spell(Spell),
    Trap(Trap),
    Location(Location),
    Encounter(Encounter),
}

impl ContentPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentPayload::Monster(_) => ContentKind::Monster,
            ContentPayload::Npc(_) => ContentKind::Npc,
            ContentPayload::Item(_) => ContentKind::Item,
            ContentPayload::Spell(_) => ContentKind::Spell,
            ContentPayload::Trap(_) => ContentKind::Trap,
            ContentPayload::Location(_) => ContentKind::Location,
            ContentPayload::Encounter(_) => ContentKind::Encounter,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ContentPayload::Monster(m) => &m.name,
            ContentPayload::Npc(n) => &n.name,
            ContentPayload::Item(i) => &i.name,
            ContentPayload::Spell(s) => &s.name,
            ContentPayload::Trap(t) => &t.name,
            ContentPayload::Location(l) => &l.name,
            ContentPayload::Encounter(e) => &e.name,
        }
    }

    /// Check the invariants every payload must satisfy before it is rendered.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name().trim().is_empty() {
            return Err(DomainError::validation(format!(
                "{} name cannot be empty",
                self.kind().label()
            )));
        }
        match self {
            ContentPayload::Monster(m) => m.validate(),
            ContentPayload::Npc(n) => n.validate(),
            ContentPayload::Item(i) => i.validate(),
            ContentPayload::Spell(s) => s.validate(),
            ContentPayload::Trap(t) => t.validate(),
            ContentPayload::Location(l) => l.validate(),
            ContentPayload::Encounter(e) => e.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cellar() -> ContentPayload {
        ContentPayload::Location(Location {
            name: "Flooded Cellar".into(),
            location_type: "Dungeon room".into(),
            description: "Knee-deep water hides a collapsed stair.".into(),
            features: vec![],
            inhabitants: vec![],
            exits: vec![],
            hooks: vec![],
        })
    }

    #[test]
    fn kind_round_trips_through_wire_name() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>().unwrap(), kind);
        }
        assert_eq!("NPC".parse::<ContentKind>().unwrap(), ContentKind::Npc);
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = "shop".parse::<ContentKind>().unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn payload_reports_kind_and_name() {
        let payload = cellar();
        assert_eq!(payload.kind(), ContentKind::Location);
        assert_eq!(payload.name(), "Flooded Cellar");
    }

    #[test]
    fn blank_name_fails_validation() {
        let ContentPayload::Location(mut location) = cellar() else {
            panic!("expected a location");
        };
        location.name = "   ".into();
        let payload = ContentPayload::Location(location);
        assert!(matches!(payload.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let json = serde_json::to_value(cellar()).unwrap();
        assert_eq!(json["kind"], "location");
        assert_eq!(json["data"]["name"], "Flooded Cellar");
        assert_eq!(json["data"]["type"], "Dungeon room");
    }
}
