//! Catalog entries backing the `add-*` commands.

use serde::{Deserialize, Serialize};

use crate::entities::{ContentKind, ContentPayload};
use crate::DomainError;

/// A prebuilt piece of content the catalog can hand out.
///
/// The entry's name and kind come from its template, so the two can never
/// disagree. Entries are read-only once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: String,
    pub description: String,
    pub template: ContentPayload,
}

impl LibraryEntry {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        template: ContentPayload,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            template,
        }
    }

    pub fn name(&self) -> &str {
        self.template.name()
    }

    pub fn kind(&self) -> ContentKind {
        self.template.kind()
    }

    /// Loose name match: case-insensitive containment in either direction.
    ///
    /// `"gob"` matches "Goblin", and so does `"goblin boss"`.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        let name = self.name().to_lowercase();
        name.contains(&query) || query.contains(&name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("library entry id cannot be empty"));
        }
        self.template.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Location;

    fn entry(name: &str) -> LibraryEntry {
        LibraryEntry::new(
            "room-1",
            "A plain room",
            ContentPayload::Location(Location {
                name: name.into(),
                location_type: "Dungeon room".into(),
                description: "Four walls and a door.".into(),
                features: vec![],
                inhabitants: vec![],
                exits: vec![],
                hooks: vec![],
            }),
        )
    }

    #[test]
    fn name_and_kind_come_from_template() {
        let e = entry("Guard Room");
        assert_eq!(e.name(), "Guard Room");
        assert_eq!(e.kind(), ContentKind::Location);
    }

    #[test]
    fn query_matches_in_both_directions() {
        let e = entry("Goblin");
        assert!(e.matches_query("gob"));
        assert!(e.matches_query("GOBLIN"));
        assert!(e.matches_query("goblin boss"));
        assert!(!e.matches_query("orc"));
        assert!(!e.matches_query("  "));
    }

    #[test]
    fn blank_id_fails_validation() {
        let mut e = entry("Guard Room");
        e.id = String::new();
        assert!(e.validate().is_err());
    }
}
