//! Static content catalog backing the library commands.
//!
//! The catalog is built once at startup (built-in entries, or a JSON file
//! that replaces them) and shared read-only behind an `Arc`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use advforge_domain::{ContentKind, DomainError, LibraryEntry};
use thiserror::Error;

use super::builtin::builtin_entries;

/// Errors that can occur while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Invalid catalog JSON: {0}")]
    Parse(String),
    #[error("Invalid catalog entry '{id}': {source}")]
    InvalidEntry {
        id: String,
        #[source]
        source: DomainError,
    },
    #[error("Duplicate catalog entry id: {0}")]
    DuplicateId(String),
}

/// Filter criteria for catalog queries.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub kind: Option<ContentKind>,
    /// Text search in name/description.
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn kind(kind: ContentKind) -> Self {
        Self {
            kind: Some(kind),
            search: None,
        }
    }

    pub fn matches(&self, entry: &LibraryEntry) -> bool {
        if let Some(kind) = self.kind {
            if entry.kind() != kind {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let search_lower = search.trim().to_lowercase();
            if !search_lower.is_empty()
                && !entry.name().to_lowercase().contains(&search_lower)
                && !entry.description.to_lowercase().contains(&search_lower)
            {
                return false;
            }
        }

        true
    }
}

/// Read-only collection of library entries.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    entries: Vec<LibraryEntry>,
}

impl ContentCatalog {
    /// Build a catalog, validating every entry and rejecting duplicate ids.
    pub fn new(entries: Vec<LibraryEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            entry.validate().map_err(|source| CatalogError::InvalidEntry {
                id: entry.id.clone(),
                source,
            })?;
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The catalog shipped with the engine.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<LibraryEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(entries)
    }

    /// Load a catalog file.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded content catalog");
        Ok(catalog)
    }

    /// The file at `path` when given, otherwise the built-in catalog.
    pub async fn load_or_builtin(path: Option<&Path>) -> Result<Arc<Self>, CatalogError> {
        let catalog = match path {
            Some(path) => Self::load(path).await?,
            None => Self::builtin(),
        };
        Ok(Arc::new(catalog))
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, in catalog order.
    pub fn by_kind(&self, kind: ContentKind) -> Vec<&LibraryEntry> {
        self.filtered(&CatalogFilter::kind(kind))
    }

    pub fn filtered(&self, filter: &CatalogFilter) -> Vec<&LibraryEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    /// First entry of `kind` whose name fuzzily matches `query`.
    pub fn find(&self, kind: ContentKind, query: &str) -> Option<&LibraryEntry> {
        self.entries
            .iter()
            .find(|e| e.kind() == kind && e.matches_query(query))
    }

    pub fn get(&self, id: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advforge_domain::ContentPayload;

    #[test]
    fn find_is_scoped_to_the_kind() {
        let catalog = ContentCatalog::builtin();
        let goblin = catalog.find(ContentKind::Monster, "goblin").unwrap();
        assert_eq!(goblin.name(), "Goblin");
        assert!(catalog.find(ContentKind::Npc, "goblin").is_none());
    }

    #[test]
    fn find_matches_in_either_direction() {
        let catalog = ContentCatalog::builtin();
        let orc = catalog.find(ContentKind::Monster, "Orc war chief").unwrap();
        assert_eq!(orc.id, "monster-orc");
    }

    #[test]
    fn by_kind_keeps_catalog_order() {
        let catalog = ContentCatalog::builtin();
        let names: Vec<_> = catalog
            .by_kind(ContentKind::Location)
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["Dungeon Room", "Settlement"]);
    }

    #[test]
    fn search_filter_looks_at_descriptions() {
        let catalog = ContentCatalog::builtin();
        let filter = CatalogFilter {
            kind: None,
            search: Some("spellcasting".into()),
        };
        let hits = catalog.filtered(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "monster-spellcaster");
    }

    #[test]
    fn json_catalog_replaces_builtins() {
        let json = r#"[{
            "id": "loc-1",
            "description": "Where the story begins",
            "template": {"kind": "location", "data": {
                "name": "Crossroads Inn",
                "type": "Inn",
                "description": "A warm common room and a cold welcome."
            }}
        }]"#;
        let catalog = ContentCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("loc-1").unwrap().name(), "Crossroads Inn");
        assert!(catalog.by_kind(ContentKind::Monster).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entry = ContentCatalog::builtin().entries()[0].clone();
        let err = ContentCatalog::new(vec![entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "monster-basic"));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let mut entry = ContentCatalog::builtin().entries()[0].clone();
        let ContentPayload::Monster(monster) = &mut entry.template else {
            panic!("expected a monster");
        };
        monster.name.clear();
        let err = ContentCatalog::new(vec![entry]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ContentCatalog::from_json_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = ContentCatalog::load(Path::new("/nonexistent/catalog.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
