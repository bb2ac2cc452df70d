//! Content catalog use cases.
//!
//! Provides the static library of monsters, NPCs, items, spells, traps,
//! locations and encounters that the `add-*` commands draw from.

mod builtin;
mod catalog;

pub use builtin::builtin_entries;
pub use catalog::{CatalogError, CatalogFilter, ContentCatalog};
