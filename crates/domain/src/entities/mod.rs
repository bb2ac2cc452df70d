//! Domain entities - Content payloads and the catalog entries built from them

mod content_types;
mod encounter;
mod item;
mod library_entry;
mod location;
mod monster;
mod npc;
mod spell;
mod trap;

pub use content_types::{ContentKind, ContentPayload};
pub use encounter::{Encounter, EncounterCreature, EncounterDifficulty};
pub use item::{Cost, Item, ItemRarity, ItemType};
pub use library_entry::LibraryEntry;
pub use location::Location;
pub use monster::{Action, Monster};
pub use npc::Npc;
pub use spell::{Spell, SpellComponents, MAX_SPELL_LEVEL};
pub use trap::{SavingThrow, Trap};
