//! Adventure Forge domain: content kinds, structured payloads, slash-command
//! directives and catalog entries.
//!
//! This crate is pure data plus invariants. It performs no I/O and knows
//! nothing about HTTP, LLM providers or markup.

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Action, ContentKind, ContentPayload, Cost, Encounter, EncounterCreature, EncounterDifficulty,
    Item, ItemRarity, ItemType, LibraryEntry, Location, Monster, Npc, SavingThrow, Spell,
    SpellComponents, Trap, MAX_SPELL_LEVEL,
};

pub use error::DomainError;

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ability_modifier, format_modifier, Ability, AbilityScores, Directive, MAX_ABILITY_SCORE,
    MIN_ABILITY_SCORE,
};
