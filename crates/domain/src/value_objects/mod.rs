//! Value objects - Immutable objects defined by their attributes

mod abilities;
mod directive;

pub use abilities::{
    ability_modifier, format_modifier, Ability, AbilityScores, MAX_ABILITY_SCORE,
    MIN_ABILITY_SCORE,
};
pub use directive::Directive;
