//! The six ability scores shared by monsters and NPCs.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Lowest and highest ability score the 5e rules allow.
pub const MIN_ABILITY_SCORE: u8 = 1;
pub const MAX_ABILITY_SCORE: u8 = 30;

/// One of the six abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Three-letter column header (`STR`, `DEX`, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

/// A full set of ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    /// Every ability set to the same score (commoners are all 10s).
    pub fn uniform(score: u8) -> Self {
        Self::new(score, score, score, score, score, score)
    }

    /// Scores in the fixed STR, DEX, CON, INT, WIS, CHA column order.
    pub fn columns(&self) -> [(Ability, u8); 6] {
        [
            (Ability::Strength, self.strength),
            (Ability::Dexterity, self.dexterity),
            (Ability::Constitution, self.constitution),
            (Ability::Intelligence, self.intelligence),
            (Ability::Wisdom, self.wisdom),
            (Ability::Charisma, self.charisma),
        ]
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (ability, score) in self.columns() {
            if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
                return Err(DomainError::validation(format!(
                    "{} score {} is outside {}-{}",
                    ability.abbreviation(),
                    score,
                    MIN_ABILITY_SCORE,
                    MAX_ABILITY_SCORE
                )));
            }
        }
        Ok(())
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

/// Ability modifier: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: u8) -> i32 {
    (i32::from(score) - 10).div_euclid(2)
}

/// Modifier as it appears in a stat block: `+2`, `+0`, `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_round_toward_negative_infinity() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn modifier_text_is_signed() {
        assert_eq!(format_modifier(2), "+2");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn columns_follow_stat_block_order() {
        let scores = AbilityScores::new(14, 12, 15, 8, 13, 10);
        let headers: Vec<_> = scores.columns().iter().map(|(a, _)| a.abbreviation()).collect();
        assert_eq!(headers, ["STR", "DEX", "CON", "INT", "WIS", "CHA"]);
        assert_eq!(scores.columns()[3].1, 8);
    }

    #[test]
    fn zero_score_is_rejected() {
        let scores = AbilityScores::new(0, 10, 10, 10, 10, 10);
        assert!(scores.validate().is_err());
        assert!(AbilityScores::default().validate().is_ok());
    }
}
