//! LLM prompt templates for structured content generation.
//!
//! One entry per [`ContentKind`]: the system prompt (with the JSON shape the
//! model must return), sampling settings, and the prompt used when a
//! generation command is issued without an argument.

use advforge_domain::ContentKind;

use crate::infrastructure::ports::PartyContext;

/// Party assumed for encounters when the caller gives none.
pub const DEFAULT_PARTY: PartyContext = PartyContext { level: 1, size: 4 };

/// Generation settings for one content kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentPrompt {
    pub kind: ContentKind,
    /// System prompt; `{party_size}`/`{party_level}` are substituted for encounters.
    pub system_prompt: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Used for argument-less `/generate-*` commands.
    pub default_prompt: &'static str,
}

/// Get the prompt settings for a kind.
pub fn content_prompt(kind: ContentKind) -> ContentPrompt {
    match kind {
        ContentKind::Monster => ContentPrompt {
            kind,
            system_prompt: defaults::MONSTER_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 1500,
            default_prompt: "Create a unique monster with creative abilities and a memorable appearance.",
        },
        ContentKind::Npc => ContentPrompt {
            kind,
            system_prompt: defaults::NPC_SYSTEM_PROMPT,
            temperature: 0.9,
            max_tokens: 1000,
            default_prompt: "Create a memorable NPC with a compelling personality, background, and potential plot hooks.",
        },
        ContentKind::Encounter => ContentPrompt {
            kind,
            system_prompt: defaults::ENCOUNTER_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 1200,
            default_prompt: "Create a medium encounter. Balance it appropriately and include tactical elements.",
        },
        ContentKind::Item => ContentPrompt {
            kind,
            system_prompt: defaults::ITEM_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 800,
            default_prompt: "Create an uncommon magic item with interesting properties that would be useful and fun for players.",
        },
        ContentKind::Trap => ContentPrompt {
            kind,
            system_prompt: defaults::TRAP_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 600,
            default_prompt: "Create a mechanical trap that is challenging but fair, with clear detection and disarm methods.",
        },
        ContentKind::Spell => ContentPrompt {
            kind,
            system_prompt: defaults::SPELL_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 800,
            default_prompt: "Create a unique spell. Make it balanced and interesting with creative mechanics.",
        },
        ContentKind::Location => ContentPrompt {
            kind,
            system_prompt: defaults::LOCATION_SYSTEM_PROMPT,
            temperature: 0.8,
            max_tokens: 1000,
            default_prompt: "Create an evocative adventure location with notable features and plot hooks.",
        },
    }
}

impl ContentPrompt {
    /// System prompt with the party filled in.
    pub fn render_system_prompt(&self, party: PartyContext) -> String {
        self.system_prompt
            .replace("{party_size}", &party.size.to_string())
            .replace("{party_level}", &party.level.to_string())
    }

    /// User message sent to the model. Encounters carry the party inline.
    pub fn render_user_message(&self, prompt: &str, party: PartyContext) -> String {
        match self.kind {
            ContentKind::Encounter => format!(
                "{} (Party: {} level {} characters)",
                prompt, party.size, party.level
            ),
            _ => prompt.to_string(),
        }
    }
}

/// Default values for all content prompts.
pub mod defaults {
    pub const MONSTER_SYSTEM_PROMPT: &str = r#"You are a D&D 5e monster designer. Generate a complete monster stat block based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Monster Name",
  "size": "Medium",
  "type": "humanoid",
  "alignment": "neutral evil",
  "armorClass": 15,
  "hitPoints": 58,
  "speed": "30 ft.",
  "abilities": {
    "strength": 16,
    "dexterity": 14,
    "constitution": 16,
    "intelligence": 10,
    "wisdom": 13,
    "charisma": 12
  },
  "savingThrows": {"dex": 4, "wis": 3},
  "skills": {"perception": 3, "stealth": 4},
  "damageResistances": ["fire"],
  "damageImmunities": [],
  "conditionImmunities": [],
  "senses": "darkvision 60 ft., passive Perception 13",
  "languages": "Common, Goblin",
  "challengeRating": "3",
  "proficiencyBonus": 2,
  "actions": [
    {
      "name": "Multiattack",
      "description": "The monster makes two attacks."
    },
    {
      "name": "Longsword",
      "description": "Melee Weapon Attack: +5 to hit, reach 5 ft., one target. Hit: 7 (1d8 + 3) slashing damage.",
      "attackBonus": 5,
      "damage": "1d8 + 3",
      "damageType": "slashing"
    }
  ],
  "description": "A detailed description of the monster's appearance and behavior."
}"#;

    pub const NPC_SYSTEM_PROMPT: &str = r#"You are a D&D 5e NPC creator. Generate a complete NPC based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "NPC Name",
  "race": "Human",
  "class": "Fighter",
  "level": 5,
  "background": "Soldier",
  "alignment": "lawful good",
  "appearance": "A tall, weathered human with scars from many battles",
  "personality": "Gruff but honorable, speaks in short sentences",
  "ideals": "Protect the innocent at all costs",
  "bonds": "My old regiment is my family",
  "flaws": "I have trouble trusting magic users",
  "stats": {
    "strength": 16,
    "dexterity": 13,
    "constitution": 14,
    "intelligence": 10,
    "wisdom": 12,
    "charisma": 11
  },
  "skills": ["Athletics", "Intimidation", "Perception"],
  "equipment": ["Plate armor", "Longsword", "Shield", "50 gp"],
  "notes": "Additional roleplay notes and hooks"
}"#;

    pub const ENCOUNTER_SYSTEM_PROMPT: &str = r#"You are a D&D 5e encounter designer. Create a balanced encounter for a party of {party_size} level {party_level} characters.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Encounter Name",
  "description": "Detailed description of the encounter setup and environment",
  "difficulty": "medium",
  "environment": "Forest clearing",
  "creatures": [
    {
      "monsterId": "goblin-1",
      "name": "Goblin Scout",
      "quantity": 2,
      "hitPoints": 7,
      "initiative": 0,
      "conditions": [],
      "notes": "Hidden behind trees initially"
    }
  ],
  "treasures": [
    {
      "name": "Potion of Healing",
      "type": "potion",
      "rarity": "common",
      "requiresAttunement": false,
      "description": "A character who drinks this potion regains 2d4 + 2 hit points."
    }
  ],
  "experience": 200,
  "notes": "Tactical notes and special conditions for the encounter"
}"#;

    pub const ITEM_SYSTEM_PROMPT: &str = r#"You are a D&D 5e magic item creator. Generate a complete magic item based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Item Name",
  "type": "weapon",
  "rarity": "uncommon",
  "requiresAttunement": true,
  "description": "Detailed description of the item's appearance and magical properties",
  "properties": ["Versatile", "Magical"],
  "damage": "1d8",
  "damageType": "slashing",
  "weight": 3,
  "cost": {
    "amount": 500,
    "currency": "gp"
  },
  "magicalProperties": [
    "You gain a +1 bonus to attack and damage rolls made with this weapon.",
    "As a bonus action, you can cause the blade to shed bright light in a 10-foot radius."
  ]
}"#;

    pub const TRAP_SYSTEM_PROMPT: &str = r#"You are a D&D 5e trap designer. Create a trap based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Trap Name",
  "type": "mechanical",
  "trigger": "Pressure plate activated when stepped on",
  "effect": "Darts shoot from hidden holes in the walls",
  "detectDC": 15,
  "disarmDC": 15,
  "damage": "2d4",
  "damageType": "piercing",
  "savingThrow": {
    "ability": "dexterity",
    "dc": 15,
    "effect": "Half damage on success"
  },
  "description": "Detailed description of the trap's appearance and mechanics"
}"#;

    pub const SPELL_SYSTEM_PROMPT: &str = r#"You are a D&D 5e spell creator. Generate a complete spell based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Spell Name",
  "level": 3,
  "school": "evocation",
  "castingTime": "1 action",
  "range": "120 feet",
  "components": {
    "verbal": true,
    "somatic": true,
    "material": false,
    "materialComponent": ""
  },
  "duration": "Instantaneous",
  "concentration": false,
  "ritual": false,
  "description": "Detailed spell description including effects and mechanics",
  "higherLevels": "When you cast this spell using a spell slot of 4th level or higher...",
  "classes": ["Wizard", "Sorcerer"]
}"#;

    pub const LOCATION_SYSTEM_PROMPT: &str = r#"You are a D&D 5e adventure location designer. Create a location based on the user's request.
Return ONLY valid JSON matching this exact structure:
{
  "name": "Location Name",
  "type": "Dungeon room",
  "description": "What the characters see, hear and smell when they arrive",
  "features": ["Collapsed pillar offering half cover", "Shallow pool of brackish water"],
  "inhabitants": ["Two giant rats nesting under the rubble"],
  "exits": ["North: a narrow stair down", "East: a rusted portcullis"],
  "hooks": ["A half-burned journal hints at a hidden vault"]
}"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_prompt_asking_for_json() {
        for kind in ContentKind::ALL {
            let prompt = content_prompt(kind);
            assert_eq!(prompt.kind, kind);
            assert!(prompt.system_prompt.contains("Return ONLY valid JSON"));
            assert!(!prompt.default_prompt.is_empty());
        }
    }

    #[test]
    fn sampling_settings_follow_the_kind() {
        assert_eq!(content_prompt(ContentKind::Monster).max_tokens, 1500);
        assert_eq!(content_prompt(ContentKind::Npc).temperature, 0.9);
        assert_eq!(content_prompt(ContentKind::Trap).max_tokens, 600);
        assert_eq!(content_prompt(ContentKind::Encounter).max_tokens, 1200);
    }

    #[test]
    fn encounter_prompt_carries_the_party() {
        let prompt = content_prompt(ContentKind::Encounter);
        let party = PartyContext { level: 5, size: 3 };

        let system = prompt.render_system_prompt(party);
        assert!(system.contains("a party of 3 level 5 characters"));

        let user = prompt.render_user_message("Bandit ambush", party);
        assert_eq!(user, "Bandit ambush (Party: 3 level 5 characters)");
    }

    #[test]
    fn other_kinds_pass_the_prompt_through() {
        let prompt = content_prompt(ContentKind::Item);
        assert_eq!(
            prompt.render_user_message("a cursed ring", DEFAULT_PARTY),
            "a cursed ring"
        );
        assert_eq!(
            prompt.render_system_prompt(DEFAULT_PARTY),
            defaults::ITEM_SYSTEM_PROMPT
        );
    }
}
