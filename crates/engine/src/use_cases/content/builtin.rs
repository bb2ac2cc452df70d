//! Built-in catalog entries shipped with the engine.

use std::collections::BTreeMap;

use advforge_domain::{
    AbilityScores, Action, ContentPayload, Cost, Encounter, EncounterCreature, EncounterDifficulty,
    Item, ItemRarity, ItemType, LibraryEntry, Location, Monster, Npc, SavingThrow, Spell,
    SpellComponents, Trap,
};

fn bonuses(pairs: &[(&str, i32)]) -> Option<BTreeMap<String, i32>> {
    Some(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Every built-in entry, grouped by kind in display order.
pub fn builtin_entries() -> Vec<LibraryEntry> {
    vec![
        // Monsters
        LibraryEntry::new(
            "monster-basic",
            "Standard monster stat block following D&D 5e format",
            ContentPayload::Monster(basic_monster()),
        ),
        LibraryEntry::new(
            "monster-spellcaster",
            "Monster with spellcasting abilities",
            ContentPayload::Monster(spellcaster()),
        ),
        LibraryEntry::new(
            "monster-goblin",
            "Small, cowardly humanoid that fights dirty",
            ContentPayload::Monster(goblin()),
        ),
        LibraryEntry::new(
            "monster-orc",
            "Savage raider driven by hatred of civilized folk",
            ContentPayload::Monster(orc()),
        ),
        // NPCs
        LibraryEntry::new(
            "npc-basic",
            "Non-combat NPC with roleplay information",
            ContentPayload::Npc(basic_npc()),
        ),
        // Items
        LibraryEntry::new(
            "magic-item",
            "Magic item with proper D&D formatting",
            ContentPayload::Item(magic_item()),
        ),
        LibraryEntry::new(
            "mundane-item",
            "Non-magical item or equipment",
            ContentPayload::Item(mundane_item()),
        ),
        // Spells
        LibraryEntry::new(
            "spell-magic-missile",
            "Reliable first-level force damage",
            ContentPayload::Spell(magic_missile()),
        ),
        LibraryEntry::new(
            "spell-fire-bolt",
            "Evocation cantrip for ranged fire damage",
            ContentPayload::Spell(fire_bolt()),
        ),
        // Traps
        LibraryEntry::new(
            "mechanical-trap",
            "Physical trap with detection and disarm information",
            ContentPayload::Trap(mechanical_trap()),
        ),
        LibraryEntry::new(
            "magic-trap",
            "Magical trap with spell effects",
            ContentPayload::Trap(magic_trap()),
        ),
        // Locations
        LibraryEntry::new(
            "dungeon-room",
            "Dungeon room with proper D&D formatting",
            ContentPayload::Location(dungeon_room()),
        ),
        LibraryEntry::new(
            "settlement",
            "Town, city, or village description",
            ContentPayload::Location(settlement()),
        ),
        // Encounters
        LibraryEntry::new(
            "combat-encounter",
            "Combat encounter with tactics and environment",
            ContentPayload::Encounter(combat_encounter()),
        ),
        LibraryEntry::new(
            "social-encounter",
            "Roleplay encounter with NPCs",
            ContentPayload::Encounter(social_encounter()),
        ),
    ]
}

fn basic_monster() -> Monster {
    Monster {
        name: "Basic Monster".into(),
        size: "Medium".into(),
        creature_type: "monstrosity".into(),
        alignment: "unaligned".into(),
        armor_class: 12,
        hit_points: 26,
        speed: "30 ft.".into(),
        abilities: AbilityScores::new(14, 12, 15, 8, 13, 10),
        saving_throws: bonuses(&[("con", 4)]),
        skills: bonuses(&[("perception", 3)]),
        damage_resistances: strings(&["cold"]),
        damage_immunities: vec![],
        condition_immunities: vec![],
        senses: "darkvision 60 ft., passive Perception 13".into(),
        languages: "Common".into(),
        challenge_rating: "1".into(),
        proficiency_bonus: 2,
        actions: vec![
            Action::new("Multiattack", "The monster makes two attacks."),
            Action::new(
                "Melee Attack",
                "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 6 (1d8 + 2) slashing damage.",
            )
            .with_attack(4, "1d8 + 2", "slashing"),
        ],
        legendary_actions: vec![],
        reactions: vec![],
        description: Some("A sturdy all-purpose creature, ready to be reskinned.".into()),
    }
}

fn spellcaster() -> Monster {
    Monster {
        name: "Spellcaster Monster".into(),
        size: "Medium".into(),
        creature_type: "humanoid (any race)".into(),
        alignment: "any alignment".into(),
        armor_class: 12,
        hit_points: 40,
        speed: "30 ft.".into(),
        abilities: AbilityScores::new(9, 14, 11, 17, 12, 11),
        saving_throws: bonuses(&[("int", 6), ("wis", 4)]),
        skills: bonuses(&[("arcana", 6), ("history", 6)]),
        damage_resistances: vec![],
        damage_immunities: vec![],
        condition_immunities: vec![],
        senses: "passive Perception 11".into(),
        languages: "Common plus two others".into(),
        challenge_rating: "6".into(),
        proficiency_bonus: 3,
        actions: vec![
            Action::new(
                "Spellcasting",
                "The spellcaster is a 9th-level spellcaster. Its spellcasting ability is Intelligence (spell save DC 14, +6 to hit with spell attacks). Prepared: mage hand, ray of frost, magic missile, shield, misty step, counterspell, fireball, ice storm, cone of cold.",
            ),
            Action::new(
                "Dagger",
                "Melee or Ranged Weapon Attack: +5 to hit, reach 5 ft. or range 20/60 ft., one target. Hit: 4 (1d4 + 2) piercing damage.",
            )
            .with_attack(5, "1d4 + 2", "piercing"),
        ],
        legendary_actions: vec![],
        reactions: vec![],
        description: Some("A scholar of the arcane who prefers distance to melee.".into()),
    }
}

fn goblin() -> Monster {
    Monster {
        name: "Goblin".into(),
        size: "Small".into(),
        creature_type: "humanoid (goblinoid)".into(),
        alignment: "neutral evil".into(),
        armor_class: 15,
        hit_points: 7,
        speed: "30 ft.".into(),
        abilities: AbilityScores::new(8, 14, 10, 10, 8, 8),
        saving_throws: None,
        skills: bonuses(&[("stealth", 6)]),
        damage_resistances: vec![],
        damage_immunities: vec![],
        condition_immunities: vec![],
        senses: "darkvision 60 ft., passive Perception 9".into(),
        languages: "Common, Goblin".into(),
        challenge_rating: "1/4".into(),
        proficiency_bonus: 2,
        actions: vec![
            Action::new(
                "Scimitar",
                "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 5 (1d6 + 2) slashing damage.",
            )
            .with_attack(4, "1d6 + 2", "slashing"),
            Action::new(
                "Shortbow",
                "Ranged Weapon Attack: +4 to hit, range 80/320 ft., one target. Hit: 5 (1d6 + 2) piercing damage.",
            )
            .with_attack(4, "1d6 + 2", "piercing"),
        ],
        legendary_actions: vec![],
        reactions: vec![],
        description: Some(
            "Nimble Escape: the goblin can take the Disengage or Hide action as a bonus action on each of its turns.".into(),
        ),
    }
}

fn orc() -> Monster {
    Monster {
        name: "Orc".into(),
        size: "Medium".into(),
        creature_type: "humanoid (orc)".into(),
        alignment: "chaotic evil".into(),
        armor_class: 13,
        hit_points: 15,
        speed: "30 ft.".into(),
        abilities: AbilityScores::new(16, 12, 16, 7, 11, 10),
        saving_throws: None,
        skills: bonuses(&[("intimidation", 2)]),
        damage_resistances: vec![],
        damage_immunities: vec![],
        condition_immunities: vec![],
        senses: "darkvision 60 ft., passive Perception 10".into(),
        languages: "Common, Orc".into(),
        challenge_rating: "1/2".into(),
        proficiency_bonus: 2,
        actions: vec![
            Action::new(
                "Greataxe",
                "Melee Weapon Attack: +5 to hit, reach 5 ft., one target. Hit: 9 (1d12 + 3) slashing damage.",
            )
            .with_attack(5, "1d12 + 3", "slashing"),
            Action::new(
                "Javelin",
                "Melee or Ranged Weapon Attack: +5 to hit, reach 5 ft. or range 30/120 ft., one target. Hit: 6 (1d6 + 3) piercing damage.",
            )
            .with_attack(5, "1d6 + 3", "piercing"),
        ],
        legendary_actions: vec![],
        reactions: vec![],
        description: Some(
            "Aggressive: as a bonus action, the orc can move up to its speed toward a hostile creature that it can see.".into(),
        ),
    }
}

fn basic_npc() -> Npc {
    Npc {
        name: "Basic NPC".into(),
        race: "Human".into(),
        class_name: None,
        level: None,
        background: Some("Local merchant or artisan with deep community ties".into()),
        alignment: "neutral good".into(),
        appearance: "Average height with kind eyes, ink-stained fingers and a warm demeanor".into(),
        personality: "Friendly and helpful, always ready with a smile".into(),
        ideals: Some("Believes in treating everyone with respect and kindness".into()),
        bonds: Some("Devoted to their community and family".into()),
        flaws: Some("Sometimes too trusting of strangers".into()),
        stats: Some(AbilityScores::uniform(10)),
        skills: strings(&["Insight", "Persuasion"]),
        equipment: strings(&["Common clothes", "Ledger", "15 gp"]),
        notes: Some(
            "Use commoner statistics (AC 10, HP 4, Speed 30 ft.) if combat breaks out.".into(),
        ),
    }
}

fn magic_item() -> Item {
    Item {
        name: "Magic Item".into(),
        item_type: ItemType::Wondrous,
        rarity: ItemRarity::Uncommon,
        requires_attunement: true,
        description: "This item has 3 charges and regains 1d4 + 1 expended charges daily at dawn. If you expend the last charge, roll a d20. On a 1, the item is destroyed.".into(),
        properties: strings(&["Charges"]),
        damage: None,
        damage_type: None,
        armor_class: None,
        weight: Some(1.0),
        cost: Some(Cost {
            amount: 500,
            currency: "gp".into(),
        }),
        magical_properties: strings(&[
            "While holding this item, you gain a +1 bonus to spell attack rolls and spell save DC.",
            "As an action, you can expend 1 charge to cast detect magic.",
        ]),
    }
}

fn mundane_item() -> Item {
    Item {
        name: "Mundane Item".into(),
        item_type: ItemType::Tool,
        rarity: ItemRarity::Common,
        requires_attunement: false,
        description: "Sturdy adventuring gear: rope, hooks and a weatherproof satchel.".into(),
        properties: strings(&["Non-magical"]),
        damage: None,
        damage_type: None,
        armor_class: None,
        weight: Some(5.0),
        cost: Some(Cost {
            amount: 2,
            currency: "gp".into(),
        }),
        magical_properties: vec![],
    }
}

fn magic_missile() -> Spell {
    Spell {
        name: "Magic Missile".into(),
        level: 1,
        school: "Evocation".into(),
        casting_time: "1 action".into(),
        range: "120 feet".into(),
        components: SpellComponents {
            verbal: true,
            somatic: true,
            material: false,
            material_component: None,
        },
        duration: "Instantaneous".into(),
        concentration: false,
        ritual: false,
        description: "You create three glowing darts of magical force. Each dart hits a creature of your choice that you can see within range. A dart deals 1d4 + 1 force damage to its target. The darts all strike simultaneously, and you can direct them to hit one creature or several.".into(),
        higher_levels: Some("When you cast this spell using a spell slot of 2nd level or higher, the spell creates one more dart for each slot level above 1st.".into()),
        classes: strings(&["Sorcerer", "Wizard"]),
    }
}

fn fire_bolt() -> Spell {
    Spell {
        name: "Fire Bolt".into(),
        level: 0,
        school: "Evocation".into(),
        casting_time: "1 action".into(),
        range: "120 feet".into(),
        components: SpellComponents {
            verbal: true,
            somatic: true,
            material: false,
            material_component: None,
        },
        duration: "Instantaneous".into(),
        concentration: false,
        ritual: false,
        description: "You hurl a mote of fire at a creature or object within range. Make a ranged spell attack against the target. On a hit, the target takes 1d10 fire damage.".into(),
        higher_levels: None,
        classes: strings(&["Sorcerer", "Wizard"]),
    }
}

fn mechanical_trap() -> Trap {
    Trap {
        name: "Mechanical Trap".into(),
        trap_type: "mechanical".into(),
        trigger: "A pressure plate hidden under loose flagstones".into(),
        effect: "Darts shoot from hidden holes in the walls".into(),
        detect_dc: 15,
        disarm_dc: 15,
        damage: Some("3d6".into()),
        damage_type: Some("piercing".into()),
        saving_throw: Some(SavingThrow {
            ability: "dexterity".into(),
            dc: 15,
            effect: "Half damage on success".into(),
        }),
        description: "Thieves' tools can jam the plate. Wedging a dagger under it also works.".into(),
    }
}

fn magic_trap() -> Trap {
    Trap {
        name: "Magic Trap".into(),
        trap_type: "magic".into(),
        trigger: "A creature crosses the glyph without speaking the password".into(),
        effect: "The glyph erupts in a burst of magical fire centered on the triggering creature".into(),
        detect_dc: 17,
        disarm_dc: 17,
        damage: Some("5d8".into()),
        damage_type: Some("fire".into()),
        saving_throw: Some(SavingThrow {
            ability: "dexterity".into(),
            dc: 15,
            effect: "Half damage on success".into(),
        }),
        description: "Detect magic reveals an aura of evocation. Dispel magic (DC 15) ends the glyph.".into(),
    }
}

fn dungeon_room() -> Location {
    Location {
        name: "Dungeon Room".into(),
        location_type: "Dungeon room".into(),
        description: "Damp stone walls glisten in the torchlight. The air smells of mildew and old smoke, and water drips somewhere in the dark.".into(),
        features: strings(&[
            "Ceiling: 15 feet, vaulted and cracked",
            "Floor: uneven flagstones, slick in places",
            "Lighting: none unless the party brings it",
        ]),
        inhabitants: strings(&["Two giant rats nesting in a collapsed alcove"]),
        exits: strings(&[
            "North: door to the guard post",
            "South: stairs leading down to the cistern",
            "East: secret door (DC 15 Perception) to the vault",
        ]),
        hooks: strings(&["Fresh boot prints lead to the secret door"]),
    }
}

fn settlement() -> Location {
    Location {
        name: "Settlement".into(),
        location_type: "Village".into(),
        description: "A walled farming village of a few hundred souls, built around a market square and an old shrine.".into(),
        features: strings(&[
            "The Gilded Tankard: inn run by a retired adventurer",
            "Market square with a weekly livestock fair",
            "Shrine of the harvest goddess",
        ]),
        inhabitants: strings(&[
            "Mayor Alric Thorn, cautious and overworked",
            "Sister Mirel, healer at the shrine",
        ]),
        exits: strings(&["King's Road east to the capital", "Forest track north to the old mill"]),
        hooks: strings(&[
            "Livestock have been vanishing from the northern farms",
            "A stranger paid in ancient coins at the inn",
        ]),
    }
}

fn combat_encounter() -> Encounter {
    Encounter {
        name: "Combat Encounter".into(),
        description: "Goblins led by a hobgoblin ambush the party at a ruined watchtower.".into(),
        difficulty: EncounterDifficulty::Medium,
        environment: "Ruined watchtower with rubble for half cover".into(),
        creatures: vec![
            EncounterCreature {
                hit_points: Some(7),
                notes: Some("Shooting from the upper floor".into()),
                ..EncounterCreature::new("Goblin", 2)
            },
            EncounterCreature {
                hit_points: Some(11),
                notes: Some("Retreats when both goblins fall".into()),
                ..EncounterCreature::new("Hobgoblin", 1)
            },
        ],
        treasures: vec![Item {
            name: "Potion of Healing".into(),
            item_type: ItemType::Potion,
            rarity: ItemRarity::Common,
            requires_attunement: false,
            description: "A character who drinks this potion regains 2d4 + 2 hit points.".into(),
            properties: vec![],
            damage: None,
            damage_type: None,
            armor_class: None,
            weight: Some(0.5),
            cost: Some(Cost {
                amount: 50,
                currency: "gp".into(),
            }),
            magical_properties: vec![],
        }],
        experience: 200,
        notes: Some("Morale breaks when the hobgoblin falls.".into()),
    }
}

fn social_encounter() -> Encounter {
    Encounter {
        name: "Social Encounter".into(),
        description: "A guild envoy wants the party to drop their investigation and offers a bribe.".into(),
        difficulty: EncounterDifficulty::Easy,
        environment: "Private room at the back of a busy tavern".into(),
        creatures: vec![
            EncounterCreature {
                notes: Some("Will not threaten violence openly".into()),
                ..EncounterCreature::new("Guild Envoy", 1)
            },
            EncounterCreature::new("Bodyguard", 2),
        ],
        treasures: vec![],
        experience: 100,
        notes: Some("Persuasion DC 15, Intimidation DC 12, Deception DC 18.".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advforge_domain::ContentKind;
    use std::collections::HashSet;

    #[test]
    fn every_builtin_entry_validates() {
        for entry in builtin_entries() {
            assert!(entry.validate().is_ok(), "{} failed validation", entry.id);
        }
    }

    #[test]
    fn ids_are_unique() {
        let entries = builtin_entries();
        let ids: HashSet<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn every_kind_has_at_least_one_entry() {
        let entries = builtin_entries();
        for kind in ContentKind::ALL {
            assert!(entries.iter().any(|e| e.kind() == kind), "no {} entry", kind);
        }
    }
}
