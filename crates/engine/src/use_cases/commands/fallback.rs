//! Synthesized defaults for library commands with no catalog match.

use advforge_domain::{
    AbilityScores, Action, ContentKind, ContentPayload, Encounter, EncounterCreature,
    EncounterDifficulty, Item, ItemRarity, ItemType, Location, Monster, Npc, SavingThrow, Spell,
    SpellComponents, Trap,
};

/// A generic payload of `kind` named `name` (or a stock name when absent).
pub fn synthesize(kind: ContentKind, name: Option<&str>) -> ContentPayload {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Custom {}", kind.label()));

    match kind {
        ContentKind::Monster => ContentPayload::Monster(custom_monster(name)),
        ContentKind::Npc => ContentPayload::Npc(custom_npc(name)),
        ContentKind::Item => ContentPayload::Item(custom_item(name)),
        ContentKind::Spell => ContentPayload::Spell(custom_spell(name)),
        ContentKind::Trap => ContentPayload::Trap(custom_trap(name)),
        ContentKind::Location => ContentPayload::Location(custom_location(name)),
        ContentKind::Encounter => ContentPayload::Encounter(custom_encounter(name)),
    }
}

fn custom_monster(name: String) -> Monster {
    Monster {
        description: Some(format!("A custom {} for your adventure", name)),
        name,
        size: "Medium".into(),
        creature_type: "humanoid".into(),
        alignment: "neutral".into(),
        armor_class: 12,
        hit_points: 22,
        speed: "30 ft.".into(),
        abilities: AbilityScores::new(13, 14, 12, 10, 11, 10),
        saving_throws: None,
        skills: Some([("perception".to_string(), 2)].into_iter().collect()),
        damage_resistances: vec![],
        damage_immunities: vec![],
        condition_immunities: vec![],
        senses: "passive Perception 12".into(),
        languages: "Common".into(),
        challenge_rating: "1/2".into(),
        proficiency_bonus: 2,
        actions: vec![
            Action::new(
                "Scimitar",
                "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 5 (1d6 + 2) slashing damage.",
            )
            .with_attack(4, "1d6 + 2", "slashing"),
            Action::new(
                "Light Crossbow",
                "Ranged Weapon Attack: +4 to hit, range 80/320 ft., one target. Hit: 6 (1d8 + 2) piercing damage.",
            )
            .with_attack(4, "1d8 + 2", "piercing"),
        ],
        legendary_actions: vec![],
        reactions: vec![],
    }
}

fn custom_npc(name: String) -> Npc {
    Npc {
        notes: Some(format!(
            "A custom NPC named {}. Use commoner statistics (AC 10, HP 4, Speed 30 ft.).",
            name
        )),
        name,
        race: "Human".into(),
        class_name: None,
        level: None,
        background: Some("A local merchant or artisan with deep community ties".into()),
        alignment: "any alignment".into(),
        appearance: "Average height with kind eyes and a warm demeanor".into(),
        personality: "Friendly and helpful, always ready with a smile".into(),
        ideals: Some("Believes in treating everyone with respect and kindness".into()),
        bonds: Some("Devoted to their community and family".into()),
        flaws: Some("Sometimes too trusting of strangers".into()),
        stats: Some(AbilityScores::default()),
        skills: vec![],
        equipment: vec![],
    }
}

fn custom_item(name: String) -> Item {
    Item {
        description: format!("{} hums faintly with stored magic.", name),
        name,
        item_type: ItemType::Wondrous,
        rarity: ItemRarity::Uncommon,
        requires_attunement: false,
        properties: vec![],
        damage: None,
        damage_type: None,
        armor_class: None,
        weight: None,
        cost: None,
        magical_properties: vec![
            "Once per day, the bearer can reroll one failed saving throw.".into(),
        ],
    }
}

fn custom_spell(name: String) -> Spell {
    Spell {
        name,
        level: 1,
        school: "Evocation".into(),
        casting_time: "1 action".into(),
        range: "60 feet".into(),
        components: SpellComponents {
            verbal: true,
            somatic: true,
            material: false,
            material_component: None,
        },
        duration: "Instantaneous".into(),
        concentration: false,
        ritual: false,
        description: "A creature of your choice within range must make a Dexterity saving throw, taking 2d8 force damage on a failed save, or half as much on a successful one.".into(),
        higher_levels: Some("The damage increases by 1d8 for each slot level above 1st.".into()),
        classes: vec!["Sorcerer".into(), "Wizard".into()],
    }
}

fn custom_trap(name: String) -> Trap {
    Trap {
        name,
        trap_type: "mechanical".into(),
        trigger: "A tripwire stretched across the passage".into(),
        effect: "A weighted net drops from the ceiling".into(),
        detect_dc: 12,
        disarm_dc: 12,
        damage: None,
        damage_type: None,
        saving_throw: Some(SavingThrow {
            ability: "dexterity".into(),
            dc: 12,
            effect: "Avoid the net on success; restrained on failure".into(),
        }),
        description: "A simple snare, easily reset by whoever built it.".into(),
    }
}

fn custom_location(name: String) -> Location {
    Location {
        description: format!(
            "{} waits to be described: what the characters see, hear and smell when they arrive.",
            name
        ),
        name,
        location_type: "Location".into(),
        features: vec![],
        inhabitants: vec![],
        exits: vec![],
        hooks: vec![],
    }
}

fn custom_encounter(name: String) -> Encounter {
    Encounter {
        description: format!("{}: a small band of bandits blocks the road.", name),
        name,
        difficulty: EncounterDifficulty::Medium,
        environment: "Roadside".into(),
        creatures: vec![EncounterCreature {
            hit_points: Some(11),
            ..EncounterCreature::new("Bandit", 3)
        }],
        treasures: vec![],
        experience: 75,
        notes: None,
    }
}
