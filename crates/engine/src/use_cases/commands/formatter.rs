//! Markup rendering for resolved payloads.
//!
//! Output is a self-contained HTML fragment with inline styles only. Every
//! interpolated value is escaped and `/` is written as `&#47;`, so the only
//! slashes in the markup belong to closing tags and a rendered block can
//! never be mistaken for a directive.

use std::fmt::Write;

use advforge_domain::{
    ability_modifier, format_modifier, AbilityScores, Action, ContentPayload, Encounter, Item,
    Location, Monster, Npc, Spell, Trap,
};

/// Shown for absent optional fields.
pub const PLACEHOLDER: &str = "\u{2014}";

const BLOCK_STYLE: &str =
    "border: 2px solid #8B0000; border-radius: 8px; padding: 16px; margin: 16px 0; background: #f9f9f9;";
const TITLE_STYLE: &str = "color: #8B0000; margin: 0 0 8px 0;";
const SUBTITLE_STYLE: &str = "font-style: italic; margin: 4px 0; color: #666;";
const LINE_STYLE: &str = "margin: 4px 0;";
const SECTION_STYLE: &str =
    "color: #8B0000; margin: 12px 0 4px 0; border-bottom: 1px solid #8B0000;";
const TABLE_STYLE: &str =
    "width: 100%; text-align: center; border-collapse: collapse; margin: 8px 0;";

/// Render a payload as a markup block.
pub fn render(payload: &ContentPayload) -> String {
    let mut out = String::new();
    let kind = payload.kind();
    let _ = write!(
        out,
        r#"<div class="stat-block {}-block" style="{}">"#,
        kind.as_str(),
        BLOCK_STYLE
    );
    let _ = write!(
        out,
        r#"<h3 style="{}">{}</h3>"#,
        TITLE_STYLE,
        escape(payload.name())
    );

    match payload {
        ContentPayload::Monster(m) => render_monster(&mut out, m),
        ContentPayload::Npc(n) => render_npc(&mut out, n),
        ContentPayload::Item(i) => render_item(&mut out, i),
        ContentPayload::Spell(s) => render_spell(&mut out, s),
        ContentPayload::Trap(t) => render_trap(&mut out, t),
        ContentPayload::Location(l) => render_location(&mut out, l),
        ContentPayload::Encounter(e) => render_encounter(&mut out, e),
    }

    out.push_str("</div>");
    out
}

/// HTML-escape `value`, also encoding `/`.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#47;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// `st`, `nd`, `rd` for 1, 2, 3 and `th` for everything else.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `"3rd-level Evocation"`, or `"Evocation cantrip"` for level 0.
pub fn spell_level_line(level: u32, school: &str) -> String {
    if level == 0 {
        format!("{} cantrip", school)
    } else {
        format!("{}{}-level {}", level, ordinal_suffix(level), school)
    }
}

// =============================================================================
// Building blocks
// =============================================================================

fn subtitle(out: &mut String, text: &str) {
    let _ = write!(out, r#"<p style="{}">{}</p>"#, SUBTITLE_STYLE, escape(text));
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => escape(v),
        _ => PLACEHOLDER.to_string(),
    };
    let _ = write!(
        out,
        r#"<p style="{}"><strong>{}</strong> {}</p>"#,
        LINE_STYLE, label, value
    );
}

fn list_field(out: &mut String, label: &str, values: &[String]) {
    let joined = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    field(out, label, Some(&joined));
}

fn paragraph(out: &mut String, text: &str) {
    field_free(out, Some(text));
}

fn field_free(out: &mut String, text: Option<&str>) {
    let value = match text.map(str::trim) {
        Some(v) if !v.is_empty() => escape(v),
        _ => PLACEHOLDER.to_string(),
    };
    let _ = write!(out, r#"<p style="margin: 8px 0;">{}</p>"#, value);
}

fn section(out: &mut String, title: &str) {
    let _ = write!(out, r#"<h4 style="{}">{}</h4>"#, SECTION_STYLE, title);
}

fn ability_table(out: &mut String, abilities: &AbilityScores) {
    let columns = abilities.columns();
    let _ = write!(out, r#"<table style="{}"><tr>"#, TABLE_STYLE);
    for (ability, _) in columns {
        let _ = write!(out, "<th>{}</th>", ability.abbreviation());
    }
    out.push_str("</tr><tr>");
    for (_, score) in columns {
        let _ = write!(
            out,
            "<td>{} ({})</td>",
            score,
            format_modifier(ability_modifier(score))
        );
    }
    out.push_str("</tr></table>");
}

fn actions(out: &mut String, title: &str, actions: &[Action]) {
    section(out, title);
    if actions.is_empty() {
        field_free(out, None);
        return;
    }
    for action in actions {
        let _ = write!(
            out,
            r#"<p style="{}"><strong><em>{}.</em></strong> {}</p>"#,
            LINE_STYLE,
            escape(&action.name),
            escape(&action.description)
        );
    }
}

fn bonus_list(bonuses: Option<&std::collections::BTreeMap<String, i32>>) -> Option<String> {
    let bonuses = bonuses.filter(|b| !b.is_empty())?;
    Some(
        bonuses
            .iter()
            .map(|(name, bonus)| format!("{} {}", capitalize(name), format_modifier(*bonus)))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Per-kind layouts
// =============================================================================

fn render_monster(out: &mut String, m: &Monster) {
    subtitle(out, &format!("{} {}, {}", m.size, m.creature_type, m.alignment));
    field(out, "Armor Class", Some(&m.armor_class.to_string()));
    field(out, "Hit Points", Some(&m.hit_points.to_string()));
    field(out, "Speed", Some(&m.speed));
    ability_table(out, &m.abilities);
    field(out, "Saving Throws", bonus_list(m.saving_throws.as_ref()).as_deref());
    field(out, "Skills", bonus_list(m.skills.as_ref()).as_deref());
    list_field(out, "Damage Resistances", &m.damage_resistances);
    list_field(out, "Damage Immunities", &m.damage_immunities);
    list_field(out, "Condition Immunities", &m.condition_immunities);
    field(out, "Senses", Some(&m.senses));
    field(out, "Languages", Some(&m.languages));
    field(out, "Challenge", Some(&m.challenge_rating));
    field(
        out,
        "Proficiency Bonus",
        Some(&format_modifier(m.proficiency_bonus)),
    );
    actions(out, "Actions", &m.actions);
    actions(out, "Legendary Actions", &m.legendary_actions);
    actions(out, "Reactions", &m.reactions);
    field_free(out, m.description.as_deref());
}

fn render_npc(out: &mut String, n: &Npc) {
    let mut line = n.race.clone();
    if let Some(class_name) = &n.class_name {
        let _ = write!(line, " {}", class_name);
    }
    if let Some(level) = n.level {
        let _ = write!(line, " (level {})", level);
    }
    let _ = write!(line, ", {}", n.alignment);
    subtitle(out, &line);

    field(out, "Background", n.background.as_deref());
    field(out, "Appearance", Some(&n.appearance));
    field(out, "Personality", Some(&n.personality));
    field(out, "Ideals", n.ideals.as_deref());
    field(out, "Bonds", n.bonds.as_deref());
    field(out, "Flaws", n.flaws.as_deref());
    match &n.stats {
        Some(stats) => ability_table(out, stats),
        None => field(out, "Stats", None),
    }
    list_field(out, "Skills", &n.skills);
    list_field(out, "Equipment", &n.equipment);
    field(out, "Notes", n.notes.as_deref());
}

fn render_item(out: &mut String, i: &Item) {
    let mut line = format!("{}, {}", capitalize(i.item_type.as_str()), i.rarity);
    if i.requires_attunement {
        line.push_str(" (requires attunement)");
    }
    subtitle(out, &line);

    paragraph(out, &i.description);
    list_field(out, "Properties", &i.properties);
    let damage = i.damage.as_ref().map(|d| match &i.damage_type {
        Some(t) => format!("{} {}", d, t),
        None => d.clone(),
    });
    field(out, "Damage", damage.as_deref());
    field(out, "Armor Class", i.armor_class.map(|ac| ac.to_string()).as_deref());
    field(out, "Weight", i.weight.map(|w| format!("{} lb.", w)).as_deref());
    field(out, "Cost", i.cost.as_ref().map(|c| c.to_string()).as_deref());
    list_field(out, "Magical Properties", &i.magical_properties);
}

fn render_spell(out: &mut String, s: &Spell) {
    let mut line = spell_level_line(u32::from(s.level), &s.school);
    if s.ritual {
        line.push_str(" (ritual)");
    }
    subtitle(out, &line);

    field(out, "Casting Time", Some(&s.casting_time));
    field(out, "Range", Some(&s.range));
    field(out, "Components", Some(&s.components.summary()));
    let duration = if s.concentration {
        format!("Concentration, up to {}", s.duration)
    } else {
        s.duration.clone()
    };
    field(out, "Duration", Some(&duration));
    paragraph(out, &s.description);
    field(out, "At Higher Levels", s.higher_levels.as_deref());
    list_field(out, "Classes", &s.classes);
}

fn render_trap(out: &mut String, t: &Trap) {
    subtitle(out, &format!("{} trap", capitalize(&t.trap_type)));
    field(out, "Trigger", Some(&t.trigger));
    field(out, "Effect", Some(&t.effect));
    field(out, "Detection", Some(&format!("DC {}", t.detect_dc)));
    field(out, "Disarm", Some(&format!("DC {}", t.disarm_dc)));
    let damage = t.damage.as_ref().map(|d| match &t.damage_type {
        Some(kind) => format!("{} {}", d, kind),
        None => d.clone(),
    });
    field(out, "Damage", damage.as_deref());
    let save = t.saving_throw.as_ref().map(|s| {
        format!("DC {} {}: {}", s.dc, capitalize(&s.ability), s.effect)
    });
    field(out, "Saving Throw", save.as_deref());
    paragraph(out, &t.description);
}

fn render_location(out: &mut String, l: &Location) {
    subtitle(out, &l.location_type);
    paragraph(out, &l.description);
    list_field(out, "Features", &l.features);
    list_field(out, "Inhabitants", &l.inhabitants);
    list_field(out, "Exits", &l.exits);
    list_field(out, "Hooks", &l.hooks);
}

fn render_encounter(out: &mut String, e: &Encounter) {
    subtitle(
        out,
        &format!("{} encounter, {}", capitalize(e.difficulty.as_str()), e.environment),
    );
    paragraph(out, &e.description);

    section(out, "Creatures");
    out.push_str(r#"<ul style="margin: 4px 0;">"#);
    for creature in &e.creatures {
        let mut line = format!("{} \u{00d7} {}", creature.quantity, creature.name);
        if let Some(hp) = creature.hit_points {
            let _ = write!(line, " ({} HP)", hp);
        }
        if let Some(notes) = &creature.notes {
            let _ = write!(line, ": {}", notes);
        }
        let _ = write!(out, "<li>{}</li>", escape(&line));
    }
    out.push_str("</ul>");

    field(out, "Experience", Some(&format!("{} XP", e.experience)));
    let treasures: Vec<String> = e.treasures.iter().map(|t| t.name.clone()).collect();
    list_field(out, "Treasure", &treasures);
    field(out, "Notes", e.notes.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::commands::scanner::scan;
    use crate::use_cases::content::ContentCatalog;
    use advforge_domain::{ContentKind, SpellComponents};

    fn spell(level: u8, school: &str) -> Spell {
        Spell {
            name: "Test".into(),
            level,
            school: school.into(),
            casting_time: "1 action".into(),
            range: "Self".into(),
            components: SpellComponents::default(),
            duration: "1 minute".into(),
            concentration: true,
            ritual: false,
            description: "Something happens.".into(),
            higher_levels: None,
            classes: vec![],
        }
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(spell_level_line(1, "Evocation"), "1st-level Evocation");
        assert_eq!(spell_level_line(2, "Abjuration"), "2nd-level Abjuration");
        assert_eq!(spell_level_line(3, "Necromancy"), "3rd-level Necromancy");
        assert_eq!(spell_level_line(4, "Illusion"), "4th-level Illusion");
        assert_eq!(spell_level_line(11, "Evocation"), "11th-level Evocation");
        assert_eq!(spell_level_line(12, "Evocation"), "12th-level Evocation");
        assert_eq!(spell_level_line(13, "Evocation"), "13th-level Evocation");
        assert_eq!(spell_level_line(21, "Evocation"), "21th-level Evocation");
    }

    #[test]
    fn level_zero_is_a_cantrip() {
        assert_eq!(spell_level_line(0, "Conjuration"), "Conjuration cantrip");
        let markup = render(&ContentPayload::Spell(spell(0, "Conjuration")));
        assert!(markup.contains("Conjuration cantrip"));
    }

    #[test]
    fn escape_encodes_markup_and_slashes() {
        assert_eq!(
            escape(r#"<b>"A" & 'B' 1/2</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39; 1&#47;2&lt;&#47;b&gt;"
        );
    }

    #[test]
    fn monster_has_six_ability_columns_with_modifiers() {
        let catalog = ContentCatalog::builtin();
        let goblin = catalog.find(ContentKind::Monster, "Goblin").unwrap();
        let markup = render(&goblin.template);
        assert_eq!(markup.matches("<th>").count(), 6);
        assert_eq!(markup.matches("<td>").count(), 6);
        assert!(markup.contains("<th>STR</th>"));
        assert!(markup.contains("<td>8 (-1)</td>"));
        assert!(markup.contains("<td>14 (+2)</td>"));
        assert!(markup.contains("1&#47;4"));
    }

    #[test]
    fn absent_optional_fields_render_a_placeholder() {
        let markup = render(&ContentPayload::Spell(spell(3, "Evocation")));
        assert!(markup.contains(&format!("<strong>At Higher Levels</strong> {}", PLACEHOLDER)));
        assert!(markup.contains("Concentration, up to 1 minute"));
    }

    #[test]
    fn injected_directive_text_cannot_survive_rendering() {
        let payload = ContentPayload::Location(Location {
            name: "Trap </div> /add-monster Goblin".into(),
            location_type: "Room".into(),
            description: "See /generate-npc here".into(),
            features: vec!["/add-trap".into()],
            inhabitants: vec![],
            exits: vec![],
            hooks: vec![],
        });
        let markup = render(&payload);
        assert!(scan(&markup).is_empty());
        assert!(!markup.contains("</div> "));
    }

    #[test]
    fn every_builtin_renders_without_directives() {
        for entry in ContentCatalog::builtin().entries() {
            let markup = render(&entry.template);
            assert!(markup.starts_with("<div"));
            assert!(markup.ends_with("</div>"));
            assert!(scan(&markup).is_empty(), "{} rescans as a directive", entry.id);
        }
    }
}
