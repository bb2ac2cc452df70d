//! The command table: every known slash command and how it resolves.

use advforge_domain::ContentKind;

/// How a command produces its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Fuzzy match against the static catalog, falling back to a
    /// synthesized default. Never fails.
    Library,
    /// Ask the generation collaborator.
    Generate,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Library => "library",
            Strategy::Generate => "generate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: ContentKind,
    pub strategy: Strategy,
    /// What the optional argument means, e.g. `name` or `prompt`.
    pub argument: &'static str,
    pub description: &'static str,
}

impl CommandSpec {
    /// Menu text such as `/add-monster [name]`.
    pub fn usage(&self) -> String {
        format!("/{} [{}]", self.name, self.argument)
    }
}

const fn library(
    name: &'static str,
    kind: ContentKind,
    argument: &'static str,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        strategy: Strategy::Library,
        argument,
        description,
    }
}

const fn generate(name: &'static str, kind: ContentKind, description: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        strategy: Strategy::Generate,
        argument: "prompt",
        description,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    library("add-monster", ContentKind::Monster, "name", "Add a monster stat block"),
    library("replace-stats", ContentKind::Monster, "name", "Replace with different stats"),
    library("add-npc", ContentKind::Npc, "name", "Add an NPC"),
    library("replace-npc", ContentKind::Npc, "name", "Replace with different NPC"),
    library("add-item", ContentKind::Item, "name", "Add a magic item"),
    library("add-spell", ContentKind::Spell, "name", "Add a spell"),
    library("add-location", ContentKind::Location, "name", "Add a location"),
    library("add-encounter", ContentKind::Encounter, "type", "Add an encounter"),
    library("add-trap", ContentKind::Trap, "name", "Add a trap"),
    generate("generate-monster", ContentKind::Monster, "Generate a monster with AI"),
    generate("generate-npc", ContentKind::Npc, "Generate an NPC with AI"),
    generate("generate-item", ContentKind::Item, "Generate a magic item with AI"),
    generate("generate-spell", ContentKind::Spell, "Generate a spell with AI"),
    generate("generate-trap", ContentKind::Trap, "Generate a trap with AI"),
    generate("generate-encounter", ContentKind::Encounter, "Generate an encounter with AI"),
    generate("generate-location", ContentKind::Location, "Generate a location with AI"),
];

/// Look up a command by its (already lowercased) name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = COMMANDS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), COMMANDS.len());
    }

    #[test]
    fn aliases_share_a_kind() {
        assert_eq!(lookup("replace-stats").unwrap().kind, ContentKind::Monster);
        assert_eq!(lookup("replace-npc").unwrap().kind, ContentKind::Npc);
    }

    #[test]
    fn every_kind_can_be_generated() {
        for kind in ContentKind::ALL {
            assert!(COMMANDS
                .iter()
                .any(|c| c.kind == kind && c.strategy == Strategy::Generate));
        }
    }

    #[test]
    fn usage_starts_with_the_command() {
        for command in COMMANDS {
            assert!(command.usage().starts_with(&format!("/{} [", command.name)));
        }
        assert_eq!(lookup("add-encounter").unwrap().usage(), "/add-encounter [type]");
        assert_eq!(lookup("generate-npc").unwrap().usage(), "/generate-npc [prompt]");
    }

    #[test]
    fn unknown_command_is_absent() {
        assert!(lookup("summon-dragon").is_none());
        assert!(lookup("ADD-MONSTER").is_none());
    }
}
