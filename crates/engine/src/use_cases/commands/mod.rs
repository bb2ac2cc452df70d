//! Slash-command use cases.
//!
//! Scanner finds directives, the resolver turns each into a payload, the
//! formatter renders markup and the substitution engine splices it back in
//! one pass over recorded offsets.

mod fallback;
mod formatter;
mod pass;
mod registry;
mod resolver;
mod scanner;
mod substitution;

use std::sync::Arc;

pub use formatter::{escape, ordinal_suffix, render, spell_level_line, PLACEHOLDER};
pub use pass::{DirectiveFailure, PassError, PassOutcome, SubstitutionPass};
pub use registry::{lookup, CommandSpec, Strategy, COMMANDS};
pub use resolver::{
    decode_payload, ContentResolver, ContentSource, Resolution, ResolutionFailure,
    ResolutionResult,
};
pub use scanner::{directive_at, scan};
pub use substitution::{apply, Replacement};

/// Container for command use cases.
pub struct CommandUseCases {
    pub pass: Arc<SubstitutionPass>,
}

impl CommandUseCases {
    pub fn new(pass: Arc<SubstitutionPass>) -> Self {
        Self { pass }
    }

    /// Every command the editor can offer, in menu order.
    pub fn available(&self) -> &'static [CommandSpec] {
        COMMANDS
    }
}
