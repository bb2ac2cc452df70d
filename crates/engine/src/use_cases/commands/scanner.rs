//! Slash-command scanner.
//!
//! Finds `/name argument` occurrences in plain text. A name is a word
//! character followed by word characters or hyphens; the argument runs
//! from the first horizontal whitespace to the next `/`, `<`, newline, or
//! the end of the text, so a following closing tag is never swallowed.

use std::sync::LazyLock;

use regex_lite::Regex;

use advforge_domain::Directive;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\w[\w-]*)(?:[ \t]+([^/\n<]+))?").expect("valid regex")
});

/// Scan `text` left to right for directives.
///
/// Offsets are byte offsets into `text`. A slash directly after `<` is part
/// of a closing tag and never starts a directive.
pub fn scan(text: &str) -> Vec<Directive> {
    let mut directives = Vec::new();

    for caps in DIRECTIVE_RE.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if text[..whole.start()].ends_with('<') {
            continue;
        }

        let (argument, end) = match caps.get(2) {
            Some(arg) => {
                let trimmed = arg.as_str().trim();
                if trimmed.is_empty() {
                    (None, name.end())
                } else {
                    (
                        Some(trimmed.to_string()),
                        arg.start() + arg.as_str().trim_end().len(),
                    )
                }
            }
            None => (None, name.end()),
        };

        match Directive::new(name.as_str().to_lowercase(), argument, whole.start(), end) {
            Ok(directive) => directives.push(directive),
            Err(e) => tracing::warn!(error = %e, "Skipping malformed directive"),
        }
    }

    directives
}

/// The directive whose leading slash sits at `offset`, if any.
pub fn directive_at(text: &str, offset: usize) -> Option<Directive> {
    scan(text).into_iter().find(|d| d.start_offset() == offset)
}
