//! Single-pass splice of rendered markup into the original text.

use std::ops::Range;

/// Markup to put in place of one recorded span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Range<usize>,
    pub markup: String,
}

/// Rebuild `original` with every replacement applied.
///
/// Replacements are applied in ascending offset order and the gaps between
/// them are copied verbatim. The output is never rescanned. A replacement
/// that overlaps an earlier one, runs past the end of the text or does not
/// sit on character boundaries is skipped and its span is left untouched.
pub fn apply(original: &str, replacements: &[Replacement]) -> String {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by_key(|r| r.span.start);

    let extra: usize = ordered.iter().map(|r| r.markup.len()).sum();
    let mut out = String::with_capacity(original.len() + extra);
    let mut cursor = 0;

    for replacement in ordered {
        let Range { start, end } = replacement.span.clone();
        if start < cursor || original.get(start..end).is_none() {
            tracing::warn!(start, end, "Skipping replacement with an unusable span");
            continue;
        }
        out.push_str(&original[cursor..start]);
        out.push_str(&replacement.markup);
        cursor = end;
    }

    out.push_str(&original[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replace(span: Range<usize>, markup: &str) -> Replacement {
        Replacement {
            span,
            markup: markup.to_string(),
        }
    }

    #[test]
    fn no_replacements_copies_the_text() {
        assert_eq!(apply("unchanged", &[]), "unchanged");
    }

    #[test]
    fn gaps_are_copied_and_order_does_not_matter() {
        let text = "a XX b YYY c";
        let replacements = [replace(7..10, "<2>"), replace(2..4, "<1>")];
        assert_eq!(apply(text, &replacements), "a <1> b <2> c");
    }

    #[test]
    fn replacement_at_the_edges() {
        assert_eq!(apply("XXmid", &[replace(0..2, "[")]), "[mid");
        assert_eq!(apply("midXX", &[replace(3..5, "]")]), "mid]");
    }

    #[test]
    fn unusable_spans_are_left_alone() {
        let text = "h\u{e9}llo";
        // 2 is inside the two-byte e-acute
        assert_eq!(apply(text, &[replace(2..4, "!")]), text);
        assert_eq!(apply("short", &[replace(3..10, "!")]), "short");
        assert_eq!(
            apply("abcdef", &[replace(0..3, "1"), replace(2..4, "2")]),
            "1def"
        );
    }
}
