//! A slash command found in editor text.

use std::ops::Range;

use serde::Serialize;

use crate::DomainError;

/// One `/name argument` occurrence.
///
/// Offsets are byte positions into the text that was scanned, so a directive
/// is only meaningful together with that exact text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    name: String,
    raw_argument: Option<String>,
    start_offset: usize,
    end_offset: usize,
}

impl Directive {
    /// Fails when the span is empty or reversed.
    pub fn new(
        name: impl Into<String>,
        raw_argument: Option<String>,
        start_offset: usize,
        end_offset: usize,
    ) -> Result<Self, DomainError> {
        if start_offset >= end_offset {
            return Err(DomainError::invalid_span(start_offset, end_offset));
        }
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("directive name cannot be empty"));
        }
        Ok(Self {
            name,
            raw_argument: raw_argument.filter(|a| !a.is_empty()),
            start_offset,
            end_offset,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument(&self) -> Option<&str> {
        self.raw_argument.as_deref()
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    pub fn span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    /// The exact source text the directive occupies.
    pub fn source_in<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_span_is_rejected() {
        let err = Directive::new("add-item", None, 4, 4).unwrap_err();
        assert_eq!(err, DomainError::invalid_span(4, 4));
    }

    #[test]
    fn empty_argument_collapses_to_none() {
        let d = Directive::new("add-item", Some(String::new()), 0, 9).unwrap();
        assert_eq!(d.argument(), None);
    }

    #[test]
    fn source_in_slices_the_span() {
        let text = "x /add-item Sword y";
        let d = Directive::new("add-item", Some("Sword".into()), 2, 17).unwrap();
        assert_eq!(d.source_in(text), Some("/add-item Sword"));
    }
}
