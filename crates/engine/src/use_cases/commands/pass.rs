//! One substitution pass: scan, resolve concurrently, render, splice.

use std::sync::Arc;
use std::time::Duration;

use advforge_domain::Directive;
use futures_util::future::join_all;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::formatter::render;
use super::resolver::{ContentResolver, ResolutionFailure, ResolutionResult};
use super::scanner::{directive_at, scan};
use super::substitution::{apply, Replacement};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("Substitution pass was cancelled")]
    Cancelled,
    #[error("No command starts at offset {0}")]
    NoDirectiveAt(usize),
}

/// A directive whose span was left untouched, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveFailure {
    pub directive: Directive,
    pub failure: ResolutionFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub new_text: String,
    pub applied_count: usize,
    /// In text order.
    pub failures: Vec<DirectiveFailure>,
}

impl PassOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            new_text: text.to_string(),
            applied_count: 0,
            failures: Vec::new(),
        }
    }
}

pub struct SubstitutionPass {
    resolver: Arc<ContentResolver>,
}

impl SubstitutionPass {
    pub fn new(resolver: Arc<ContentResolver>) -> Self {
        Self { resolver }
    }

    /// Replace every resolvable directive in `text`.
    ///
    /// Per-directive problems are reported in the outcome; only cancellation
    /// fails the pass, in which case nothing is applied.
    pub async fn run(
        &self,
        text: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<PassOutcome, PassError> {
        let directives = scan(text);
        if directives.is_empty() {
            return Ok(PassOutcome::unchanged(text));
        }
        tracing::debug!(directives = directives.len(), "Running substitution pass");
        self.resolve_and_splice(text, directives, timeout, cancel)
            .await
    }

    /// Re-run only the directive starting at `offset`.
    pub async fn retry_at(
        &self,
        text: &str,
        offset: usize,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<PassOutcome, PassError> {
        let directive = directive_at(text, offset).ok_or(PassError::NoDirectiveAt(offset))?;
        self.resolve_and_splice(text, vec![directive], timeout, cancel)
            .await
    }

    async fn resolve_and_splice(
        &self,
        text: &str,
        directives: Vec<Directive>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<PassOutcome, PassError> {
        let pending = join_all(
            directives
                .iter()
                .map(|directive| self.resolver.resolve(directive, timeout)),
        );

        let results = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(directives = directives.len(), "Substitution pass cancelled");
                return Err(PassError::Cancelled);
            }
            results = pending => results,
        };

        let mut replacements = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for ResolutionResult { directive, outcome } in results {
            let markup = outcome.and_then(|resolution| guard_markup(render(&resolution.payload)));
            match markup {
                Ok(markup) => replacements.push(Replacement {
                    span: directive.span(),
                    markup,
                }),
                Err(failure) => {
                    if failure == ResolutionFailure::FormatterUnreachable {
                        tracing::error!(
                            command = %directive.name(),
                            offset = directive.start_offset(),
                            "Rendered markup rescans as a directive; span left untouched"
                        );
                    }
                    failures.push(DirectiveFailure { directive, failure });
                }
            }
        }

        let applied_count = replacements.len();
        let new_text = apply(text, &replacements);
        tracing::info!(
            applied = applied_count,
            failed = failures.len(),
            "Substitution pass complete"
        );

        Ok(PassOutcome {
            new_text,
            applied_count,
            failures,
        })
    }
}

/// Markup that would be picked up by the scanner is never spliced in.
fn guard_markup(markup: String) -> Result<String, ResolutionFailure> {
    if scan(&markup).is_empty() {
        Ok(markup)
    } else {
        Err(ResolutionFailure::FormatterUnreachable)
    }
}
