//! Turns one directive into a payload.
//!
//! Library commands go to the catalog (then to a synthesized default) and
//! never fail. Generation commands go to the [`GenerationPort`] under a
//! caller-supplied time bound.

use std::sync::Arc;
use std::time::Duration;

use advforge_domain::{ContentKind, ContentPayload, Directive};
use thiserror::Error;

use super::fallback;
use super::registry::{self, Strategy};
use crate::infrastructure::ports::{GenerationPort, GenerationRequest, RandomPort};
use crate::prompt_templates::content_prompt;
use crate::use_cases::content::ContentCatalog;

/// Why a directive could not be replaced. The directive's text stays as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("Unknown command")]
    UnknownCommand,
    #[error("Generated content has the wrong shape: {detail}")]
    PayloadShapeInvalid { detail: String },
    #[error("Content generation unavailable: {detail}")]
    CollaboratorUnavailable { detail: String },
    #[error("Timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    /// Rendered markup would itself scan as a directive.
    #[error("Rendered markup contains directive syntax")]
    FormatterUnreachable,
}

impl ResolutionFailure {
    /// Stable machine-readable reason.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown_command",
            Self::PayloadShapeInvalid { .. } => "payload_shape_invalid",
            Self::CollaboratorUnavailable { .. } => "collaborator_unavailable",
            Self::Timeout { .. } => "timeout",
            Self::FormatterUnreachable => "formatter_unreachable",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Self::PayloadShapeInvalid { detail } | Self::CollaboratorUnavailable { detail } => {
                Some(detail.clone())
            }
            Self::Timeout { after_ms } => Some(format!("no response within {}ms", after_ms)),
            Self::UnknownCommand | Self::FormatterUnreachable => None,
        }
    }

    fn shape(detail: impl ToString) -> Self {
        Self::PayloadShapeInvalid {
            detail: detail.to_string(),
        }
    }
}

/// Where a resolved payload came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Library { entry_id: String },
    Fallback,
    Generated { provider: String },
}

impl ContentSource {
    pub fn label(&self) -> &str {
        match self {
            Self::Library { .. } => "library",
            Self::Fallback => "fallback",
            Self::Generated { provider } => provider,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub payload: ContentPayload,
    pub source: ContentSource,
}

/// Outcome for one directive of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub directive: Directive,
    pub outcome: Result<Resolution, ResolutionFailure>,
}

pub struct ContentResolver {
    catalog: Arc<ContentCatalog>,
    generator: Arc<dyn GenerationPort>,
    random: Arc<dyn RandomPort>,
}

impl ContentResolver {
    pub fn new(
        catalog: Arc<ContentCatalog>,
        generator: Arc<dyn GenerationPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            catalog,
            generator,
            random,
        }
    }

    /// Resolve `directive`, giving generation at most `timeout`.
    pub async fn resolve(&self, directive: &Directive, timeout: Duration) -> ResolutionResult {
        let outcome = match registry::lookup(directive.name()) {
            None => {
                tracing::debug!(command = %directive.name(), "Unknown command left in place");
                Err(ResolutionFailure::UnknownCommand)
            }
            Some(command) => match command.strategy {
                Strategy::Library => Ok(self.from_library(command.kind, directive.argument())),
                Strategy::Generate => {
                    self.generate(command.kind, directive.argument(), timeout)
                        .await
                }
            },
        };

        if let Err(failure) = &outcome {
            if *failure != ResolutionFailure::UnknownCommand {
                tracing::warn!(
                    command = %directive.name(),
                    offset = directive.start_offset(),
                    reason = failure.reason_code(),
                    error = %failure,
                    "Directive resolution failed"
                );
            }
        }

        ResolutionResult {
            directive: directive.clone(),
            outcome,
        }
    }

    fn from_library(&self, kind: ContentKind, argument: Option<&str>) -> Resolution {
        let entry = match argument {
            Some(query) => self.catalog.find(kind, query),
            None => {
                let entries = self.catalog.by_kind(kind);
                if entries.is_empty() {
                    None
                } else {
                    entries
                        .get(self.random.gen_index(entries.len()))
                        .copied()
                }
            }
        };

        match entry {
            Some(entry) => {
                tracing::debug!(kind = %kind, entry_id = %entry.id, "Library hit");
                Resolution {
                    payload: entry.template.clone(),
                    source: ContentSource::Library {
                        entry_id: entry.id.clone(),
                    },
                }
            }
            None => {
                tracing::debug!(
                    kind = %kind,
                    argument = ?argument,
                    "No library match, synthesizing"
                );
                Resolution {
                    payload: fallback::synthesize(kind, argument),
                    source: ContentSource::Fallback,
                }
            }
        }
    }

    async fn generate(
        &self,
        kind: ContentKind,
        argument: Option<&str>,
        timeout: Duration,
    ) -> Result<Resolution, ResolutionFailure> {
        let prompt = argument.unwrap_or(content_prompt(kind).default_prompt);
        let request = GenerationRequest::new(kind, prompt);

        let generated = match tokio::time::timeout(timeout, self.generator.generate(request)).await
        {
            Err(_) => {
                return Err(ResolutionFailure::Timeout {
                    after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                })
            }
            Ok(Err(e)) if e.is_shape_error() => return Err(ResolutionFailure::shape(e)),
            Ok(Err(e)) => {
                return Err(ResolutionFailure::CollaboratorUnavailable {
                    detail: e.to_string(),
                })
            }
            Ok(Ok(generated)) => generated,
        };

        let payload = decode_payload(kind, generated.data)?;
        Ok(Resolution {
            payload,
            source: ContentSource::Generated {
                provider: generated.provider,
            },
        })
    }
}

/// Check raw generated JSON against the shape of `kind`.
pub fn decode_payload(
    kind: ContentKind,
    data: serde_json::Value,
) -> Result<ContentPayload, ResolutionFailure> {
    let tagged = serde_json::json!({ "kind": kind.as_str(), "data": data });
    let payload: ContentPayload =
        serde_json::from_value(tagged).map_err(ResolutionFailure::shape)?;
    payload.validate().map_err(ResolutionFailure::shape)?;
    Ok(payload)
}
