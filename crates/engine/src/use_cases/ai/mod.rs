//! AI content generation use cases.

use std::sync::Arc;

use advforge_domain::ContentKind;
use advforge_shared::GenerateContentRequest;
use advforge_shared::{DEFAULT_PARTY_LEVEL, DEFAULT_PARTY_SIZE};

use crate::infrastructure::ports::{
    GeneratedContent, GenerationError, GenerationPort, GenerationRequest, PartyContext,
    ProviderList,
};

const PARTY_LEVEL_RANGE: std::ops::RangeInclusive<i64> = 1..=20;
const PARTY_SIZE_RANGE: std::ops::RangeInclusive<i64> = 1..=8;

pub struct AiUseCases {
    pub generation: Arc<GenerationOps>,
}

impl AiUseCases {
    pub fn new(generation: Arc<GenerationOps>) -> Self {
        Self { generation }
    }
}

pub struct GenerationOps {
    generator: Arc<dyn GenerationPort>,
}

impl GenerationOps {
    pub fn new(generator: Arc<dyn GenerationPort>) -> Self {
        Self { generator }
    }

    pub fn providers(&self) -> ProviderList {
        self.generator.providers()
    }

    /// Generate content for a request naming its kind in the body.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, AiError> {
        let (Some(content_type), Some(_)) = (request.content_type.as_deref(), request.prompt_text())
        else {
            return Err(AiError::Validation(
                "Content type and prompt are required".to_string(),
            ));
        };
        let kind = parse_kind(content_type)?;
        self.generate_kind(kind, request).await
    }

    /// Generate content of `kind`, ignoring any kind named in the body.
    pub async fn generate_kind(
        &self,
        kind: ContentKind,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, AiError> {
        let prompt = request
            .prompt_text()
            .ok_or_else(|| AiError::Validation("Prompt is required".to_string()))?;

        let party = match kind {
            ContentKind::Encounter => Some(party_context(request)?),
            _ => None,
        };

        let generation = GenerationRequest::new(kind, prompt)
            .with_provider(request.provider.clone().filter(|p| !p.is_empty()))
            .with_party(party);

        tracing::info!(
            content_type = %kind,
            provider = %request.provider_label(),
            "Generating content"
        );

        self.generator.generate(generation).await.map_err(|e| {
            tracing::error!(content_type = %kind, error = %e, "Content generation failed");
            AiError::Generation(e)
        })
    }
}

/// Parse a content type from a path segment or request body.
pub fn parse_kind(raw: &str) -> Result<ContentKind, AiError> {
    raw.parse::<ContentKind>()
        .map_err(|_| AiError::Validation(format!("Unsupported content type: {}", raw)))
}

fn party_context(request: &GenerateContentRequest) -> Result<PartyContext, AiError> {
    let level = request.party_level.unwrap_or(DEFAULT_PARTY_LEVEL);
    if !PARTY_LEVEL_RANGE.contains(&level) {
        return Err(AiError::Validation(
            "Party level must be between 1 and 20".to_string(),
        ));
    }
    let size = request.party_size.unwrap_or(DEFAULT_PARTY_SIZE);
    if !PARTY_SIZE_RANGE.contains(&size) {
        return Err(AiError::Validation(
            "Party size must be between 1 and 8".to_string(),
        ));
    }
    // Both ranges fit in a u8
    Ok(PartyContext {
        level: u8::try_from(level).unwrap_or(1),
        size: u8::try_from(size).unwrap_or(4),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
