//! In-process content generation over the configured LLM providers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::infrastructure::ports::{
    ChatMessage, GeneratedContent, GenerationError, GenerationPort, GenerationRequest, LlmPort,
    LlmRequest, ProviderList,
};
use crate::prompt_templates::{content_prompt, DEFAULT_PARTY};

/// Order in which providers are preferred as the default.
const DEFAULT_PROVIDER_PREFERENCE: [&str; 2] = ["anthropic", "openai"];

/// Provider registry implementing [`GenerationPort`].
///
/// Each provider is registered under its id (`openai`, `anthropic`,
/// `ollama`). A request without a provider goes to the default one.
#[derive(Clone, Default)]
pub struct LlmContentGenerator {
    providers: Vec<(String, Arc<dyn LlmPort>)>,
}

impl LlmContentGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. A later registration with the same id replaces
    /// the earlier one.
    pub fn with_provider(mut self, id: impl Into<String>, llm: Arc<dyn LlmPort>) -> Self {
        let id = id.into();
        self.providers.retain(|(existing, _)| *existing != id);
        self.providers.push((id, llm));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Anthropic when configured, else OpenAI, else whichever came first.
    pub fn default_provider(&self) -> Option<&str> {
        DEFAULT_PROVIDER_PREFERENCE
            .iter()
            .find(|id| self.providers.iter().any(|(p, _)| p == *id))
            .copied()
            .or_else(|| self.providers.first().map(|(id, _)| id.as_str()))
    }

    fn provider(
        &self,
        requested: Option<&str>,
    ) -> Result<(&str, &Arc<dyn LlmPort>), GenerationError> {
        let id = match requested.or_else(|| self.default_provider()) {
            Some(id) => id,
            None => return Err(GenerationError::ProviderUnavailable("default".to_string())),
        };
        self.providers
            .iter()
            .find(|(p, _)| p == id)
            .map(|(p, llm)| (p.as_str(), llm))
            .ok_or_else(|| GenerationError::ProviderUnavailable(id.to_string()))
    }
}

#[async_trait]
impl GenerationPort for LlmContentGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let (provider, llm) = self.provider(request.provider.as_deref())?;
        let template = content_prompt(request.content_type);
        let party = request.party.unwrap_or(DEFAULT_PARTY);

        let llm_request = LlmRequest::new(vec![ChatMessage::user(
            template.render_user_message(&request.prompt, party),
        )])
        .with_system_prompt(template.render_system_prompt(party))
        .with_temperature(template.temperature)
        .with_max_tokens(Some(template.max_tokens));

        tracing::debug!(
            provider = %provider,
            content_type = %request.content_type,
            "Requesting content from LLM"
        );

        let response = llm.generate(llm_request).await.map_err(|e| {
            tracing::warn!(provider = %provider, error = %e, "LLM generation failed");
            GenerationError::from(e)
        })?;

        let data = parse_content(&response.content).map_err(|e| {
            tracing::warn!(
                provider = %provider,
                error = %e,
                response = %response.content,
                "Failed to parse LLM response as JSON"
            );
            GenerationError::invalid_json(provider, e)
        })?;

        Ok(GeneratedContent {
            data,
            provider: provider.to_string(),
        })
    }

    fn providers(&self) -> ProviderList {
        ProviderList {
            providers: self.providers.iter().map(|(id, _)| id.clone()).collect(),
            default: self.default_provider().map(str::to_string),
        }
    }
}

/// Parse the model reply into a JSON object.
fn parse_content(response: &str) -> Result<serde_json::Value, String> {
    let json_str = extract_json(response);
    let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    Ok(value)
}

/// Extract JSON from a response that might have markdown code blocks or extra text.
fn extract_json(response: &str) -> &str {
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            let content = response[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline_pos) = content.find('\n') {
                if !content[..newline_pos].starts_with('{') {
                    return content[newline_pos + 1..].trim();
                }
            }
            return content;
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return &response[start..=end];
        }
    }

    response.trim()
}
