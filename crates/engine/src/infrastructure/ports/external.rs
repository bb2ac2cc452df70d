//! External service port traits (LLM providers, content generation).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use advforge_domain::ContentKind;

use super::error::{GenerationError, LlmError};

// =============================================================================
// LLM Types
// =============================================================================

/// LLM request/response types
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// System prompt / context
    pub system_prompt: Option<String>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    #[serde(other)]
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Content Generation
// =============================================================================

/// Party the generated encounter should be balanced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyContext {
    /// 1-20
    pub level: u8,
    /// 1-8
    pub size: u8,
}

/// One request for structured content.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub content_type: ContentKind,
    pub prompt: String,
    /// Provider id; `None` selects the default provider
    pub provider: Option<String>,
    /// Only consulted for encounters
    pub party: Option<PartyContext>,
}

impl GenerationRequest {
    pub fn new(content_type: ContentKind, prompt: impl Into<String>) -> Self {
        Self {
            content_type,
            prompt: prompt.into(),
            provider: None,
            party: None,
        }
    }

    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_party(mut self, party: Option<PartyContext>) -> Self {
        self.party = party;
        self
    }
}

/// Raw JSON produced for a request, not yet checked against the kind's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub data: serde_json::Value,
    /// Provider that actually served the request
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderList {
    pub providers: Vec<String>,
    pub default: Option<String>,
}

/// Something that turns a prompt into structured content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError>;

    fn providers(&self) -> ProviderList;
}
