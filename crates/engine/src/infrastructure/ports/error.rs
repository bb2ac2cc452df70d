//! Error types for port operations.

/// Failures talking to a single LLM provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures producing generated content, whichever backend is used.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// The requested provider is not configured (or none is).
    #[error("AI provider '{0}' not available")]
    ProviderUnavailable(String),

    /// The provider call itself failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model answered, but not with a JSON object.
    #[error("Invalid JSON response from {provider}: {message}")]
    InvalidJson { provider: String, message: String },

    /// A remote generation backend could not be reached or answered with an error.
    #[error("Generation backend error: {0}")]
    Backend(String),
}

impl GenerationError {
    pub fn invalid_json(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidJson {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    /// True when the collaborator answered but the answer had the wrong shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::InvalidJson { .. })
    }
}
