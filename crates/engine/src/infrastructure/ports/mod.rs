//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - LLM calls (could swap OpenAI -> Anthropic -> Ollama)
//! - Content generation (in-process LLM prompts or a remote backend)
//! - Clock/Random (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, GeneratedContent, GenerationPort, GenerationRequest, LlmPort,
    LlmRequest, LlmResponse, MessageRole, PartyContext, ProviderList, TokenUsage,
};

#[cfg(test)]
pub use external::{MockGenerationPort, MockLlmPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{GenerationError, LlmError};
