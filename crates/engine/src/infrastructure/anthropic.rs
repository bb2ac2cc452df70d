//! Anthropic Messages API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::config::ProviderConfig;
use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, MessageRole, TokenUsage,
};

const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens`; used when the request has none.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// `None` when the config carries no API key.
    pub fn from_config(config: &ProviderConfig, timeout: Duration) -> Option<Self> {
        let key = config.api_key.as_deref()?;
        Some(Self::new(&config.base_url, &config.model, key, timeout))
    }
}

#[async_trait]
impl LlmPort for AnthropicClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = build_request(&self.model, &request);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::RequestFailed(format!("{}: {}", status.as_u16(), error_text)));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_request(model: &str, request: &LlmRequest) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: request.temperature,
        system: request.system_prompt.clone(),
        messages: request
            .messages
            .iter()
            .map(|m| AnthropicMessage {
                role: match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect(),
    }
}

fn convert_response(response: AnthropicResponse) -> Result<LlmResponse, LlmError> {
    // Only the first block is read; content generation never asks for tools.
    let block = response
        .content
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Empty content from Anthropic".to_string()))?;

    if block.block_type != "text" {
        return Err(LlmError::InvalidResponse(
            "Invalid response type from Anthropic".to_string(),
        ));
    }

    let finish_reason = match response.stop_reason.as_deref() {
        Some("end_turn") | Some("stop_sequence") | None => FinishReason::Stop,
        Some("max_tokens") => FinishReason::Length,
        Some(_) => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content: block.text.unwrap_or_default(),
        finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        }),
    })
}

// =============================================================================
// Anthropic API types
// =============================================================================

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;

    #[test]
    fn system_prompt_is_a_top_level_field() {
        let request = LlmRequest::new(vec![ChatMessage::user("a cursed ring")])
            .with_system_prompt("You are a D&D 5e magic item creator.")
            .with_temperature(0.8)
            .with_max_tokens(Some(800));
        let body = serde_json::to_value(build_request("claude-test", &request)).unwrap();
        assert_eq!(body["system"], "You are a D&D 5e magic item creator.");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn missing_max_tokens_gets_a_default() {
        let request = LlmRequest::new(vec![ChatMessage::user("hi")]);
        let body = serde_json::to_value(build_request("claude-test", &request)).unwrap();
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
        assert!(body.get("system").is_none());
    }

    #[test]
    fn text_block_becomes_content() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{
                "content": [{"type": "text", "text": "{\"name\": \"Ring\"}"}],
                "stop_reason": "max_tokens",
                "usage": {"input_tokens": 12, "output_tokens": 30}
            }"#,
        )
        .unwrap();
        let converted = convert_response(response).unwrap();
        assert_eq!(converted.content, r#"{"name": "Ring"}"#);
        assert_eq!(converted.finish_reason, FinishReason::Length);
        assert_eq!(converted.usage.unwrap().total_tokens, 42);
    }

    #[test]
    fn non_text_block_is_rejected() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use"}], "stop_reason": "tool_use", "usage": null}"#,
        )
        .unwrap();
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
