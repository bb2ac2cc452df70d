//! Request bodies accepted by the REST API.

use serde::{Deserialize, Serialize};

/// Party level used for encounter prompts when the request omits one.
pub const DEFAULT_PARTY_LEVEL: i64 = 1;
/// Party size used for encounter prompts when the request omits one.
pub const DEFAULT_PARTY_SIZE: i64 = 4;

/// Body of `POST /api/ai/generate` and `POST /api/ai/generate/{content_type}`.
///
/// Every field is optional on the wire so the handler can answer a missing
/// prompt with a 400 and a readable message instead of a rejection from the
/// JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub party_level: Option<i64>,
    #[serde(default)]
    pub party_size: Option<i64>,
}

impl GenerateContentRequest {
    /// The prompt, if present and not blank.
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// Echoed back in every generation envelope.
    pub fn provider_label(&self) -> String {
        self.provider
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "default".to_string())
    }
}

/// Body of `POST /api/commands/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandsRequest {
    pub text: String,
    #[serde(default)]
    pub resolve_timeout_ms: Option<u64>,
}

/// Body of `POST /api/commands/retry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryCommandRequest {
    pub text: String,
    /// Byte offset of the directive's leading slash
    pub offset: usize,
    #[serde(default)]
    pub resolve_timeout_ms: Option<u64>,
}

/// Query string of `GET /api/catalog`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub kind: Option<String>,
    /// Case-insensitive text search over names and descriptions
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_reads_camel_case() {
        let req: GenerateContentRequest = serde_json::from_str(
            r#"{"contentType":"encounter","prompt":"bandits","partyLevel":5,"partySize":3}"#,
        )
        .unwrap();
        assert_eq!(req.content_type.as_deref(), Some("encounter"));
        assert_eq!(req.party_level, Some(5));
        assert_eq!(req.party_size, Some(3));
        assert_eq!(req.provider_label(), "default");
    }

    #[test]
    fn blank_prompt_counts_as_missing() {
        let req = GenerateContentRequest {
            prompt: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(req.prompt_text(), None);
    }

    #[test]
    fn run_request_timeout_is_optional() {
        let req: RunCommandsRequest = serde_json::from_str(r#"{"text":"/add-npc"}"#).unwrap();
        assert_eq!(req.resolve_timeout_ms, None);
    }
}
