//! Response bodies returned by the REST API.

use advforge_domain::{ContentKind, ContentPayload, LibraryEntry};
use serde::{Deserialize, Serialize};

// =============================================================================
// Envelopes
// =============================================================================

/// `{success, data?, error?}` envelope used by every non-generation route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Generation envelope. `provider` echoes the requested provider or `"default"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub provider: String,
}

impl GenerationResponse {
    pub fn ok(data: serde_json::Value, provider: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            provider: provider.into(),
        }
    }

    pub fn error(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            provider: provider.into(),
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339
    pub timestamp: String,
    pub uptime_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersData {
    pub providers: Vec<String>,
    pub default: Option<String>,
}

/// One row of `GET /api/commands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    pub name: String,
    pub kind: ContentKind,
    /// `"library"` or `"generate"`
    pub strategy: String,
    pub usage: String,
    pub description: String,
}

/// Outcome of a substitution pass as seen by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionReport {
    pub new_text: String,
    pub applied_count: usize,
    pub failures: Vec<DirectiveFailureView>,
}

/// A directive that was left in place, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveFailureView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
    /// Byte offset of the directive in the submitted text
    pub offset: usize,
    /// Stable machine-readable code, e.g. `unknown_command`
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryView {
    pub id: String,
    pub name: String,
    pub kind: ContentKind,
    pub description: String,
    pub template: ContentPayload,
}

impl From<&LibraryEntry> for CatalogEntryView {
    fn from(entry: &LibraryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name().to_string(),
            kind: entry.kind(),
            description: entry.description.clone(),
            template: entry.template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("Route not found")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "Route not found"}));
    }

    #[test]
    fn providers_envelope_decodes() {
        let envelope: ApiResponse<ProvidersData> = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {"providers": ["openai", "anthropic"], "default": "anthropic"}
        }))
        .unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.providers, vec!["openai", "anthropic"]);
        assert_eq!(data.default.as_deref(), Some("anthropic"));
        assert!(envelope.error.is_none());
    }

    #[test]
    fn failed_envelope_decodes_without_data() {
        let envelope: ApiResponse<ProvidersData> =
            serde_json::from_value(serde_json::json!({"success": false, "error": "down"}))
                .unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("down"));
    }

    #[test]
    fn generation_envelope_always_carries_provider() {
        let json =
            serde_json::to_value(GenerationResponse::error("boom", "default")).unwrap();
        assert_eq!(json["provider"], "default");
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn report_uses_camel_case() {
        let report = SubstitutionReport {
            new_text: "x".into(),
            applied_count: 1,
            failures: vec![DirectiveFailureView {
                name: "unknown-command".into(),
                argument: Some("foo".into()),
                offset: 0,
                reason: "unknown_command".into(),
                detail: None,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["newText"], "x");
        assert_eq!(json["appliedCount"], 1);
        assert_eq!(json["failures"][0]["reason"], "unknown_command");
    }
}
