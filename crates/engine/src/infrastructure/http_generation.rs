//! Content generation delegated to a remote generation backend over HTTP.
//!
//! Speaks the same `/api/ai` surface this engine serves, so one engine can
//! front another (or a separately deployed generation service).

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use advforge_shared::{ApiResponse, GenerateContentRequest, GenerationResponse, ProvidersData};

use crate::infrastructure::ports::{
    GeneratedContent, GenerationError, GenerationPort, GenerationRequest, ProviderList,
};

pub struct HttpGenerationClient {
    client: Client,
    base_url: String,
    /// Last provider list reported by the backend
    providers: RwLock<ProviderList>,
}

impl HttpGenerationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            providers: RwLock::new(ProviderList::default()),
        }
    }

    /// Ask the backend which providers it has and remember the answer.
    pub async fn refresh_providers(&self) -> Result<ProviderList, GenerationError> {
        let response = self
            .client
            .get(format!("{}/api/ai/providers", self.base_url))
            .send()
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Backend(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let body: ApiResponse<ProvidersData> = response
            .json()
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;
        let data = body.data.ok_or_else(|| {
            GenerationError::Backend(body.error.unwrap_or_else(|| "Empty provider list".into()))
        })?;

        let list = ProviderList {
            providers: data.providers,
            default: data.default,
        };
        if let Ok(mut cached) = self.providers.write() {
            *cached = list.clone();
        }
        Ok(list)
    }
}

#[async_trait]
impl GenerationPort for HttpGenerationClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let body = request_body(&request);

        tracing::debug!(
            backend = %self.base_url,
            content_type = %request.content_type,
            "Forwarding generation request"
        );

        let response = self
            .client
            .post(format!("{}/api/ai/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;

        match serde_json::from_str::<GenerationResponse>(&text) {
            Ok(envelope) => envelope_into_content(envelope),
            Err(_) if !status.is_success() => Err(GenerationError::Backend(format!(
                "HTTP error! status: {}",
                status.as_u16()
            ))),
            Err(e) => Err(GenerationError::Backend(format!(
                "Unreadable response from generation backend: {}",
                e
            ))),
        }
    }

    fn providers(&self) -> ProviderList {
        self.providers
            .read()
            .map(|list| list.clone())
            .unwrap_or_default()
    }
}

fn request_body(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        content_type: Some(request.content_type.as_str().to_string()),
        prompt: Some(request.prompt.clone()),
        provider: request.provider.clone(),
        party_level: request.party.map(|p| i64::from(p.level)),
        party_size: request.party.map(|p| i64::from(p.size)),
    }
}

fn envelope_into_content(
    envelope: GenerationResponse,
) -> Result<GeneratedContent, GenerationError> {
    match (envelope.success, envelope.data) {
        (true, Some(data)) => Ok(GeneratedContent {
            data,
            provider: envelope.provider,
        }),
        (true, None) => Err(GenerationError::invalid_json(
            envelope.provider,
            "response carried no data",
        )),
        (false, _) => {
            let message = envelope
                .error
                .unwrap_or_else(|| "Generation failed".to_string());
            if message.starts_with("Invalid JSON response") {
                Err(GenerationError::invalid_json(envelope.provider, message))
            } else {
                Err(GenerationError::Backend(message))
            }
        }
    }
}
