//! HTTP routes.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use advforge_shared::{
    ApiResponse, CatalogEntryView, CatalogQuery, CommandInfo, DirectiveFailureView,
    GenerateContentRequest, GenerationResponse, HealthResponse, ProvidersData,
    RetryCommandRequest, RunCommandsRequest, SubstitutionReport,
};

use crate::app::App;
use crate::use_cases::ai::{parse_kind, AiError};
use crate::use_cases::commands::{PassError, PassOutcome};
use crate::use_cases::content::CatalogFilter;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/ai/providers", get(providers))
        .route("/api/ai/generate", post(generate_content))
        .route("/api/ai/generate/{content_type}", post(generate_kind))
        .route("/api/commands", get(list_commands))
        .route("/api/commands/run", post(run_commands))
        .route("/api/commands/retry", post(retry_command))
        .route("/api/catalog", get(list_catalog))
        .fallback(not_found)
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: app.clock.now().to_rfc3339(),
        uptime_seconds: app.uptime().as_secs_f64(),
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

// =============================================================================
// Generation
// =============================================================================

async fn providers(State(app): State<Arc<App>>) -> Json<ApiResponse<ProvidersData>> {
    let list = app.use_cases.ai.generation.providers();
    Json(ApiResponse::ok(ProvidersData {
        providers: list.providers,
        default: list.default,
    }))
}

async fn generate_content(
    State(app): State<Arc<App>>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let content = app
        .use_cases
        .ai
        .generation
        .generate(&request)
        .await
        .map_err(|e| ApiError::from_ai(e, &request))?;
    Ok(Json(GenerationResponse::ok(
        content.data,
        request.provider_label(),
    )))
}

async fn generate_kind(
    State(app): State<Arc<App>>,
    Path(content_type): Path<String>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let kind = parse_kind(&content_type).map_err(|e| ApiError::from_ai(e, &request))?;
    let content = app
        .use_cases
        .ai
        .generation
        .generate_kind(kind, &request)
        .await
        .map_err(|e| ApiError::from_ai(e, &request))?;
    Ok(Json(GenerationResponse::ok(
        content.data,
        request.provider_label(),
    )))
}

// =============================================================================
// Commands
// =============================================================================

async fn list_commands(State(app): State<Arc<App>>) -> Json<ApiResponse<Vec<CommandInfo>>> {
    let commands = app
        .use_cases
        .commands
        .available()
        .iter()
        .map(|c| CommandInfo {
            name: c.name.to_string(),
            kind: c.kind,
            strategy: c.strategy.as_str().to_string(),
            usage: c.usage(),
            description: c.description.to_string(),
        })
        .collect();
    Json(ApiResponse::ok(commands))
}

async fn run_commands(
    State(app): State<Arc<App>>,
    Json(request): Json<RunCommandsRequest>,
) -> Result<Json<ApiResponse<SubstitutionReport>>, ApiError> {
    let timeout = resolve_timeout(&app, request.resolve_timeout_ms);
    let outcome = app
        .use_cases
        .commands
        .pass
        .run(&request.text, timeout, &app.shutdown.child_token())
        .await?;
    Ok(Json(ApiResponse::ok(report(outcome))))
}

async fn retry_command(
    State(app): State<Arc<App>>,
    Json(request): Json<RetryCommandRequest>,
) -> Result<Json<ApiResponse<SubstitutionReport>>, ApiError> {
    let timeout = resolve_timeout(&app, request.resolve_timeout_ms);
    let outcome = app
        .use_cases
        .commands
        .pass
        .retry_at(
            &request.text,
            request.offset,
            timeout,
            &app.shutdown.child_token(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(report(outcome))))
}

fn resolve_timeout(app: &App, requested_ms: Option<u64>) -> Duration {
    requested_ms
        .map(Duration::from_millis)
        .unwrap_or(app.resolve_timeout)
}

fn report(outcome: PassOutcome) -> SubstitutionReport {
    SubstitutionReport {
        new_text: outcome.new_text,
        applied_count: outcome.applied_count,
        failures: outcome
            .failures
            .into_iter()
            .map(|f| DirectiveFailureView {
                name: f.directive.name().to_string(),
                argument: f.directive.argument().map(str::to_string),
                offset: f.directive.start_offset(),
                reason: f.failure.reason_code().to_string(),
                detail: f.failure.detail(),
            })
            .collect(),
    }
}

// =============================================================================
// Catalog
// =============================================================================

async fn list_catalog(
    State(app): State<Arc<App>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<Vec<CatalogEntryView>>>, ApiError> {
    let kind = match query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(raw) => Some(
            parse_kind(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        ),
        None => None,
    };
    let filter = CatalogFilter {
        kind,
        search: query.search,
    };
    let entries = app
        .catalog
        .filtered(&filter)
        .into_iter()
        .map(CatalogEntryView::from)
        .collect();
    Ok(Json(ApiResponse::ok(entries)))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    /// Generation failed; answered with the generation envelope
    Generation { message: String, provider: String },
    Unavailable(String),
}

impl ApiError {
    fn from_ai(error: AiError, request: &GenerateContentRequest) -> Self {
        match error {
            AiError::Validation(message) => ApiError::BadRequest(message),
            AiError::Generation(e) => ApiError::Generation {
                message: e.to_string(),
                provider: request.provider_label(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Route not found")),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(msg))).into_response()
            }
            ApiError::Generation { message, provider } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerationResponse::error(message, provider)),
            )
                .into_response(),
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(msg)),
            )
                .into_response(),
        }
    }
}

impl From<PassError> for ApiError {
    fn from(e: PassError) -> Self {
        match e {
            PassError::NoDirectiveAt(_) => ApiError::BadRequest(e.to_string()),
            PassError::Cancelled => ApiError::Unavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{
        GeneratedContent, GenerationError, MockGenerationPort, ProviderList,
    };
    use crate::use_cases::content::ContentCatalog;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(generator: MockGenerationPort) -> Arc<App> {
        Arc::new(App::new(
            Arc::new(ContentCatalog::builtin()),
            Arc::new(generator),
            Arc::new(FixedClock(
                chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            )),
            Arc::new(FixedRandom(0)),
            Duration::from_secs(5),
        ))
    }

    fn router(generator: MockGenerationPort) -> Router {
        routes().with_state(app_with(generator))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(router(MockGenerationPort::new()), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["timestamp"], "2024-05-01T12:00:00+00:00");
        assert_eq!(body["uptimeSeconds"], 0.0);
    }

    #[tokio::test]
    async fn unknown_route_is_a_json_404() {
        let (status, body) =
            send(router(MockGenerationPort::new()), get_req("/api/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Route not found"}));
    }

    #[tokio::test]
    async fn providers_lists_the_generator_providers() {
        let mut generator = MockGenerationPort::new();
        generator.expect_providers().returning(|| ProviderList {
            providers: vec!["openai".into(), "anthropic".into()],
            default: Some("anthropic".into()),
        });
        let (status, body) = send(router(generator), get_req("/api/ai/providers")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["default"], "anthropic");
        assert_eq!(body["data"]["providers"], json!(["openai", "anthropic"]));
    }

    #[tokio::test]
    async fn generate_wraps_data_in_the_envelope() {
        let mut generator = MockGenerationPort::new();
        generator.expect_generate().returning(|_| {
            Ok(GeneratedContent {
                data: json!({"name": "Ember Wisp"}),
                provider: "anthropic".into(),
            })
        });
        let (status, body) = send(
            router(generator),
            post_json(
                "/api/ai/generate",
                json!({"contentType": "monster", "prompt": "a fire spirit"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["provider"], "default");
        assert_eq!(body["data"]["name"], "Ember Wisp");
    }

    #[tokio::test]
    async fn generate_validation_errors_are_400() {
        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json("/api/ai/generate", json!({"prompt": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Content type and prompt are required");

        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json("/api/ai/generate/dragon", json!({"prompt": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unsupported content type: dragon");

        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json(
                "/api/ai/generate/encounter",
                json!({"prompt": "x", "partySize": 9}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Party size must be between 1 and 8");
    }

    #[tokio::test]
    async fn generation_failure_is_500_with_provider() {
        let mut generator = MockGenerationPort::new();
        generator
            .expect_generate()
            .returning(|_| Err(GenerationError::ProviderUnavailable("openai".into())));
        let (status, body) = send(
            router(generator),
            post_json(
                "/api/ai/generate/npc",
                json!({"prompt": "a bard", "provider": "openai"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["provider"], "openai");
        assert_eq!(body["error"], "AI provider 'openai' not available");
    }

    #[tokio::test]
    async fn command_list_covers_both_strategies() {
        let (status, body) =
            send(router(MockGenerationPort::new()), get_req("/api/commands")).await;
        assert_eq!(status, StatusCode::OK);
        let commands = body["data"].as_array().unwrap();
        assert_eq!(commands.len(), 16);
        assert_eq!(commands[0]["name"], "add-monster");
        assert_eq!(commands[0]["kind"], "monster");
        assert_eq!(commands[0]["strategy"], "library");
        assert!(commands.iter().any(|c| c["strategy"] == "generate"));
    }

    #[tokio::test]
    async fn run_substitutes_and_reports_failures() {
        let text = "/add-monster Goblin\n/unknown-command foo";
        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json("/api/commands/run", json!({"text": text})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let report = &body["data"];
        assert_eq!(report["appliedCount"], 1);
        assert!(report["newText"].as_str().unwrap().ends_with("\n/unknown-command foo"));
        assert_eq!(
            report["failures"],
            json!([{
                "name": "unknown-command",
                "argument": "foo",
                "offset": 20,
                "reason": "unknown_command"
            }])
        );
    }

    #[tokio::test]
    async fn retry_needs_a_directive_at_the_offset() {
        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json(
                "/api/commands/retry",
                json!({"text": "plain text", "offset": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No command starts at offset 3");
    }

    #[tokio::test]
    async fn retry_applies_one_directive() {
        let (status, body) = send(
            router(MockGenerationPort::new()),
            post_json(
                "/api/commands/retry",
                json!({"text": "x /add-item Rope", "offset": 2, "resolveTimeoutMs": 100}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["appliedCount"], 1);
        assert!(body["data"]["newText"].as_str().unwrap().starts_with("x <div"));
    }

    #[tokio::test]
    async fn catalog_filters_by_kind_and_search() {
        let (status, body) = send(
            router(MockGenerationPort::new()),
            get_req("/api/catalog?kind=monster&search=gob"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries = body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"], "monster-goblin");
        assert_eq!(entries[0]["template"]["kind"], "monster");

        let (status, _) = send(
            router(MockGenerationPort::new()),
            get_req("/api/catalog?kind=vehicle"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
