//! Adventure Forge Engine - Main entry point.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advforge_engine::api::{self, websocket::WsState, ConnectionManager};
use advforge_engine::infrastructure::{
    anthropic::AnthropicClient,
    clock::{SystemClock, SystemRandom},
    config::EngineConfig,
    http_generation::HttpGenerationClient,
    llm_generation::LlmContentGenerator,
    openai::OpenAiClient,
    ports::{GenerationPort, LlmPort},
    resilient_llm::ResilientLlmClient,
};
use advforge_engine::use_cases::content::ContentCatalog;
use advforge_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root as well as the working directory.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advforge_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Adventure Forge Engine");

    let config = EngineConfig::from_env()?;

    let catalog = ContentCatalog::load_or_builtin(config.catalog_path.as_deref()).await?;
    tracing::info!(entries = catalog.len(), "Content catalog ready");

    let generator = build_generator(&config).await;

    let app = Arc::new(App::new(
        catalog,
        generator,
        Arc::new(SystemClock::new()),
        Arc::new(SystemRandom::new()),
        config.resolve_timeout,
    ));
    let shutdown = app.shutdown.clone();

    let ws_state = Arc::new(WsState {
        app: app.clone(),
        connections: Arc::new(ConnectionManager::new()),
    });

    // Build router with separate states for HTTP and WebSocket
    let mut router = api::http::routes()
        .with_state(app)
        .route("/ws", get(api::websocket::ws_handler).with_state(ws_state))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.frontend_url) {
        router = router.layer(cors);
    }

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Remote backend when `GENERATION_BACKEND_URL` is set, otherwise the
/// configured LLM providers, each behind its own retry wrapper.
async fn build_generator(config: &EngineConfig) -> Arc<dyn GenerationPort> {
    if let Some(url) = &config.generation_backend_url {
        let client = HttpGenerationClient::new(url, config.llm_timeout);
        match client.refresh_providers().await {
            Ok(list) => tracing::info!(
                url = %url,
                providers = ?list.providers,
                "Using remote generation backend"
            ),
            Err(e) => tracing::warn!(
                url = %url,
                error = %e,
                "Remote generation backend did not report providers"
            ),
        }
        return Arc::new(client);
    }

    let resilient = |llm: Arc<dyn LlmPort>| -> Arc<dyn LlmPort> {
        Arc::new(ResilientLlmClient::with_max_retries(
            llm,
            config.llm_max_retries,
        ))
    };

    let mut generator = LlmContentGenerator::new();
    if let Some(openai) = &config.openai {
        generator = generator.with_provider(
            "openai",
            resilient(Arc::new(OpenAiClient::from_config(openai, config.llm_timeout))),
        );
    }
    if let Some(anthropic) = config
        .anthropic
        .as_ref()
        .and_then(|c| AnthropicClient::from_config(c, config.llm_timeout))
    {
        generator = generator.with_provider("anthropic", resilient(Arc::new(anthropic)));
    }
    if let Some(ollama) = &config.ollama {
        generator = generator.with_provider(
            "ollama",
            resilient(Arc::new(OpenAiClient::from_config(ollama, config.llm_timeout))),
        );
    }

    if generator.is_empty() {
        tracing::warn!("No AI providers configured; generate commands will fail");
    } else {
        tracing::info!(
            providers = ?config.configured_providers(),
            default = ?generator.default_provider(),
            "AI providers configured"
        );
    }

    Arc::new(generator)
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
    shutdown.cancel();
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}

fn build_cors_layer(frontend_url: &str) -> Option<CorsLayer> {
    let Ok(origin) = HeaderValue::from_str(frontend_url.trim()) else {
        tracing::warn!(origin = %frontend_url, "Invalid FRONTEND_URL; CORS disabled");
        return None;
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}
