//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{ClockPort, GenerationPort, RandomPort};
use crate::use_cases;
use crate::use_cases::ai::GenerationOps;
use crate::use_cases::commands::{ContentResolver, SubstitutionPass};
use crate::use_cases::content::ContentCatalog;

/// Main application state.
///
/// Passed to HTTP and WebSocket handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub catalog: Arc<ContentCatalog>,
    pub clock: Arc<dyn ClockPort>,
    /// Per-directive bound when a request does not name one
    pub resolve_timeout: Duration,
    /// Cancelled on shutdown; every pass runs under a child token
    pub shutdown: CancellationToken,
    started_at: DateTime<Utc>,
}

/// Container for all use cases.
pub struct UseCases {
    pub ai: use_cases::AiUseCases,
    pub commands: use_cases::CommandUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        catalog: Arc<ContentCatalog>,
        generator: Arc<dyn GenerationPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        resolve_timeout: Duration,
    ) -> Self {
        let resolver = Arc::new(ContentResolver::new(
            catalog.clone(),
            generator.clone(),
            random,
        ));

        let use_cases = UseCases {
            ai: use_cases::AiUseCases::new(Arc::new(GenerationOps::new(generator))),
            commands: use_cases::CommandUseCases::new(Arc::new(SubstitutionPass::new(resolver))),
        };

        let started_at = clock.now();

        Self {
            use_cases,
            catalog,
            clock,
            resolve_timeout,
            shutdown: CancellationToken::new(),
            started_at,
        }
    }

    pub fn uptime(&self) -> Duration {
        (self.clock.now() - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}
