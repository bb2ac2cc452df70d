//! Adventure Forge Protocol - Shared wire types for the engine and its clients
//!
//! This crate contains the types an editor front end exchanges with the engine:
//! - REST request bodies and query strings
//! - REST response envelopes and reports
//! - Adventure socket relay messages
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and the domain crate
//! 2. **No business logic** - Pure data types and serialization
//! 3. **camelCase on the wire** - field names match what the editor sends

pub mod relay;
pub mod requests;
pub mod responses;

pub use relay::{RelayClientMessage, RelayServerMessage, ANONYMOUS_USER};
pub use requests::{
    CatalogQuery, GenerateContentRequest, RetryCommandRequest, RunCommandsRequest,
    DEFAULT_PARTY_LEVEL, DEFAULT_PARTY_SIZE,
};
pub use responses::{
    ApiResponse, CatalogEntryView, CommandInfo, DirectiveFailureView, GenerationResponse,
    HealthResponse, ProvidersData, SubstitutionReport,
};
