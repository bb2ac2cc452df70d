//! Adventure Forge Engine library.
//!
//! Server-side code for the adventure editor: slash-command expansion and
//! structured content generation.
//!
//! ## Structure
//!
//! - `use_cases/` - Command passes, content catalog, AI generation
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `prompt_templates` - Per-kind LLM prompts and sampling settings
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod prompt_templates;
pub mod use_cases;

pub use app::App;
