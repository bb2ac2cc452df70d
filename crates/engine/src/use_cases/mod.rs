//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod ai;
pub mod commands;
pub mod content;

pub use ai::AiUseCases;
pub use commands::CommandUseCases;
