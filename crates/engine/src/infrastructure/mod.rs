//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod anthropic;
pub mod clock;
pub mod config;
pub mod http_generation;
pub mod llm_generation;
pub mod openai;
pub mod ports;
pub mod resilient_llm;
