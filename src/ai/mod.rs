//! Optional AI-assisted enhancement hooks
//!
//! A capability interface with one method per task (`repair_text`,
//! `merge_documents`, `analyze_structure`). The deterministic pipeline
//! never depends on it: every call site re-validates the result and falls
//! back to the deterministic path on failure or invalid output.
//!
//! The `ai-online` feature enables the Ollama-backed implementation;
//! without it the module provides the trait and error types only.

pub mod client;
pub mod error;
#[cfg(feature = "ai-online")]
pub mod ollama;

pub use client::AiAssistant;
pub use error::{AiError, AiResult};
#[cfg(feature = "ai-online")]
pub use ollama::OllamaAssistant;

#[cfg(test)]
pub use client::MockAssistant;
