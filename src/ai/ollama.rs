//! Ollama-backed assistant
//!
//! Implements [`AiAssistant`] over the Ollama HTTP API using reqwest's
//! blocking client with a per-request timeout, so a slow or unreachable
//! service can never stall the processing queue beyond the timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::AiAssistant;
use super::error::{AiError, AiResult};

/// Ollama API client for assistant tasks
#[derive(Debug, Clone)]
pub struct OllamaAssistant {
    /// Base URL of the Ollama API
    base_url: String,
    /// Model name to use
    model: String,
    /// Request timeout in seconds
    timeout_seconds: u64,
    /// Temperature for sampling
    temperature: f32,
    /// HTTP client
    client: reqwest::blocking::Client,
}

/// Request body for the Ollama generate endpoint
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Response from the Ollama generate endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaAssistant {
    /// Create a new assistant client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Ollama API (e.g., "http://localhost:11434")
    /// * `model` - Model name to use (e.g., "llama3.2")
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout_seconds: 60,
            temperature: 0.1,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the temperature for sampling
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn complete(&self, prompt: &str) -> AiResult<String> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout_seconds)
                } else {
                    AiError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(AiError::InvalidResponse(format!(
                "HTTP {} from assistant service",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }
}

impl AiAssistant for OllamaAssistant {
    fn repair_text(&self, text: &str, max_length: usize) -> AiResult<String> {
        let snippet: String = text.chars().take(max_length).collect();
        let prompt = format!(
            "The following text is intended to be JSON but does not parse. \
             Repair it and respond with ONLY the corrected JSON, no commentary:\n\n{snippet}"
        );

        let response = self.complete(&prompt)?;
        let candidate = strip_code_fences(&response);
        // validate before handing anything back
        serde_json::from_str::<Value>(candidate)
            .map_err(|e| AiError::Parse(e.to_string()))?;
        Ok(candidate.to_string())
    }

    fn merge_documents(&self, documents: &[Value], instructions: &str) -> AiResult<Value> {
        let rendered = serde_json::to_string_pretty(documents)?;
        let prompt = format!(
            "Merge the following JSON documents into a single JSON array of flat objects. \
             Instructions: {instructions}\n\nDocuments:\n{rendered}\n\n\
             Respond with ONLY the merged JSON array."
        );

        let response = self.complete(&prompt)?;
        let candidate = strip_code_fences(&response);
        let value: Value = serde_json::from_str(candidate)?;
        if !value.is_array() {
            return Err(AiError::InvalidResponse(
                "expected a JSON array of merged records".to_string(),
            ));
        }
        Ok(value)
    }

    fn analyze_structure(&self, value: &Value) -> AiResult<String> {
        let rendered = serde_json::to_string_pretty(value)?;
        let prompt = format!(
            "Describe the structure of this JSON document: its notable fields, \
             nesting, and likely purpose. Be concise.\n\n{rendered}"
        );
        self.complete(&prompt)
    }
}

/// Strip a Markdown code fence wrapper from a model response, if present
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}
