//! Assistant capability trait
//!
//! One method per enhancement task. The pipeline is synchronous, so the
//! trait is too: implementations carry their own request timeout and the
//! caller always has a deterministic fallback. Every result is untrusted;
//! callers must re-validate before accepting it.

use serde_json::Value;

use super::error::AiResult;

/// Optional, best-effort enhancement provider
pub trait AiAssistant: Send + Sync {
    /// Attempt to repair malformed JSON text. At most `max_length`
    /// characters of input are sent; the returned text must be re-validated
    /// by the caller with a direct parse.
    fn repair_text(&self, text: &str, max_length: usize) -> AiResult<String>;

    /// Merge several documents under free-form instructions, returning a
    /// single JSON value (expected: an array of objects).
    fn merge_documents(&self, documents: &[Value], instructions: &str) -> AiResult<Value>;

    /// Produce a human-readable structural analysis of a parsed value.
    fn analyze_structure(&self, value: &Value) -> AiResult<String>;
}

/// A mock assistant for testing
#[cfg(test)]
pub struct MockAssistant {
    repair_response: String,
    merge_response: Value,
    analysis_response: String,
    should_fail: bool,
}

#[cfg(test)]
impl MockAssistant {
    /// Create a mock returning the given repair text
    pub fn repairing(response: impl Into<String>) -> Self {
        Self {
            repair_response: response.into(),
            merge_response: Value::Null,
            analysis_response: "mock analysis".to_string(),
            should_fail: false,
        }
    }

    /// Create a mock returning the given merge value
    pub fn merging(response: Value) -> Self {
        Self {
            repair_response: String::new(),
            merge_response: response,
            analysis_response: "mock analysis".to_string(),
            should_fail: false,
        }
    }

    /// Create a mock that fails every call
    pub fn failing() -> Self {
        Self {
            repair_response: String::new(),
            merge_response: Value::Null,
            analysis_response: String::new(),
            should_fail: true,
        }
    }
}

#[cfg(test)]
impl AiAssistant for MockAssistant {
    fn repair_text(&self, _text: &str, _max_length: usize) -> AiResult<String> {
        if self.should_fail {
            Err(super::error::AiError::Connection("mock failure".to_string()))
        } else {
            Ok(self.repair_response.clone())
        }
    }

    fn merge_documents(&self, _documents: &[Value], _instructions: &str) -> AiResult<Value> {
        if self.should_fail {
            Err(super::error::AiError::Connection("mock failure".to_string()))
        } else {
            Ok(self.merge_response.clone())
        }
    }

    fn analyze_structure(&self, _value: &Value) -> AiResult<String> {
        if self.should_fail {
            Err(super::error::AiError::Connection("mock failure".to_string()))
        } else {
            Ok(self.analysis_response.clone())
        }
    }
}
