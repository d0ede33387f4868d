//! Processing options threaded through normalization and merging

use serde::{Deserialize, Serialize};

/// Options controlling canonicalization, field extraction, and flattening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Canonicalize parsed values before fields are extracted and stored
    pub auto_format: bool,

    /// Run schema inference during merge (false = empty schema)
    pub detect_schemas: bool,

    /// Recurse into nested objects when flattening
    /// (false = nested object kept as a single field holding the sub-value)
    pub flatten_nested: bool,

    /// Recursion ceiling shared by field extraction and flattening
    pub max_depth: usize,

    /// Truncate long string leaves during canonicalization
    pub trim_long_values: bool,

    /// Maximum string length (in characters) before truncation applies
    pub max_value_length: usize,

    /// Keep arrays intact as a single field value
    /// (false = expand into indexed sub-paths)
    pub preserve_arrays: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            auto_format: true,
            detect_schemas: true,
            flatten_nested: true,
            max_depth: 10,
            trim_long_values: false,
            max_value_length: 500,
            preserve_arrays: true,
        }
    }
}

impl ProcessingOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom options
    pub fn builder() -> ProcessingOptionsBuilder {
        ProcessingOptionsBuilder::default()
    }
}

/// Builder for ProcessingOptions
#[derive(Debug, Default)]
pub struct ProcessingOptionsBuilder {
    options: ProcessingOptions,
}

impl ProcessingOptionsBuilder {
    /// Enable or disable canonicalization before storage
    pub fn auto_format(mut self, enabled: bool) -> Self {
        self.options.auto_format = enabled;
        self
    }

    /// Enable or disable schema inference during merge
    pub fn detect_schemas(mut self, enabled: bool) -> Self {
        self.options.detect_schemas = enabled;
        self
    }

    /// Enable or disable recursion into nested objects
    pub fn flatten_nested(mut self, enabled: bool) -> Self {
        self.options.flatten_nested = enabled;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Enable or disable truncation of long string values
    pub fn trim_long_values(mut self, enabled: bool) -> Self {
        self.options.trim_long_values = enabled;
        self
    }

    /// Set the maximum string length before truncation (minimum 1)
    pub fn max_value_length(mut self, length: usize) -> Self {
        self.options.max_value_length = length.max(1);
        self
    }

    /// Keep arrays intact (true) or expand into indexed sub-paths (false)
    pub fn preserve_arrays(mut self, enabled: bool) -> Self {
        self.options.preserve_arrays = enabled;
        self
    }

    /// Build the options
    pub fn build(self) -> ProcessingOptions {
        self.options
    }
}
