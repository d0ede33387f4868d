//! Schema inference for merged datasets
//!
//! Computes a per-field declared type by unioning the types observed across
//! heterogeneous records under a deterministic precedence rule.

mod inferrer;
mod types;

pub use inferrer::{SchemaInferencer, infer_schema};
pub use types::FieldType;
