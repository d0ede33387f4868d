//! Normalization of parsed JSON values
//!
//! Three pure walks over `serde_json::Value`, sharing the depth/array policy
//! from [`ProcessingOptions`](crate::models::ProcessingOptions):
//!
//! - [`canonicalize`] - lexicographic key order and optional truncation of
//!   long string leaves
//! - [`extract_fields`] - ordered set of leaf field paths
//! - [`flatten`] - nested value to flat tabular record

mod fields;
mod flatten;
mod format;

pub use fields::extract_fields;
pub use flatten::flatten;
pub use format::canonicalize;
