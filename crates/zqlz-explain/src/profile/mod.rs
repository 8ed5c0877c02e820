//! RediSearch FT.PROFILE parsing
//!
//! Profile replies arrive already deserialized as nested lists (RESP arrays
//! mapped onto [`serde_json::Value`]). A single shard reply ends with two
//! sections:
//!
//! ```text
//! [..., ["Iterators profile", [<iterator>]],
//!       ["Result processors profile", [<processor>], [<processor>], ...]]
//! ```
//!
//! Cluster deployments prefix each shard's sections with a shard label, see
//! [`cluster`].

pub mod cluster;
pub mod iterators;

pub use cluster::{ShardGroups, parse_profile_cluster, parse_profile_cluster_with};
pub use iterators::{parse_iterator_profile, parse_profile, parse_profile_with};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when parsing FT.PROFILE replies
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Invalid profile structure: {0}")]
    InvalidStructure(String),

    #[error("Profile nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

/// Result type for FT.PROFILE parsing
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Renders a scalar reply element as text, `None` for nulls and nested values
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Short name of a reply element's shape, for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
