//! Single entry point that picks a parser from the module and command kind
//!
//! Callers that hold a raw database reply (already mapped onto
//! [`serde_json::Value`]) do not need to know which shape each command
//! returns. [`parse_output`] inspects the reply and forwards it.

use crate::entity::EntityInfo;
use crate::graph::{self, GraphProfileError};
use crate::options::ParseOptions;
use crate::profile::{self, ProfileError};
use crate::search::{self, ExplainParseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const ITERATORS_SECTION: &str = "Iterators profile";

/// Database module that produced the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Graph,
    Search,
}

/// Command family that produced the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreType {
    Profile,
    Explain,
}

/// Errors returned by [`parse_output`]
#[derive(Debug, Error, PartialEq)]
pub enum ExplainError {
    #[error(transparent)]
    Explain(#[from] ExplainParseError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Graph(#[from] GraphProfileError),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Result type for dispatched parsing
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Parses a raw reply with default limits
pub fn parse_output(module: ModuleType, core: CoreType, output: &Value) -> Result<EntityInfo> {
    parse_output_with(module, core, output, &ParseOptions::default())
}

/// Parses a raw reply with explicit limits
pub fn parse_output_with(
    module: ModuleType,
    core: CoreType,
    output: &Value,
    options: &ParseOptions,
) -> Result<EntityInfo> {
    tracing::debug!(?module, ?core, "dispatching explain output");

    match (module, core) {
        (ModuleType::Search, CoreType::Explain) => {
            let text = joined_lines(output)?;
            Ok(search::parse_explain_with(&text, options)?)
        }
        (ModuleType::Search, CoreType::Profile) => parse_search_profile(output, options),
        // GRAPH.EXPLAIN and GRAPH.PROFILE share the indented layout
        (ModuleType::Graph, _) => match output {
            Value::String(text) => Ok(graph::parse_graph_text_with(text, options)?),
            Value::Array(_) => {
                let mut lines = string_lines(output)?;
                lines.retain(|line| !line.trim().is_empty());
                Ok(graph::parse_graph_profile_with(&lines, options)?)
            }
            other => Err(unsupported("graph plan", other)),
        },
    }
}

/// Handles a full `[results, profile]` reply as well as the bare profile part,
/// for both single-shard and cluster deployments
fn parse_search_profile(output: &Value, options: &ParseOptions) -> Result<EntityInfo> {
    let Value::Array(entries) = output else {
        return Err(unsupported("search profile", output));
    };

    if let Some(root) = parse_profile_section(entries, options)? {
        return Ok(root);
    }

    if let [_, Value::Array(section)] = entries.as_slice()
        && let Some(root) = parse_profile_section(section, options)?
    {
        return Ok(root);
    }

    Err(ExplainError::UnsupportedInput(
        "search profile reply without an iterators section or shard labels".to_string(),
    ))
}

/// Returns `None` when the entries look like neither a shard nor a cluster profile
fn parse_profile_section(entries: &[Value], options: &ParseOptions) -> Result<Option<EntityInfo>> {
    // Shard sections are lists, only a cluster reply starts with a label
    if matches!(entries.first(), Some(Value::String(_))) {
        let (groups, root) = profile::parse_profile_cluster_with(entries, options)?;
        tracing::debug!(groups = groups.len(), shards = root.children.len(), "parsed cluster profile");
        return Ok(Some(root));
    }

    if is_single_shard(entries) {
        return Ok(Some(profile::parse_profile_with(entries, options)?));
    }

    Ok(None)
}

fn is_single_shard(entries: &[Value]) -> bool {
    let [.., Value::Array(iterators), _] = entries else {
        return false;
    };
    iterators
        .first()
        .and_then(Value::as_str)
        .is_some_and(|label| label.starts_with(ITERATORS_SECTION))
}

fn joined_lines(output: &Value) -> Result<String> {
    match output {
        Value::String(text) => Ok(text.clone()),
        Value::Array(_) => Ok(string_lines(output)?.join("\n")),
        other => Err(unsupported("search plan", other)),
    }
}

fn string_lines(output: &Value) -> Result<Vec<&str>> {
    let lines = output.as_array().map(Vec::as_slice).unwrap_or_default();
    lines
        .iter()
        .map(|line| line.as_str().ok_or_else(|| unsupported("plan line", line)))
        .collect()
}

fn unsupported(what: &str, value: &Value) -> ExplainError {
    ExplainError::UnsupportedInput(format!("{what} cannot be a {}", profile::value_kind(value)))
}

#[cfg(test)]
mod tests;
