//! RedisGraph GRAPH.PROFILE / GRAPH.EXPLAIN Parser
//!
//! Graph plans are printed one operation per line, nested by indentation
//! (four spaces per level). Profile output appends runtime metadata:
//!
//! ```text
//! Results | Records produced: 2, Execution time: 0.001 ms
//!     Project | Records produced: 2, Execution time: 0.003 ms
//!         Filter | Records produced: 2, Execution time: 0.006 ms
//!             Node By Label Scan | (p:Person) | Records produced: 5, Execution time: 0.011 ms
//! ```
//!
//! # Examples
//!
//! ```
//! use zqlz_explain::graph::parse_graph_profile;
//!
//! let lines = ["Results", "    Project", "        Node By Label Scan | (p:Person)"];
//! let root = parse_graph_profile(&lines).unwrap();
//! assert_eq!(root.entity_type.as_str(), "Results");
//! assert_eq!(root.children[0].children[0].snippet.as_deref(), Some("(p:Person)"));
//! ```

use crate::entity::{EntityInfo, EntityType};
use crate::options::ParseOptions;
use thiserror::Error;

const INDENT_WIDTH: usize = 4;
const METADATA_PREFIX: &str = "Records produced";

/// Errors that can occur when parsing graph plan output
#[derive(Debug, Error, PartialEq)]
pub enum GraphProfileError {
    #[error("Empty graph plan output")]
    EmptyOutput,

    #[error("Graph plan nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

/// Result type for graph plan parsing
pub type Result<T> = std::result::Result<T, GraphProfileError>;

/// Returns the nesting level of a plan line, top-level lines are level 1
pub fn get_output_level(line: &str) -> usize {
    let spaces = line.chars().take_while(|c| *c == ' ').count();
    spaces / INDENT_WIDTH + 1
}

/// Parses graph plan lines into an entity tree rooted at the first line
pub fn parse_graph_profile<S: AsRef<str>>(lines: &[S]) -> Result<EntityInfo> {
    parse_graph_profile_with(lines, &ParseOptions::default())
}

/// Parses graph plan lines with explicit limits
pub fn parse_graph_profile_with<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<EntityInfo> {
    let root = parse_block(lines, options, 0)?;
    tracing::debug!(lines = lines.len(), nodes = root.node_count(), "parsed graph plan");
    Ok(root)
}

/// Splits a block of plan text into lines, dropping blank ones, and parses it
pub fn parse_graph_text(output: &str) -> Result<EntityInfo> {
    parse_graph_text_with(output, &ParseOptions::default())
}

pub fn parse_graph_text_with(output: &str, options: &ParseOptions) -> Result<EntityInfo> {
    let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    parse_graph_profile_with(&lines, options)
}

fn parse_block<S: AsRef<str>>(lines: &[S], options: &ParseOptions, depth: usize) -> Result<EntityInfo> {
    let Some(first) = lines.first() else {
        return Err(GraphProfileError::EmptyOutput);
    };
    if depth >= options.max_depth {
        return Err(GraphProfileError::DepthLimitExceeded(options.max_depth));
    }

    let first: &str = first.as_ref();
    let level = get_output_level(first);
    let entity = parse_entity(first, level);

    // Each line one level deeper opens a sibling block that runs until the next one
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| get_output_level((*line).as_ref()) == level + 1)
        .map(|(idx, _)| idx)
        .collect();

    if lines.len() > 1 && starts.first() != Some(&1) {
        tracing::trace!(operation = %entity.entity_type, "skipping lines nested without a parent");
    }

    let children = starts
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = starts.get(k + 1).copied().unwrap_or(lines.len());
            parse_block(&lines[start..end], options, depth + 1)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(entity.with_children(children))
}

/// Parses one `Operation | details | Records produced: n, Execution time: t ms` line
fn parse_entity(line: &str, level: usize) -> EntityInfo {
    let mut segments: Vec<&str> = line.trim().split('|').collect();

    let mut metadata = None;
    if let Some(last) = segments.last().copied().map(str::trim)
        && last.starts_with(METADATA_PREFIX)
    {
        metadata = Some(parse_metadata(last));
        segments.pop();
    }

    let operation = segments.first().copied().map(str::trim).unwrap_or_default();
    let snippet = segments.get(1..).unwrap_or_default().join("|");
    let snippet = snippet.trim();

    let mut entity = EntityInfo::new(EntityType::from_label(operation)).with_level(level);
    if !snippet.is_empty() {
        entity = entity.with_snippet(snippet);
    }
    if let Some((records, time)) = metadata {
        entity.size = records.clone();
        entity.counter = records.clone();
        entity.records_produced = records;
        entity.time = time;
    }
    entity
}

/// Returns (records produced, execution time in ms)
fn parse_metadata(metadata: &str) -> (Option<String>, Option<String>) {
    let mut parts = metadata.splitn(2, ',');

    let records = parts
        .next()
        .and_then(|p| p.split_once(':'))
        .map(|(_, v)| v.trim().to_string());

    let time = parts
        .next()
        .and_then(|p| p.split_once(':'))
        .and_then(|(_, v)| v.split_whitespace().next())
        .map(|t| t.trim_end_matches("ms").to_string());

    (records, time)
}
