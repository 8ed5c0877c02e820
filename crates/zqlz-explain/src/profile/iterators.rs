//! Iterator tree and result processor parsing for a single shard
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use zqlz_explain::profile::parse_profile;
//!
//! let reply = json!([
//!     ["Total profile time", "0.3"],
//!     ["Parsing time", "0.05"],
//!     ["Iterators profile", ["Type", "TEXT", "Term", "hello", "Time", "0.1", "Counter", 2, "Size", 2]],
//!     ["Result processors profile", ["Type", "Index", "Time", "0.02", "Counter", 2]]
//! ]);
//!
//! let root = parse_profile(reply.as_array().unwrap()).unwrap();
//! assert_eq!(root.entity_type.as_str(), "Index");
//! assert_eq!(root.children[0].data.as_deref(), Some("hello"));
//! ```

use super::{ProfileError, Result, scalar_text, value_kind};
use crate::entity::{EntityInfo, EntityType};
use crate::options::ParseOptions;
use serde_json::Value;

const CHILD_ITERATOR_KEYS: [&str; 2] = ["Child iterators", "Child Iterators"];

/// Parses one shard's profile section into an entity tree
///
/// The iterator tree becomes the innermost node, every result processor
/// wraps the tree built so far as its only child.
pub fn parse_profile(info: &[Value]) -> Result<EntityInfo> {
    parse_profile_with(info, &ParseOptions::default())
}

/// Parses one shard's profile section with explicit limits
pub fn parse_profile_with(info: &[Value], options: &ParseOptions) -> Result<EntityInfo> {
    parse_profile_at(info, options, 0)
}

pub(crate) fn parse_profile_at(info: &[Value], options: &ParseOptions, depth: usize) -> Result<EntityInfo> {
    let [.., iterators_section, processors_section] = info else {
        return Err(ProfileError::InvalidStructure(format!(
            "expected iterator and processor sections, found {} entries",
            info.len()
        )));
    };

    let iterator = iterators_section
        .as_array()
        .and_then(|section| section.get(1))
        .and_then(Value::as_array)
        .ok_or_else(|| ProfileError::InvalidStructure("missing iterators profile".into()))?;

    let processors = processors_section
        .as_array()
        .ok_or_else(|| ProfileError::InvalidStructure("missing result processors profile".into()))?;
    let processors = processors.get(1..).unwrap_or_default();

    let mut resp = parse_iterator_at(iterator, options, depth + processors.len())?;

    for entry in processors {
        let fields = entry.as_array().ok_or_else(|| {
            ProfileError::InvalidStructure(format!(
                "expected result processor array, found {}",
                value_kind(entry)
            ))
        })?;
        let kind = fields.get(1).and_then(scalar_text).ok_or_else(|| {
            ProfileError::InvalidStructure("result processor without a type".into())
        })?;

        let mut processor = EntityInfo::new(EntityType::from_label(&kind));
        processor.time = fields.get(3).and_then(scalar_text);
        processor.counter = fields.get(5).and_then(scalar_text);
        resp = processor.with_child(resp);
    }

    tracing::debug!(
        nodes = resp.node_count(),
        processors = processors.len(),
        "parsed profile reply"
    );
    Ok(resp)
}

/// Parses an iterator entry (`[key, value, key, value, ...]`) recursively
pub fn parse_iterator_profile(data: &[Value]) -> Result<EntityInfo> {
    parse_iterator_at(data, &ParseOptions::default(), 0)
}

fn parse_iterator_at(data: &[Value], options: &ParseOptions, depth: usize) -> Result<EntityInfo> {
    if depth >= options.max_depth {
        return Err(ProfileError::DepthLimitExceeded(options.max_depth));
    }

    let props = IteratorProperties::collect(data);
    let entity_type = props.entity_type.ok_or_else(|| {
        ProfileError::InvalidStructure("iterator profile without a Type".into())
    })?;

    let children = props
        .children
        .iter()
        .map(|child| parse_iterator_at(child, options, depth + 1))
        .collect::<Result<Vec<_>>>()?;

    let mut node = EntityInfo::new(EntityType::from_label(&entity_type));
    node.time = props.time;
    node.counter = props.counter;
    node.size = props.size;
    node.data = props.term;
    Ok(node.with_children(children))
}

/// Fields picked out of an iterator entry
#[derive(Debug, Default)]
struct IteratorProperties<'a> {
    entity_type: Option<String>,
    time: Option<String>,
    counter: Option<String>,
    size: Option<String>,
    term: Option<String>,
    children: Vec<&'a [Value]>,
}

impl<'a> IteratorProperties<'a> {
    /// Scans alternating key/value entries
    ///
    /// `null` placeholders are skipped before keys and values. A list value
    /// starts a run of consecutive lists, all of which belong to the key.
    fn collect(data: &'a [Value]) -> Self {
        let mut props = Self::default();
        let mut i = 0;

        while i < data.len() {
            while i < data.len() && data[i].is_null() {
                i += 1;
            }
            let Some(key) = data.get(i) else {
                break;
            };
            i += 1;
            while i < data.len() && data[i].is_null() {
                i += 1;
            }

            let Some(key) = key.as_str() else {
                tracing::debug!(kind = value_kind(key), "skipping iterator entry without a string key");
                continue;
            };

            match data.get(i) {
                Some(Value::Array(_)) => {
                    let start = i;
                    while i < data.len() && data[i].is_array() {
                        i += 1;
                    }
                    if CHILD_ITERATOR_KEYS.contains(&key) {
                        props.children = data[start..i]
                            .iter()
                            .filter_map(|v| v.as_array().map(Vec::as_slice))
                            .collect();
                    } else {
                        tracing::trace!(key, "ignoring list-valued iterator field");
                    }
                }
                Some(value) => {
                    props.set(key, scalar_text(value));
                    i += 1;
                }
                None => break,
            }
        }

        props
    }

    fn set(&mut self, key: &str, value: Option<String>) {
        match key {
            "Type" | "TYPE" => self.entity_type = value,
            "Time" => self.time = value,
            "Counter" => self.counter = value,
            "Size" => self.size = value,
            "Term" => self.term = value,
            _ => tracing::trace!(key, "ignoring iterator field"),
        }
    }
}
