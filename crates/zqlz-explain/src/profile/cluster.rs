//! Cluster-wide FT.PROFILE replies
//!
//! The coordinator returns a flat list alternating labels and payloads:
//!
//! ```text
//! ["Shard #1", [section], [section], ..., "Shard #2", [section], ..., "Coordinator", [...]]
//! ```
//!
//! Payloads are grouped under the most recent label. Every group whose label
//! starts with `shard` (any case) is a regular single-shard profile.

use super::iterators::parse_profile_at;
use super::{ProfileError, Result, value_kind};
use crate::entity::{EntityInfo, EntityType};
use crate::options::ParseOptions;
use indexmap::IndexMap;
use serde_json::Value;

/// Raw payloads grouped by label, in reply order
pub type ShardGroups = IndexMap<String, Vec<Value>>;

/// Parses a cluster profile reply into the grouped payloads and a merged tree
///
/// The merged tree has a synthetic [`EntityType::ClusterMerge`] root with one
/// child per shard.
pub fn parse_profile_cluster(info: &[Value]) -> Result<(ShardGroups, EntityInfo)> {
    parse_profile_cluster_with(info, &ParseOptions::default())
}

/// Parses a cluster profile reply with explicit limits
pub fn parse_profile_cluster_with(
    info: &[Value],
    options: &ParseOptions,
) -> Result<(ShardGroups, EntityInfo)> {
    let groups = group_by_label(info)?;

    let shards = groups
        .iter()
        .filter(|(label, _)| is_shard_label(label))
        .map(|(label, entries)| {
            tracing::debug!(shard = %label, entries = entries.len(), "parsing shard profile");
            parse_profile_at(entries, options, 1)
        })
        .collect::<Result<Vec<_>>>()?;

    let root = EntityInfo::new(EntityType::ClusterMerge).with_children(shards);
    tracing::debug!(
        groups = groups.len(),
        shards = root.children.len(),
        "merged cluster profile"
    );

    Ok((groups, root))
}

fn group_by_label(info: &[Value]) -> Result<ShardGroups> {
    let mut groups = ShardGroups::new();
    let mut current: Option<&str> = None;

    for (idx, entry) in info.iter().enumerate() {
        match entry {
            Value::String(label) => {
                // A repeated label starts its group over
                groups.insert(label.clone(), Vec::new());
                current = Some(label);
            }
            Value::Array(_) => {
                let payloads = current.and_then(|label| groups.get_mut(label)).ok_or_else(|| {
                    ProfileError::InvalidStructure(format!(
                        "payload at index {idx} precedes any shard label"
                    ))
                })?;
                payloads.push(entry.clone());
            }
            other => {
                return Err(ProfileError::InvalidStructure(format!(
                    "expected array or string at index {idx}, found {}",
                    value_kind(other)
                )));
            }
        }
    }

    Ok(groups)
}

fn is_shard_label(label: &str) -> bool {
    label
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("shard"))
}

#[cfg(test)]
mod tests;
