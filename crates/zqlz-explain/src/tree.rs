//! Queries over a finished entity tree, independent of which parser built it

use crate::entity::EntityInfo;
use serde::Serialize;

/// Result of an ancestor search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ancestors {
    pub found: bool,
    /// `(parent_id, id)` edges, starting at the target and walking toward the root
    pub pairs: Vec<(String, String)>,
}

/// Finds the node with `search_id` and returns the edges leading back to the root
///
/// Ids are expected to be unique. If they are not, the first match in
/// depth-first order wins.
pub fn get_ancestors(info: &EntityInfo, search_id: &str) -> Ancestors {
    let mut pairs = Vec::new();
    let found = collect_ancestors(info, search_id, &mut pairs);
    Ancestors { found, pairs }
}

fn collect_ancestors(info: &EntityInfo, search_id: &str, pairs: &mut Vec<(String, String)>) -> bool {
    let hit = info.id == search_id
        || info
            .children
            .iter()
            .any(|child| collect_ancestors(child, search_id, pairs));

    if hit && let Some(parent_id) = &info.parent_id {
        pairs.push((parent_id.clone(), info.id.clone()));
    }
    hit
}

/// Sums the execution time of every node in the tree
///
/// Nodes without a time, or with one that is not a number, count as zero.
pub fn get_total_execution_time(info: &EntityInfo) -> f64 {
    info.iter().filter_map(EntityInfo::time_ms).sum()
}

#[cfg(test)]
mod tests;
