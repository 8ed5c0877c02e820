//! Entity Tree Model - the unified node representation
//!
//! Every parser in this crate (search explain, search profile, graph profile)
//! produces the same [`EntityInfo`] tree so the visualizer can render them
//! uniformly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Kind of a node in the entity tree
///
/// The well-known kinds are listed explicitly. Profile replies and graph
/// plans carry arbitrary operation labels (`WILDCARD`, `Results`,
/// `Node By Label Scan`, ...), those land in [`EntityType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Expr,
    Union,
    Intersect,
    Numeric,

    // Iterator kinds reported by FT.PROFILE
    Geo,
    Text,
    Tag,

    // Result processors reported by FT.PROFILE
    Index,
    Scorer,
    Sorter,
    Loader,

    /// Synthetic root grouping every shard of a cluster profile
    ClusterMerge,

    Other(String),
}

impl EntityType {
    /// Returns the label used on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::Expr => "Expr",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Numeric => "NUMERIC",
            Self::Geo => "GEO",
            Self::Text => "TEXT",
            Self::Tag => "TAG",
            Self::Index => "Index",
            Self::Scorer => "Scorer",
            Self::Sorter => "Sorter",
            Self::Loader => "Loader",
            Self::ClusterMerge => "CLUSTER MERGE",
            Self::Other(label) => label,
        }
    }

    /// Parses a label as emitted by the database
    pub fn from_label(label: &str) -> Self {
        match label {
            "Expr" => Self::Expr,
            "UNION" => Self::Union,
            "INTERSECT" => Self::Intersect,
            "NUMERIC" => Self::Numeric,
            "GEO" => Self::Geo,
            "TEXT" => Self::Text,
            "TAG" => Self::Tag,
            "Index" => Self::Index,
            "Scorer" => Self::Scorer,
            "Sorter" => Self::Sorter,
            "Loader" => Self::Loader,
            "CLUSTER MERGE" => Self::ClusterMerge,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// A single node of the entity tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    /// Identifier, unique within one parse result
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<EntityType>,
    /// Raw payload (search term, iterator term, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Human-readable fragment of the original plan text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub children: Vec<EntityInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_snippet: Option<String>,
    /// Indentation level (graph plans only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_produced: Option<String>,
}

impl EntityInfo {
    /// Creates a node of the given type with a fresh identifier
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_type,
            sub_type: None,
            data: None,
            snippet: None,
            children: Vec::new(),
            time: None,
            counter: None,
            size: None,
            parent_id: None,
            parent_snippet: None,
            level: None,
            records_produced: None,
        }
    }

    pub fn with_sub_type(mut self, sub_type: EntityType) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_counter(mut self, counter: impl Into<String>) -> Self {
        self.counter = Some(counter.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a child, stamping it with this node's id and snippet
    ///
    /// Call this only after the node's own snippet is final.
    pub fn with_child(mut self, child: EntityInfo) -> Self {
        let child = self.adopt(child);
        self.children.push(child);
        self
    }

    /// Adds several children in order, stamping each of them
    pub fn with_children(mut self, children: impl IntoIterator<Item = EntityInfo>) -> Self {
        for child in children {
            let child = self.adopt(child);
            self.children.push(child);
        }
        self
    }

    fn adopt(&self, mut child: EntityInfo) -> EntityInfo {
        debug_assert!(
            child.parent_id.is_none(),
            "node {} already belongs to {:?}",
            child.id,
            child.parent_id
        );
        child.parent_id = Some(self.id.clone());
        child.parent_snippet = self.snippet.clone();
        child
    }

    /// Returns an iterator over this node and all descendants (depth-first)
    pub fn iter(&self) -> EntityIterator<'_> {
        EntityIterator::new(self)
    }

    /// Returns the total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Returns the maximum depth of this subtree
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds the first node (depth-first) with the given id
    pub fn find(&self, id: &str) -> Option<&EntityInfo> {
        self.iter().find(|n| n.id == id)
    }

    /// Returns true if no two nodes of this subtree share an id
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.iter().all(|n| seen.insert(n.id.as_str()))
    }

    /// Returns the node's time as milliseconds, if it holds a finite number
    pub fn time_ms(&self) -> Option<f64> {
        self.time
            .as_deref()
            .and_then(|t| t.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite())
    }
}

/// Iterator for traversing entity nodes depth-first
pub struct EntityIterator<'a> {
    stack: Vec<&'a EntityInfo>,
}

impl<'a> EntityIterator<'a> {
    fn new(root: &'a EntityInfo) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for EntityIterator<'a> {
    type Item = &'a EntityInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so we visit them in order
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests;
