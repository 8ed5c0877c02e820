//! ZQLZ Explain - Redis search and graph plan parsing
//!
//! This crate turns the diagnostic output of Redis modules into one
//! hierarchical [`EntityInfo`] tree:
//! - `FT.EXPLAIN` / `FT.EXPLAINCLI` plan text ([`search`])
//! - `FT.PROFILE` replies, single shard and cluster ([`profile`])
//! - `GRAPH.EXPLAIN` / `GRAPH.PROFILE` indented plans ([`graph`])
//!
//! # Examples
//!
//! ```
//! use zqlz_explain::{EntityType, get_ancestors, search::parse_explain};
//!
//! let root = parse_explain("INTERSECT {\n  hello\n  NUMERIC {1 < @score <= inf}\n}\n").unwrap();
//! assert_eq!(root.entity_type, EntityType::Intersect);
//!
//! let numeric = &root.children[1];
//! assert_eq!(numeric.snippet.as_deref(), Some("1 < @score <= inf"));
//! assert_eq!(get_ancestors(&root, &numeric.id).pairs.len(), 1);
//! ```

pub mod dispatch;
pub mod entity;
pub mod graph;
pub mod options;
pub mod profile;
pub mod search;
pub mod tree;

pub use dispatch::{CoreType, ExplainError, ModuleType, parse_output, parse_output_with};
pub use entity::{EntityInfo, EntityIterator, EntityType};
pub use graph::{
    GraphProfileError, get_output_level, parse_graph_profile, parse_graph_profile_with,
    parse_graph_text, parse_graph_text_with,
};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use profile::{ProfileError, parse_profile, parse_profile_cluster, parse_profile_with};
pub use search::{ExplainParseError, parse_explain, parse_explain_with};
pub use tree::{Ancestors, get_ancestors, get_total_execution_time};
