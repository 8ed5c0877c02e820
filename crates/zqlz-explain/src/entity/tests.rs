//! Tests for the entity tree model

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_entity_type_labels() {
    assert_eq!(EntityType::from_label("UNION"), EntityType::Union);
    assert_eq!(EntityType::from_label("CLUSTER MERGE"), EntityType::ClusterMerge);
    assert_eq!(
        EntityType::from_label("WILDCARD"),
        EntityType::Other("WILDCARD".to_string())
    );
    assert_eq!(EntityType::Intersect.as_str(), "INTERSECT");
    assert_eq!(EntityType::Other("Results".into()).to_string(), "Results");
}

#[test]
fn test_with_child_stamps_parent_linkage() {
    let child = EntityInfo::new(EntityType::Expr).with_data("foo");
    let parent = EntityInfo::new(EntityType::Union)
        .with_snippet("@title")
        .with_child(child);

    assert_eq!(parent.children.len(), 1);
    assert_eq!(parent.children[0].parent_id.as_deref(), Some(parent.id.as_str()));
    assert_eq!(parent.children[0].parent_snippet.as_deref(), Some("@title"));
    assert!(parent.parent_id.is_none());
}

#[test]
fn test_fresh_nodes_get_distinct_ids() {
    let a = EntityInfo::new(EntityType::Expr);
    let b = EntityInfo::new(EntityType::Expr);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_tree_traversal_count_and_depth() {
    //        INTERSECT
    //        /       \
    //      TAG      UNION
    //                 |
    //               TEXT
    let root = EntityInfo::new(EntityType::Intersect).with_children([
        EntityInfo::new(EntityType::Tag),
        EntityInfo::new(EntityType::Union).with_child(EntityInfo::new(EntityType::Text)),
    ]);

    let kinds: Vec<_> = root.iter().map(|n| n.entity_type.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            EntityType::Intersect,
            EntityType::Tag,
            EntityType::Union,
            EntityType::Text
        ]
    );
    assert_eq!(root.node_count(), 4);
    assert_eq!(root.depth(), 3);
    assert!(root.has_unique_ids());
    assert!(!root.is_leaf());
}

#[test]
fn test_find_by_id() {
    let leaf = EntityInfo::new(EntityType::Numeric);
    let leaf_id = leaf.id.clone();
    let root = EntityInfo::new(EntityType::Union).with_child(leaf);

    assert_eq!(
        root.find(&leaf_id).map(|n| n.entity_type.clone()),
        Some(EntityType::Numeric)
    );
    assert!(root.find("missing").is_none());
}

#[test]
fn test_duplicate_ids_detected() {
    let mut dup = EntityInfo::new(EntityType::Expr);
    let root = EntityInfo::new(EntityType::Union);
    dup.id = root.id.clone();
    let root = EntityInfo {
        children: vec![dup],
        ..root
    };
    assert!(!root.has_unique_ids());
}

#[test]
fn test_serializes_with_camel_case_and_omits_absent_fields() {
    let root = EntityInfo::new(EntityType::ClusterMerge)
        .with_child(EntityInfo::new(EntityType::Tag).with_sub_type(EntityType::Tag));

    let value = serde_json::to_value(&root).expect("serialize failed");

    assert_eq!(value["type"], "CLUSTER MERGE");
    assert!(value.get("snippet").is_none());
    assert_eq!(value["children"][0]["parentId"], root.id.as_str());
    assert_eq!(value["children"][0]["subType"], "TAG");

    let back: EntityInfo = serde_json::from_value(value).expect("deserialize failed");
    assert_eq!(back, root);
}

#[test]
fn test_time_ms() {
    assert_eq!(EntityInfo::new(EntityType::Index).with_time("0.25").time_ms(), Some(0.25));
    assert_eq!(EntityInfo::new(EntityType::Index).with_time("").time_ms(), None);
    assert_eq!(EntityInfo::new(EntityType::Index).with_time("NaN").time_ms(), None);
    assert_eq!(EntityInfo::new(EntityType::Index).time_ms(), None);
}
