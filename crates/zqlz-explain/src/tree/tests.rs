//! Tests for entity tree queries

use super::*;
use crate::entity::EntityType;
use pretty_assertions::assert_eq;

/// INTERSECT -> UNION -> (TEXT, TAG), plus a NUMERIC sibling of UNION
fn sample_tree() -> (EntityInfo, String, String, String) {
    let text = EntityInfo::new(EntityType::Text).with_time("0.5");
    let tag = EntityInfo::new(EntityType::Tag).with_time("1.25");
    let tag_id = tag.id.clone();

    let union = EntityInfo::new(EntityType::Union)
        .with_time("2")
        .with_children([text, tag]);
    let union_id = union.id.clone();

    let root = EntityInfo::new(EntityType::Intersect)
        .with_time("3")
        .with_children([union, EntityInfo::new(EntityType::Numeric)]);
    let root_id = root.id.clone();

    (root, root_id, union_id, tag_id)
}

#[test]
fn test_ancestors_walk_from_target_to_root() {
    let (root, root_id, union_id, tag_id) = sample_tree();

    let ancestors = get_ancestors(&root, &tag_id);

    assert!(ancestors.found);
    assert_eq!(
        ancestors.pairs,
        vec![(union_id.clone(), tag_id), (root_id, union_id)]
    );
}

#[test]
fn test_ancestors_of_root_are_empty() {
    let (root, root_id, _, _) = sample_tree();
    assert_eq!(
        get_ancestors(&root, &root_id),
        Ancestors {
            found: true,
            pairs: vec![]
        }
    );
}

#[test]
fn test_ancestors_of_unknown_id() {
    let (root, ..) = sample_tree();
    assert_eq!(get_ancestors(&root, "no-such-node"), Ancestors::default());
}

#[test]
fn test_duplicate_ids_resolve_to_first_depth_first_match() {
    let mut first = EntityInfo::new(EntityType::Text);
    first.id = "dup".to_string();
    let mut second = EntityInfo::new(EntityType::Tag);
    second.id = "dup".to_string();

    let left = EntityInfo::new(EntityType::Union).with_child(first);
    let left_id = left.id.clone();
    let right = EntityInfo::new(EntityType::Intersect).with_child(second);

    let root = EntityInfo::new(EntityType::Intersect).with_children([left, right]);
    assert!(!root.has_unique_ids());

    let ancestors = get_ancestors(&root, "dup");
    assert!(ancestors.found);
    assert_eq!(
        ancestors.pairs,
        vec![
            (left_id.clone(), "dup".to_string()),
            (root.id.clone(), left_id)
        ]
    );
}

#[test]
fn test_total_execution_time() {
    let (root, ..) = sample_tree();
    // NUMERIC has no time and counts as zero
    assert_eq!(get_total_execution_time(&root), 6.75);
}

#[test]
fn test_total_execution_time_ignores_garbage() {
    let root = EntityInfo::new(EntityType::Index)
        .with_time("0")
        .with_child(EntityInfo::new(EntityType::Scorer).with_time("n/a"))
        .with_child(EntityInfo::new(EntityType::Sorter).with_time("0"));
    assert_eq!(get_total_execution_time(&root), 0.0);
}
