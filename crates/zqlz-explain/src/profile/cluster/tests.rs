//! Tests for cluster profile merging

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn shard_sections(term: &str) -> Vec<Value> {
    vec![
        json!(["Total profile time", "0.2"]),
        json!(["Iterators profile", ["Type", "TEXT", "Term", term, "Time", "0.1", "Counter", 1]]),
        json!(["Result processors profile", ["Type", "Index", "Time", "0.05", "Counter", 1]]),
    ]
}

fn cluster_reply() -> Vec<Value> {
    let mut reply = vec![json!("Shard #1")];
    reply.extend(shard_sections("hello"));
    reply.push(json!("Shard #2"));
    reply.extend(shard_sections("world"));
    reply.push(json!("Coordinator"));
    reply.push(json!(["Total Coordinator time", "0.9"]));
    reply
}

#[test]
fn test_groups_payloads_by_label() {
    let (groups, _) = parse_profile_cluster(&cluster_reply()).expect("parse failed");

    let labels: Vec<_> = groups.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["Shard #1", "Shard #2", "Coordinator"]);
    assert_eq!(groups["Shard #1"].len(), 3);
    assert_eq!(groups["Coordinator"].len(), 1);
}

#[test]
fn test_merges_shards_under_cluster_root() {
    let (_, root) = parse_profile_cluster(&cluster_reply()).expect("parse failed");

    assert_eq!(root.entity_type, EntityType::ClusterMerge);
    assert_eq!(root.children.len(), 2);

    let terms: Vec<_> = root
        .children
        .iter()
        .map(|shard| {
            assert_eq!(shard.entity_type, EntityType::Index);
            assert_eq!(shard.parent_id.as_deref(), Some(root.id.as_str()));
            shard.children[0].data.as_deref()
        })
        .collect();
    assert_eq!(terms, vec![Some("hello"), Some("world")]);
    assert!(root.has_unique_ids());
}

#[test]
fn test_shard_label_match_is_case_insensitive() {
    let mut reply = vec![json!("SHARD-a")];
    reply.extend(shard_sections("x"));
    reply.push(json!("shard-b"));
    reply.extend(shard_sections("y"));

    let (_, root) = parse_profile_cluster(&reply).expect("parse failed");
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_repeated_label_restarts_group() {
    let mut reply = vec![json!("Shard #1")];
    reply.extend(shard_sections("old"));
    reply.push(json!("Shard #1"));
    reply.extend(shard_sections("new"));

    let (groups, root) = parse_profile_cluster(&reply).expect("parse failed");
    assert_eq!(groups.len(), 1);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].children[0].data.as_deref(), Some("new"));
}

#[test]
fn test_rejects_scalar_entries() {
    let reply = vec![json!("Shard #1"), json!(42)];
    assert_eq!(
        parse_profile_cluster(&reply),
        Err(ProfileError::InvalidStructure(
            "expected array or string at index 1, found number".to_string()
        ))
    );
}

#[test]
fn test_rejects_payload_before_label() {
    let reply = vec![json!(["Total profile time", "0.2"])];
    assert_eq!(
        parse_profile_cluster(&reply),
        Err(ProfileError::InvalidStructure(
            "payload at index 0 precedes any shard label".to_string()
        ))
    );
}

#[test]
fn test_malformed_shard_fails_whole_merge() {
    let reply = vec![json!("Shard #1"), json!(["Total profile time", "0.2"])];
    assert!(matches!(
        parse_profile_cluster(&reply),
        Err(ProfileError::InvalidStructure(_))
    ));
}

#[test]
fn test_empty_reply_yields_empty_merge() {
    let (groups, root) = parse_profile_cluster(&[]).expect("parse failed");
    assert!(groups.is_empty());
    assert!(root.children.is_empty());
}
