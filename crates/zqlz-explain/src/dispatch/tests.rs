//! Tests for dispatching raw replies to parsers

use super::*;
use crate::entity::EntityType;
use pretty_assertions::assert_eq;
use serde_json::json;

fn shard_profile(term: &str) -> Value {
    json!([
        ["Total profile time", "0.2"],
        ["Iterators profile", ["Type", "TEXT", "Term", term, "Time", "0.1", "Counter", 1]],
        ["Result processors profile", ["Type", "Index", "Time", "0.05", "Counter", 1]]
    ])
}

#[test]
fn test_search_explain_from_string() {
    let root = parse_output(
        ModuleType::Search,
        CoreType::Explain,
        &json!("@title:UNION {\n  hello\n  world\n}\n"),
    )
    .expect("parse failed");

    assert_eq!(root.entity_type, EntityType::Union);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_search_explain_from_cli_lines() {
    let lines = json!(["INTERSECT {", "  hello", "  TAG:@color {", "    red", "  }", "}", ""]);
    let root = parse_output(ModuleType::Search, CoreType::Explain, &lines).expect("parse failed");

    assert_eq!(root.entity_type, EntityType::Intersect);
    assert_eq!(root.snippet, None);
    assert_eq!(root.children[1].snippet.as_deref(), Some("@color"));
}

#[test]
fn test_search_profile_single_shard() {
    let root =
        parse_output(ModuleType::Search, CoreType::Profile, &shard_profile("hello")).expect("parse failed");
    assert_eq!(root.entity_type, EntityType::Index);
    assert_eq!(root.children[0].data.as_deref(), Some("hello"));
}

#[test]
fn test_search_profile_full_reply_with_results() {
    let reply = json!([[1, "doc:1", ["title", "hello"]], shard_profile("hello")]);
    let root = parse_output(ModuleType::Search, CoreType::Profile, &reply).expect("parse failed");
    assert_eq!(root.entity_type, EntityType::Index);
}

#[test]
fn test_search_profile_cluster() {
    let mut reply = vec![json!("Shard #1")];
    reply.extend(shard_profile("a").as_array().cloned().unwrap_or_default());
    reply.push(json!("Shard #2"));
    reply.extend(shard_profile("b").as_array().cloned().unwrap_or_default());

    let root =
        parse_output(ModuleType::Search, CoreType::Profile, &Value::Array(reply)).expect("parse failed");

    assert_eq!(root.entity_type, EntityType::ClusterMerge);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_search_profile_unknown_shape() {
    let result = parse_output(ModuleType::Search, CoreType::Profile, &json!([[1, 2], [3]]));
    assert!(matches!(result, Err(ExplainError::UnsupportedInput(_))));

    let result = parse_output(ModuleType::Search, CoreType::Profile, &json!("nope"));
    assert_eq!(
        result,
        Err(ExplainError::UnsupportedInput("search profile cannot be a string".to_string()))
    );
}

#[test]
fn test_graph_accepts_lines_and_text() {
    let lines = json!(["Results", "    Project", "", "        Scan | (a)"]);
    let from_lines = parse_output(ModuleType::Graph, CoreType::Profile, &lines).expect("parse failed");
    assert_eq!(from_lines.node_count(), 3);

    let text = json!("Results\n    Project\n        Scan | (a)\n");
    let from_text = parse_output(ModuleType::Graph, CoreType::Explain, &text).expect("parse failed");
    assert_eq!(from_text.node_count(), 3);
    assert_eq!(from_text.children[0].children[0].snippet.as_deref(), Some("(a)"));
}

#[test]
fn test_errors_are_wrapped() {
    let result = parse_output(ModuleType::Graph, CoreType::Profile, &json!([]));
    assert_eq!(result, Err(ExplainError::Graph(GraphProfileError::EmptyOutput)));

    let result = parse_output(ModuleType::Search, CoreType::Explain, &json!("TAG:@color {"));
    assert!(matches!(result, Err(ExplainError::Explain(_))));

    let result = parse_output(ModuleType::Graph, CoreType::Explain, &json!(["Results", 7]));
    assert_eq!(
        result,
        Err(ExplainError::UnsupportedInput("plan line cannot be a number".to_string()))
    );
}

#[test]
fn test_module_and_core_names() {
    assert_eq!(serde_json::to_value(ModuleType::Search).expect("serialize"), json!("search"));
    let core: CoreType = serde_json::from_value(json!("explain")).expect("deserialize");
    assert_eq!(core, CoreType::Explain);
}
