//! Serialization tests with collaborator-shaped fixtures

use super::*;
use serde_json::{json, Value};

/// Fixture shaped like a record returned by the persistence collaborator,
/// including the legacy `_id` key and a legacy `childs` list.
fn legacy_article_fixture() -> Value {
    json!({
        "_id": "66f2a9",
        "title": "Field notes",
        "summary": "",
        "description": "<p>Body</p>",
        "childs": [
            { "id": "66f2aa", "type": "LINK" },
            { "id": "66f2ab", "type": "PART" }
        ]
    })
}

fn modern_article_fixture() -> Value {
    json!({
        "id": "66f2aa",
        "title": "Child",
        "tags": ["66f2a9"],
        "parts": [],
        "summary": "#main",
        "description": ""
    })
}

#[test]
fn legacy_fixture_deserializes_with_defaults() {
    let article: Article = serde_json::from_value(legacy_article_fixture()).unwrap();
    assert_eq!(article.id, ArticleId::from("66f2a9"));
    assert!(article.tags.is_empty(), "absent tags normalize to empty");
    assert!(article.parts.is_empty(), "absent parts normalize to empty");
    assert_eq!(article.childs.len(), 2);
    assert_eq!(article.childs[0].kind, ChildKind::Link);
    assert_eq!(article.childs[1].kind, ChildKind::Part);
    assert_eq!(article.read_list, vec!["all".to_string()]);
}

#[test]
fn modern_fixture_deserializes() {
    let article: Article = serde_json::from_value(modern_article_fixture()).unwrap();
    assert!(article.is_main());
    assert_eq!(article.tags, vec![ArticleId::from("66f2a9")]);
}

#[test]
fn child_kind_without_type_defaults_to_link() {
    let child: ChildRef = serde_json::from_value(json!({ "id": "x" })).unwrap();
    assert_eq!(child.kind, ChildKind::Link);
}

#[test]
fn article_round_trips_through_json() {
    let article = Article::new("a1", "Round trip")
        .with_summary(UNASSIGNED_SENTINEL)
        .with_tag("p1")
        .with_part("e1");
    let value = serde_json::to_value(&article).unwrap();
    let back: Article = serde_json::from_value(value).unwrap();
    assert_eq!(article, back);
}

#[test]
fn topic_fixture_deserializes() {
    let topic: Topic = serde_json::from_value(json!({
        "_id": "t1",
        "name": "Gardening",
        "slug": "gardening",
        "parent_tags": ["t0"]
    }))
    .unwrap();
    assert_eq!(topic.slug, "gardening");
    assert_eq!(topic.parent_tags, vec!["t0".to_string()]);
}
