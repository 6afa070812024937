use formfill::dom::snapshot::{SnapshotNode, build_document};
use formfill::field::collector::collect;
use formfill::field::field_model::FieldType;
use formfill::field::registry::SeenRegistry;

fn parse(json: &str) -> SnapshotNode {
    serde_json::from_str(json).expect("snapshot JSON parses")
}

#[test]
fn body_rooted_snapshot_builds_directly() {
    let snapshot = parse(
        r#"{
            "tag": "body",
            "children": [
                {"tag": "form", "children": [
                    {"tag": "input", "attrs": {"type": "text", "name": "first_name"}},
                    {"tag": "input", "attrs": {"type": "hidden", "name": "csrf"}}
                ]}
            ]
        }"#,
    );
    let doc = build_document(snapshot);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_id, "form:0/input:0");
}

#[test]
fn fragment_snapshot_is_grafted_under_a_body() {
    let snapshot = parse(r#"{"tag": "input", "attrs": {"type": "email"}}"#);
    let doc = build_document(snapshot);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_type, FieldType::Email);
}

#[test]
fn snapshot_styles_drive_visibility() {
    let snapshot = parse(
        r#"{
            "tag": "body",
            "children": [
                {"tag": "input", "attrs": {"type": "text"},
                 "style": {"display": "none"}},
                {"tag": "input", "attrs": {"type": "text"},
                 "style": {"width": 0, "height": 0}},
                {"tag": "input", "attrs": {"type": "text"}}
            ]
        }"#,
    );
    let doc = build_document(snapshot);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    assert_eq!(fields.len(), 1, "styled-out inputs are honeypots");
    assert_eq!(fields[0].field_id, "input:2");
}

#[test]
fn snapshot_shadow_roots_round_trip() {
    let snapshot = parse(
        r#"{
            "tag": "body",
            "children": [
                {"tag": "custom-widget", "shadow": {"open": true, "children": [
                    {"tag": "input", "attrs": {"type": "tel", "name": "phone"}}
                ]}},
                {"tag": "locked-widget", "shadow": {"open": false, "children": [
                    {"tag": "input", "attrs": {"type": "text"}}
                ]}}
            ]
        }"#,
    );
    let doc = build_document(snapshot);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);

    assert_eq!(fields.len(), 1, "closed shadow content stays invisible");
    assert_eq!(fields[0].field_type, FieldType::Tel);
}

#[test]
fn construction_is_not_a_mutation() {
    let snapshot = parse(r#"{"tag": "body", "children": [{"tag": "input"}]}"#);
    let mut doc = build_document(snapshot);
    assert!(doc.take_mutations().is_empty());
}
