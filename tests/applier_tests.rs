mod common;

use common::fixtures::{el, labeled_choice};
use formfill::apply::applier::apply;
use formfill::client::assignment::Assignment;
use formfill::dom::dom_model::{Document, EventKind};
use formfill::field::collector::collect;
use formfill::field::registry::SeenRegistry;

fn assignment(field_id: &str, value: &str) -> Assignment {
    Assignment {
        field_id: field_id.to_string(),
        value: value.to_string(),
    }
}

// =========================================================================
// Text-like controls
// =========================================================================

#[test]
fn text_apply_writes_value_and_fires_events_once() {
    let mut doc = Document::new();
    let body = doc.root();
    let input = el(&mut doc, body, "input", &[("type", "text")]);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    let assignments = vec![assignment(&fields[0].field_id, "Jane")];

    let report = apply(&mut doc, &fields, &assignments);

    assert_eq!(report.filled, 1);
    assert!(report.failures.is_empty());
    assert_eq!(doc.value(input), "Jane");
    assert_eq!(doc.focused(), Some(input));
    assert_eq!(doc.events_for(input, EventKind::Input), 1);
    assert_eq!(doc.events_for(input, EventKind::Change), 1);
}

#[test]
fn unmatched_fields_are_left_untouched() {
    let mut doc = Document::new();
    let body = doc.root();
    let input = el(&mut doc, body, "input", &[("type", "text")]);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);

    let report = apply(&mut doc, &fields, &[assignment("somewhere/else", "x")]);

    assert_eq!(report.filled, 0);
    assert_eq!(doc.value(input), "");
    assert!(doc.events().is_empty());
}

#[test]
fn select_apply_sets_value() {
    let mut doc = Document::new();
    let body = doc.root();
    let select = el(&mut doc, body, "select", &[("name", "country")]);
    let us = doc.create_element("option");
    doc.set_attr(us, "value", "us");
    doc.set_text(us, "United States");
    doc.append_child(select, us);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    let report = apply(&mut doc, &fields, &[assignment(&fields[0].field_id, "us")]);

    assert_eq!(report.filled, 1);
    assert_eq!(doc.value(select), "us");
    assert_eq!(doc.events_for(select, EventKind::Change), 1);
}

// =========================================================================
// Radio / checkbox groups
// =========================================================================

#[test]
fn radio_apply_checks_exactly_the_matching_control() {
    let mut doc = Document::new();
    let body = doc.root();

    let male = labeled_choice(&mut doc, body, "radio", "gender", "male", "Male");
    let female = labeled_choice(&mut doc, body, "radio", "gender", "female", "Female");
    let other = labeled_choice(&mut doc, body, "radio", "gender", "other", "Other");

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    assert_eq!(fields[0].field_id, "radio::gender");

    let report = apply(&mut doc, &fields, &[assignment("radio::gender", "female")]);

    assert_eq!(report.filled, 1);
    assert!(!doc.is_checked(male));
    assert!(doc.is_checked(female));
    assert!(!doc.is_checked(other));
    assert_eq!(doc.events_for(female, EventKind::Input), 1);
    assert_eq!(doc.events_for(female, EventKind::Change), 1);
    assert_eq!(doc.events_for(male, EventKind::Input), 0);
}

#[test]
fn choice_match_falls_back_to_label_text() {
    let mut doc = Document::new();
    let body = doc.root();

    // Control values are opaque codes; only the labels are human-readable.
    let yes = labeled_choice(&mut doc, body, "radio", "remote", "opt_1", "Yes");
    let no = labeled_choice(&mut doc, body, "radio", "remote", "opt_2", "No");

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    let report = apply(&mut doc, &fields, &[assignment("radio::remote", "yes")]);

    assert_eq!(report.filled, 1);
    assert!(doc.is_checked(yes));
    assert!(!doc.is_checked(no));
}

#[test]
fn checkbox_apply_checks_every_match() {
    let mut doc = Document::new();
    let body = doc.root();

    let a = labeled_choice(&mut doc, body, "checkbox", "perks", "remote", "Remote");
    let b = labeled_choice(&mut doc, body, "checkbox", "perks", "remote", "Remote");
    let c = labeled_choice(&mut doc, body, "checkbox", "perks", "onsite", "Onsite");

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    let report = apply(&mut doc, &fields, &[assignment("checkbox::perks", "remote")]);

    assert_eq!(report.filled, 1, "the logical field counts once");
    assert!(doc.is_checked(a));
    assert!(doc.is_checked(b));
    assert!(!doc.is_checked(c));
}

#[test]
fn radio_added_after_collection_is_still_matched() {
    let mut doc = Document::new();
    let body = doc.root();

    labeled_choice(&mut doc, body, "radio", "gender", "male", "Male");

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);

    // The group is re-queried live at apply time.
    let late = labeled_choice(&mut doc, body, "radio", "gender", "female", "Female");
    let report = apply(&mut doc, &fields, &[assignment("radio::gender", "female")]);

    assert_eq!(report.filled, 1);
    assert!(doc.is_checked(late));
}

// =========================================================================
// Failure isolation
// =========================================================================

#[test]
fn detached_node_fails_alone() {
    let mut doc = Document::new();
    let body = doc.root();

    let doomed = el(&mut doc, body, "input", &[("type", "text")]);
    let survivor = el(&mut doc, body, "input", &[("type", "email")]);

    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);
    let assignments = vec![
        assignment(&fields[0].field_id, "gone"),
        assignment(&fields[1].field_id, "user@example.com"),
    ];

    doc.remove_child(body, doomed);
    let report = apply(&mut doc, &fields, &assignments);

    assert_eq!(report.filled, 1, "the detached field does not abort the rest");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].field_id, fields[0].field_id);
    assert_eq!(doc.value(survivor), "user@example.com");
}
