use formfill::dom::dom_model::{ComputedStyle, Document, NodeId};

// =========================================================================
// Document builders
// =========================================================================

/// Append an element with attributes under `parent`.
pub fn el(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attr(id, name, value);
    }
    doc.append_child(parent, id);
    id
}

/// Append an element carrying its own text content.
pub fn text_el(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> NodeId {
    let id = el(doc, parent, tag, attrs);
    doc.set_text(id, text);
    id
}

/// A radio wrapped in a `<label>Label</label>`, the usual group markup.
pub fn labeled_choice(
    doc: &mut Document,
    parent: NodeId,
    input_type: &str,
    name: &str,
    value: &str,
    label: &str,
) -> NodeId {
    let wrapper = text_el(doc, parent, "label", &[], label);
    el(
        doc,
        wrapper,
        "input",
        &[("type", input_type), ("name", name), ("value", value)],
    )
}

/// Drain construction mutations so a test observes only its own.
pub fn settle(doc: &mut Document) {
    doc.take_mutations();
}

// =========================================================================
// Styles
// =========================================================================

pub fn display_none() -> ComputedStyle {
    ComputedStyle {
        display: "none".to_string(),
        ..ComputedStyle::default()
    }
}

pub fn visibility_hidden() -> ComputedStyle {
    ComputedStyle {
        visibility: "hidden".to_string(),
        ..ComputedStyle::default()
    }
}

pub fn zero_size() -> ComputedStyle {
    ComputedStyle {
        width: 0.0,
        height: 0.0,
        ..ComputedStyle::default()
    }
}

pub fn transparent() -> ComputedStyle {
    ComputedStyle {
        opacity: 0.001,
        ..ComputedStyle::default()
    }
}
