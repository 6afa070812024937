use std::collections::HashMap;

use serde::Deserialize;

use crate::dom::dom_model::{ComputedStyle, Document, NodeId};
use crate::error::EngineError;

// ============================================================================
// Page snapshot loading
//
// The browser-side extractor serializes the rendered tree (with computed
// style and open/closed shadow roots) as one JSON node tree. Deserializing
// it rebuilds the arena document the engine runs against.
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SnapshotNode {
    pub tag: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub style: Option<ComputedStyle>,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
    #[serde(default)]
    pub shadow: Option<SnapshotShadow>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotShadow {
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

fn default_open() -> bool {
    true
}

/// Read and deserialize a snapshot file into a live document.
pub fn load_snapshot(path: &str) -> Result<Document, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::SnapshotIo {
        path: path.to_string(),
        source: e,
    })?;
    let root: SnapshotNode =
        serde_json::from_str(&content).map_err(|e| EngineError::JsonParse {
            context: format!("snapshot file '{}'", path),
            source: e,
        })?;
    Ok(build_document(root))
}

/// Rebuild a document from a deserialized snapshot tree. A snapshot whose
/// root is not `<body>` is grafted under a fresh body.
pub fn build_document(root: SnapshotNode) -> Document {
    let mut doc = Document::new();
    let body = doc.root();
    if root.tag.eq_ignore_ascii_case("body") {
        apply_node_data(&mut doc, body, &root);
        graft_children(&mut doc, body, root.shadow, root.children);
    } else {
        let child = graft_node(&mut doc, root);
        doc.append_child(body, child);
    }
    // Construction appends are not page mutations; start the watch clean.
    doc.take_mutations();
    doc
}

fn apply_node_data(doc: &mut Document, id: NodeId, node: &SnapshotNode) {
    for (name, value) in &node.attrs {
        doc.set_attr(id, name, value);
    }
    if let Some(text) = &node.text {
        doc.set_text(id, text);
    }
    if let Some(style) = &node.style {
        doc.set_style(id, style.clone());
    }
}

fn graft_node(doc: &mut Document, node: SnapshotNode) -> NodeId {
    let id = doc.create_element(&node.tag);
    apply_node_data(doc, id, &node);
    graft_children(doc, id, node.shadow, node.children);
    id
}

fn graft_children(
    doc: &mut Document,
    id: NodeId,
    shadow: Option<SnapshotShadow>,
    children: Vec<SnapshotNode>,
) {
    if let Some(shadow) = shadow {
        doc.attach_shadow(id, shadow.open);
        for child in shadow.children {
            let child_id = graft_node(doc, child);
            doc.append_shadow_child(id, child_id);
        }
    }
    for child in children {
        let child_id = graft_node(doc, child);
        doc.append_child(id, child_id);
    }
}
