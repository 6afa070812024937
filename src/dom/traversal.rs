use crate::dom::dom_model::{Document, NodeId};

// ============================================================================
// Depth-first document-order traversal
// ============================================================================

/// Every element reachable from the document body, depth first, descending
/// through regular children and through open shadow roots. Closed shadow
/// roots are skipped: the host API never exposes their contents, so there
/// is nothing to retry. The body itself is not yielded.
pub fn walk(doc: &Document) -> Vec<NodeId> {
    let mut out = Vec::new();
    descend(doc, doc.root(), &mut out, false);
    out
}

/// Same traversal rooted at an arbitrary element, yielding the root too.
pub fn walk_from(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    descend(doc, root, &mut out, true);
    out
}

fn descend(doc: &Document, id: NodeId, out: &mut Vec<NodeId>, include_self: bool) {
    if include_self {
        out.push(id);
    }
    if let Some(shadow) = doc.shadow(id) {
        if shadow.open {
            for child in &shadow.children {
                descend(doc, *child, out, true);
            }
        }
    }
    for child in doc.children(id) {
        descend(doc, *child, out, true);
    }
}
