use crate::dom::dom_model::{Document, NodeId};

// ============================================================================
// Label resolution
// ============================================================================

/// All textual labels discoverable for an element, in source order:
/// `aria-label`, each id referenced by `aria-labelledby`, `label[for=<id>]`,
/// then the nearest ancestor `<label>`. Every entry is sanitized; duplicates
/// by sanitized text collapse to the first occurrence.
pub fn labels_for(doc: &Document, id: NodeId) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();

    if let Some(aria) = doc.attr(id, "aria-label") {
        push_unique(&mut labels, sanitize(aria));
    }

    if let Some(refs) = doc.attr(id, "aria-labelledby") {
        let ids: Vec<String> = refs.split_whitespace().map(|s| s.to_string()).collect();
        for referenced in ids {
            if let Some(target) = doc.get_element_by_id(&referenced) {
                push_unique(&mut labels, sanitize(&doc.text_content(target)));
            }
        }
    }

    if let Some(own_id) = doc.attr(id, "id") {
        let own_id = own_id.to_string();
        if let Some(label) = doc.label_targeting(&own_id) {
            push_unique(&mut labels, sanitize(&doc.text_content(label)));
        }
    }

    if let Some(ancestor) = doc.ancestor_label(id) {
        push_unique(&mut labels, sanitize(&doc.text_content(ancestor)));
    }

    labels
}

/// Collapse whitespace runs to a single space, strip required-field
/// decoration glyphs, trim.
pub fn sanitize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| *c != '✱' && *c != '*')
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_unique(labels: &mut Vec<String>, candidate: String) {
    if candidate.is_empty() {
        return;
    }
    if labels.iter().any(|l| *l == candidate) {
        return;
    }
    labels.push(candidate);
}
