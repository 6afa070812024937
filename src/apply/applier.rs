use std::collections::HashMap;

use crate::client::assignment::Assignment;
use crate::dom::dom_model::{Document, DomError, EventKind, NodeId};
use crate::dom::traversal::walk;
use crate::field::field_model::{FieldDescriptor, FieldType};
use crate::field::labels::labels_for;

// ============================================================================
// Assignment application
// ============================================================================

#[derive(Debug)]
pub struct ApplyReport {
    pub filled: usize,
    pub failures: Vec<ApplyFailure>,
}

#[derive(Debug)]
pub struct ApplyFailure {
    pub field_id: String,
    pub error: String,
}

/// Write assigned values into the DOM. Unmatched fields are left untouched;
/// a failure on one field (e.g. its node was detached mid-pass) is recorded
/// and does not abort the remaining fields. Returns the count of fields
/// actually mutated.
pub fn apply(
    doc: &mut Document,
    fields: &[FieldDescriptor],
    assignments: &[Assignment],
) -> ApplyReport {
    let by_id: HashMap<&str, &str> = assignments
        .iter()
        .map(|a| (a.field_id.as_str(), a.value.as_str()))
        .collect();

    let mut filled = 0;
    let mut failures = Vec::new();

    for field in fields {
        let Some(value) = by_id.get(field.field_id.as_str()) else {
            continue;
        };

        let result = if field.field_type.is_choice_group() {
            apply_choice(doc, field, value)
        } else {
            apply_value(doc, field.node, value)
        };

        match result {
            Ok(true) => filled += 1,
            Ok(false) => {}
            Err(e) => failures.push(ApplyFailure {
                field_id: field.field_id.clone(),
                error: e.to_string(),
            }),
        }
    }

    ApplyReport { filled, failures }
}

/// Check every control of a radio/checkbox group whose own value or label
/// matches the assignment, case-insensitively. All matches are applied;
/// single-select exclusivity is left to the host page's own radio
/// semantics.
fn apply_choice(
    doc: &mut Document,
    field: &FieldDescriptor,
    value: &str,
) -> Result<bool, DomError> {
    let wanted = value.to_lowercase();
    let type_attr = field.field_type.as_str();

    // Re-query the live group: the descriptor's member list may be stale.
    let candidates: Vec<NodeId> = match &field.name {
        Some(name) => walk(doc)
            .into_iter()
            .filter(|n| {
                doc.tag(*n) == "input"
                    && doc
                        .attr(*n, "type")
                        .map(|t| t.eq_ignore_ascii_case(type_attr))
                        .unwrap_or(false)
                    && doc.attr(*n, "name") == Some(name.as_str())
            })
            .collect(),
        None => vec![field.node],
    };

    let mut matched = false;
    for node in candidates {
        let value_match = doc
            .attr(node, "value")
            .map(|v| v.to_lowercase() == wanted)
            .unwrap_or(false);
        let control_matches = value_match
            || labels_for(doc, node)
                .iter()
                .any(|label| label.to_lowercase() == wanted);
        if control_matches {
            doc.set_checked(node, true)?;
            doc.dispatch(node, EventKind::Input, true);
            doc.dispatch(node, EventKind::Change, true);
            matched = true;
        }
    }
    Ok(matched)
}

fn apply_value(doc: &mut Document, node: NodeId, value: &str) -> Result<bool, DomError> {
    doc.focus(node)?;
    doc.set_value(node, value)?;
    doc.dispatch(node, EventKind::Input, true);
    doc.dispatch(node, EventKind::Change, true);
    Ok(true)
}
