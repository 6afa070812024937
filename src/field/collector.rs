use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::dom::dom_model::{Document, NodeId};
use crate::dom::traversal::{walk, walk_from};
use crate::dom::visibility::is_visible;
use crate::field::field_model::{ControlKind, FieldDescriptor, FieldType, narrow_control};
use crate::field::labels::{labels_for, sanitize};
use crate::field::registry::SeenRegistry;
use crate::semantic::classifier::classify;

// ============================================================================
// Field collection
// ============================================================================

/// Discover every fillable field not yet seen, in document order.
///
/// Elements are registered in the seen registry immediately upon emission,
/// before the pass continues, so a re-entrant pass started mid-collection
/// cannot double-count them. Radio/checkbox controls sharing a name collapse
/// into one logical field in the grouping pass.
pub fn collect(doc: &Document, registry: &mut SeenRegistry) -> Vec<FieldDescriptor> {
    let mut raw = Vec::new();

    for node in walk(doc) {
        let Some(kind) = narrow_control(doc, node) else {
            continue;
        };
        if doc.has_attr(node, "disabled") || doc.has_attr(node, "readonly") {
            continue;
        }
        if let ControlKind::Input { input_type } = &kind {
            if matches!(input_type.as_str(), "hidden" | "file" | "button" | "submit") {
                continue;
            }
        }
        let Some(field_type) = logical_type(&kind) else {
            continue;
        };
        if registry.contains(node) {
            continue;
        }
        if !is_visible(doc, node) {
            continue;
        }

        registry.insert(node);
        raw.push(build_descriptor(doc, node, field_type, &kind));
    }

    group_choice_fields(raw)
}

/// Map a narrowed control onto the supported logical type enum. Anything
/// outside the enum (range, color, date, ...) is not collected.
fn logical_type(kind: &ControlKind) -> Option<FieldType> {
    let field_type = match kind {
        ControlKind::Input { input_type } => match input_type.as_str() {
            "" | "text" => FieldType::Text,
            "email" => FieldType::Email,
            "tel" => FieldType::Tel,
            "number" => FieldType::Number,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "password" => FieldType::Password,
            "url" => FieldType::Url,
            _ => return None,
        },
        ControlKind::Textarea => FieldType::Text,
        ControlKind::Select { .. } => FieldType::Select,
        ControlKind::ContentEditable => FieldType::Richtext,
    };
    Some(field_type)
}

fn build_descriptor(
    doc: &Document,
    node: NodeId,
    field_type: FieldType,
    kind: &ControlKind,
) -> FieldDescriptor {
    let name = doc.attr(node, "name").map(str::to_string);
    let id = doc.attr(node, "id").map(str::to_string);
    let placeholder = doc.attr(node, "placeholder").map(str::to_string);
    let labels = labels_for(doc, node);
    let semantic = classify(
        name.as_deref(),
        id.as_deref(),
        placeholder.as_deref(),
        &labels,
    );

    let options = match field_type {
        FieldType::Select => select_options(doc, node),
        _ => Vec::new(),
    };
    let multiple = matches!(kind, ControlKind::Select { multiple: true });

    FieldDescriptor {
        node,
        name,
        id,
        field_id: structural_path(doc, node),
        labels,
        placeholder,
        field_type,
        options,
        multiple,
        semantic,
    }
}

/// Visible option text of a select, in document order (descends through
/// optgroups).
fn select_options(doc: &Document, select: NodeId) -> Vec<String> {
    let mut options = Vec::new();
    for node in walk_from(doc, select) {
        if doc.tag(node) == "option" {
            let text = sanitize(&doc.text_content(node));
            if !text.is_empty() {
                options.push(text);
            }
        }
    }
    options
}

/// Structural path from the element up to (but excluding) the document
/// body: `tag:siblingIndex` segments, outermost first, joined by `/`.
/// Sibling indexes count same-tag siblings only, so the path is stable as
/// long as the subtree is unchanged and distinct for distinct elements even
/// without any id or name.
pub fn structural_path(doc: &Document, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = id;
    loop {
        if doc.tag(current) == "body" {
            break;
        }
        segments.push(format!(
            "{}:{}",
            doc.tag(current),
            doc.same_tag_sibling_index(current)
        ));
        match doc.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    segments.reverse();
    segments.join("/")
}

/// Collapse radio/checkbox fields sharing a group key into one logical
/// field. The first member becomes the representative, its `field_id`
/// rewritten to the `type::name` key and its options accumulating the first
/// non-empty label of every member in first-seen order. Ungrouped fields
/// pass through unchanged and precede the representatives in the output.
fn group_choice_fields(fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut out = Vec::new();
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, FieldDescriptor> = HashMap::new();

    for field in fields {
        if !field.field_type.is_choice_group() {
            out.push(field);
            continue;
        }

        let key = group_key(&field);
        let first_label = field.labels.iter().find(|l| !l.is_empty()).cloned();

        match groups.entry(key) {
            Entry::Occupied(mut entry) => {
                if let Some(label) = first_label {
                    let representative = entry.get_mut();
                    if !representative.options.contains(&label) {
                        representative.options.push(label);
                    }
                }
            }
            Entry::Vacant(entry) => {
                let mut representative = field;
                representative.field_id = entry.key().clone();
                representative.options = first_label.into_iter().collect();
                group_order.push(entry.key().clone());
                entry.insert(representative);
            }
        }
    }

    for key in group_order {
        if let Some(representative) = groups.remove(&key) {
            out.push(representative);
        }
    }
    out
}

/// `type::(name | id | structural path)`; intentionally collides for every
/// option belonging to the same logical question.
pub fn group_key(field: &FieldDescriptor) -> String {
    let base = field
        .name
        .as_deref()
        .or(field.id.as_deref())
        .unwrap_or(&field.field_id);
    format!("{}::{}", field.field_type.as_str(), base)
}
