use serde::{Deserialize, Serialize};

use crate::dom::dom_model::{Document, NodeId};
use crate::semantic::classifier::Semantic;

// ============================================================================
// Field descriptors
// ============================================================================

/// Logical control type of a fillable field. `textarea` collapses to
/// `text`, `contenteditable` surfaces as `richtext`; input types outside
/// this enum (range, color, date, ...) are not collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Number,
    Radio,
    Checkbox,
    Password,
    Url,
    Select,
    Richtext,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Number => "number",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Password => "password",
            FieldType::Url => "url",
            FieldType::Select => "select",
            FieldType::Richtext => "richtext",
        }
    }

    pub fn is_choice_group(&self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox)
    }
}

/// Element narrowing computed once at traversal time, instead of repeated
/// duck-typed checks downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Input { input_type: String },
    Textarea,
    Select { multiple: bool },
    ContentEditable,
}

/// Determine whether an element is a form control at all, and which kind.
/// Returns None for every non-control element.
pub fn narrow_control(doc: &Document, id: NodeId) -> Option<ControlKind> {
    match doc.tag(id) {
        "input" => {
            let input_type = doc
                .attr(id, "type")
                .unwrap_or("text")
                .to_ascii_lowercase();
            Some(ControlKind::Input { input_type })
        }
        "textarea" => Some(ControlKind::Textarea),
        "select" => Some(ControlKind::Select {
            multiple: doc.has_attr(id, "multiple"),
        }),
        _ => {
            if doc.attr(id, "contenteditable") == Some("true") {
                Some(ControlKind::ContentEditable)
            } else {
                None
            }
        }
    }
}

/// One discovered fillable field.
///
/// `node` is a non-owning handle into the current document, valid only for
/// the pipeline pass that produced the descriptor; the backing element may
/// be detached by page mutation at any time after. It is never serialized
/// and descriptors are never cached across passes.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    #[serde(skip)]
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub field_id: String,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub multiple: bool,
    pub semantic: Semantic,
}

fn is_false(value: &bool) -> bool {
    !*value
}
