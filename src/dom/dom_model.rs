use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

// ============================================================================
// Arena DOM document
//
// The live page is modeled as an arena of nodes addressed by `NodeId`. A
// `NodeId` is a non-owning handle: it stays cheap to copy, and a node that
// the host page removes is flagged detached rather than freed, so a stale
// handle from an earlier pipeline pass fails loudly instead of aliasing a
// different element.
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Computed style as reported by the browser-side extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_extent")]
    pub width: f32,
    #[serde(default = "default_extent")]
    pub height: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
            opacity: default_opacity(),
            width: default_extent(),
            height: default_extent(),
        }
    }
}

fn default_display() -> String {
    "block".to_string()
}
fn default_visibility() -> String {
    "visible".to_string()
}
fn default_opacity() -> f32 {
    1.0
}
fn default_extent() -> f32 {
    100.0
}

/// Live widget state a form control carries outside its attributes.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    pub value: String,
    pub checked: bool,
    pub files: Vec<FileBlob>,
}

/// An attached file, as assigned to an `input[type=file]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlob {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// A shadow root hosted by an element. Closed roots keep their children in
/// the arena but the traversal never descends into them.
#[derive(Debug)]
pub struct ShadowRoot {
    pub open: bool,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct NodeData {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub shadow: Option<ShadowRoot>,
    pub style: ComputedStyle,
    pub state: ControlState,
    pub detached: bool,
}

/// Synthetic event kinds the engine dispatches after mutating a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Input,
    Change,
}

/// Record of one dispatched synthetic event. There is no acknowledgment
/// channel: dispatch is a published notification the host page's own
/// listeners may or may not observe.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}

/// Subtree mutations the watch loop drains between passes.
#[derive(Debug, Clone)]
pub enum Mutation {
    ChildListChanged { parent: NodeId },
}

/// DOM write failure. Isolated per field by the applier.
#[derive(Debug)]
pub enum DomError {
    Detached { tag: String },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::Detached { tag } => {
                write!(f, "node <{}> is detached from the document", tag)
            }
        }
    }
}

impl std::error::Error for DomError {}

pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    events: Vec<EventRecord>,
    mutations: Vec<Mutation>,
    focused: Option<NodeId>,
}

impl Document {
    /// Fresh document holding only a `<body>` root.
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            attrs: HashMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            shadow: None,
            style: ComputedStyle::default(),
            state: ControlState::default(),
            detached: false,
        };
        Self {
            nodes: vec![body],
            root: NodeId(0),
            events: Vec::new(),
            mutations: Vec::new(),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    // ------------------------------------------------------------------
    // Construction / host-page mutation
    // ------------------------------------------------------------------

    /// Create a detached element. Tags are normalized to lowercase.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            attrs: HashMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            shadow: None,
            style: ComputedStyle::default(),
            state: ControlState::default(),
            detached: false,
        });
        id
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.node_mut(id).text = Some(text.to_string());
    }

    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) {
        self.node_mut(id).style = style;
    }

    /// Append a child element; records a childList mutation on the parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(child).detached = false;
        self.node_mut(parent).children.push(child);
        self.mutations.push(Mutation::ChildListChanged { parent });
    }

    /// Attach a shadow root to a host element.
    pub fn attach_shadow(&mut self, host: NodeId, open: bool) {
        self.node_mut(host).shadow = Some(ShadowRoot {
            open,
            children: Vec::new(),
        });
    }

    /// Append a child into the host's shadow root. The child's parent pointer
    /// crosses the shadow boundary so ancestor walks keep working.
    pub fn append_shadow_child(&mut self, host: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(host);
        if let Some(shadow) = &mut self.node_mut(host).shadow {
            shadow.children.push(child);
        }
        self.mutations.push(Mutation::ChildListChanged { parent: host });
    }

    /// Remove a child; the whole subtree is flagged detached. Stale handles
    /// held by a descriptor from an earlier pass then fail on write.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != child);
        self.mark_detached(child);
        self.mutations.push(Mutation::ChildListChanged { parent });
    }

    fn mark_detached(&mut self, id: NodeId) {
        self.node_mut(id).detached = true;
        let mut pending: Vec<NodeId> = self.node(id).children.clone();
        if let Some(shadow) = &self.node(id).shadow {
            pending.extend(shadow.children.iter().copied());
        }
        for child in pending {
            self.mark_detached(child);
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attrs.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attrs.contains_key(name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn shadow(&self, id: NodeId) -> Option<&ShadowRoot> {
        self.node(id).shadow.as_ref()
    }

    pub fn style(&self, id: NodeId) -> &ComputedStyle {
        &self.node(id).style
    }

    pub fn is_detached(&self, id: NodeId) -> bool {
        self.node(id).detached
    }

    pub fn value(&self, id: NodeId) -> &str {
        &self.node(id).state.value
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node(id).state.checked
    }

    pub fn files(&self, id: NodeId) -> &[FileBlob] {
        &self.node(id).state.files
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Concatenated text of the node and its descendants, document order.
    /// Shadow content renders before light children, matching the traversal.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = &self.node(id).text {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push_str(text);
        }
        if let Some(shadow) = &self.node(id).shadow {
            for child in &shadow.children {
                self.collect_text(*child, out);
            }
        }
        for child in &self.node(id).children {
            self.collect_text(*child, out);
        }
    }

    /// Document-wide id lookup over the light tree, document order. Shadow
    /// content is intentionally not searched: `aria-labelledby` and
    /// `label[for]` resolve through the document like `getElementById`,
    /// which does not pierce shadow roots.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.find_light(self.root, &|doc, id| {
            doc.attr(id, "id") == Some(element_id)
        })
    }

    /// First `<label for=...>` targeting the given element id, light tree.
    pub fn label_targeting(&self, element_id: &str) -> Option<NodeId> {
        self.find_light(self.root, &|doc, id| {
            doc.tag(id) == "label" && doc.attr(id, "for") == Some(element_id)
        })
    }

    fn find_light(
        &self,
        from: NodeId,
        predicate: &dyn Fn(&Document, NodeId) -> bool,
    ) -> Option<NodeId> {
        if predicate(self, from) {
            return Some(from);
        }
        for child in &self.node(from).children {
            if let Some(found) = self.find_light(*child, predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Nearest ancestor `<label>`, crossing shadow boundaries upward.
    pub fn ancestor_label(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.node(id).parent;
        while let Some(ancestor) = current {
            if self.tag(ancestor) == "label" {
                return Some(ancestor);
            }
            current = self.node(ancestor).parent;
        }
        None
    }

    /// 0-based index among same-tag siblings, within the light child list or
    /// the shadow child list the node actually lives in.
    pub fn same_tag_sibling_index(&self, id: NodeId) -> usize {
        let tag = self.tag(id);
        let siblings: &[NodeId] = match self.node(id).parent {
            Some(parent) => {
                let parent_node = self.node(parent);
                match &parent_node.shadow {
                    Some(shadow) if shadow.children.contains(&id) => &shadow.children,
                    _ => &parent_node.children,
                }
            }
            None => return 0,
        };
        siblings
            .iter()
            .filter(|s| self.tag(**s) == tag)
            .position(|s| *s == id)
            .unwrap_or(0)
    }

    // ------------------------------------------------------------------
    // Engine-side writes
    // ------------------------------------------------------------------

    fn ensure_attached(&self, id: NodeId) -> Result<(), DomError> {
        if self.node(id).detached {
            return Err(DomError::Detached {
                tag: self.tag(id).to_string(),
            });
        }
        Ok(())
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), DomError> {
        self.ensure_attached(id)?;
        self.focused = Some(id);
        Ok(())
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.ensure_attached(id)?;
        self.node_mut(id).state.value = value.to_string();
        Ok(())
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DomError> {
        self.ensure_attached(id)?;
        self.node_mut(id).state.checked = checked;
        Ok(())
    }

    pub fn set_files(&mut self, id: NodeId, files: Vec<FileBlob>) -> Result<(), DomError> {
        self.ensure_attached(id)?;
        self.node_mut(id).state.files = files;
        Ok(())
    }

    /// Publish a synthetic event. The record is all there is: success of an
    /// application is "value written + events dispatched", nothing more.
    pub fn dispatch(&mut self, id: NodeId, kind: EventKind, bubbles: bool) {
        self.events.push(EventRecord {
            target: id,
            kind,
            bubbles,
        });
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn events_for(&self, id: NodeId, kind: EventKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.target == id && e.kind == kind)
            .count()
    }

    /// Drain the childList mutation backlog. The watch loop calls this
    /// between passes; construction noise is drained before the first pass.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
