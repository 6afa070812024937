use crate::dom::dom_model::{Document, NodeId};

/// Rendered-visibility predicate.
///
/// Invisible elements are excluded from collection entirely, not merely
/// skipped for filling: zero-size or hidden controls are a common decoy
/// (honeypot) pattern and writing into them flags the submission.
pub fn is_visible(doc: &Document, id: NodeId) -> bool {
    let style = doc.style(id);
    if style.display == "none" {
        return false;
    }
    if style.visibility == "hidden" {
        return false;
    }
    // opacity that rounds to zero
    if style.opacity < 0.005 {
        return false;
    }
    if style.width <= 0.0 || style.height <= 0.0 {
        return false;
    }
    true
}
