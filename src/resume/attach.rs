use serde::Serialize;

use crate::dom::dom_model::{Document, EventKind, FileBlob, NodeId};
use crate::dom::traversal::walk;
use crate::dom::visibility::is_visible;
use crate::error::EngineError;

// ============================================================================
// Resume attachment
// ============================================================================

pub const RESUME_FILE_NAME: &str = "resume.pdf";
pub const RESUME_MEDIA_TYPE: &str = "application/pdf";

/// Boundary to the remote resume blob service, injectable for tests.
pub trait ResumeBackend {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, EngineError>;
}

#[derive(Serialize)]
struct ResumeRequest<'a> {
    url: &'a str,
    fields: Vec<String>,
}

pub struct HttpResumeClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl HttpResumeClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl ResumeBackend for HttpResumeClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        if self.base.is_empty() {
            return Err(EngineError::MissingApiBase);
        }
        let endpoint = format!("{}/extension/resume", self.base);
        let body = ResumeRequest {
            url,
            fields: Vec::new(),
        };

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .map_err(|e| EngineError::Http {
                context: "resume fetch".to_string(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(EngineError::HttpStatus {
                context: "resume fetch".to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| EngineError::Http {
            context: "resume fetch body".to_string(),
            source: e,
        })?;
        Ok(bytes.to_vec())
    }
}

/// Visible, enabled, non-readonly `input[type=file]` elements, in document
/// order. There is no seen-set dedup here: this flow intentionally
/// re-attaches the resume on every pipeline pass.
pub fn collect_file_inputs(doc: &Document) -> Vec<NodeId> {
    walk(doc)
        .into_iter()
        .filter(|n| {
            doc.tag(*n) == "input"
                && doc
                    .attr(*n, "type")
                    .map(|t| t.eq_ignore_ascii_case("file"))
                    .unwrap_or(false)
                && !doc.has_attr(*n, "disabled")
                && !doc.has_attr(*n, "readonly")
                && is_visible(doc, *n)
        })
        .collect()
}

/// Assign the fetched blob to every discovered file input as a one-entry
/// file list, firing `input`/`change` per input. Returns how many inputs
/// received the file; a write failure on one input skips only that input.
pub fn attach_resume(doc: &mut Document, inputs: &[NodeId], bytes: &[u8]) -> usize {
    let blob = FileBlob {
        name: RESUME_FILE_NAME.to_string(),
        media_type: RESUME_MEDIA_TYPE.to_string(),
        bytes: bytes.to_vec(),
    };

    let mut attached = 0;
    for input in inputs {
        if doc.set_files(*input, vec![blob.clone()]).is_err() {
            continue;
        }
        doc.dispatch(*input, EventKind::Input, true);
        doc.dispatch(*input, EventKind::Change, true);
        attached += 1;
    }
    attached
}
