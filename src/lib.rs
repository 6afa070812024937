use crate::client::assignment::HttpAssignmentClient;
use crate::dom::dom_model::Document;
use crate::pipeline::pipeline::{PassSummary, Pipeline};
use crate::resume::attach::HttpResumeClient;
use crate::trace::logger::TraceLogger;

pub mod apply;
pub mod cli;
pub mod client;
pub mod dom;
pub mod error;
pub mod field;
pub mod pipeline;
pub mod resume;
pub mod semantic;
pub mod trace;

/// Run the full autofill pipeline against a live document with the HTTP
/// backends: one initial pass, then mutation-driven re-runs until the page
/// is quiet or `max_passes` is reached.
pub fn fill_document(
    doc: &mut Document,
    url: &str,
    api_base: &str,
    tracer: TraceLogger,
    max_passes: u32,
) -> Vec<PassSummary> {
    let mut pipeline = Pipeline::new(
        Box::new(HttpAssignmentClient::new(api_base)),
        Some(Box::new(HttpResumeClient::new(api_base))),
        tracer,
    );
    pipeline.watch_until_quiet(doc, url, max_passes)
}
