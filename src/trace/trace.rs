use serde::Serialize;

/// One line of the JSONL pipeline trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    PassStarted { pass: u32, url: String },
    FieldsCollected { pass: u32, count: usize },
    AssignmentsReceived { pass: u32, count: usize },
    /// Server-declared opt-out for this domain. Distinct from an empty
    /// assignment list, which is a "no match" and logs no skip event.
    ServerSkip { pass: u32, url: String },
    AssignmentsUnavailable { pass: u32, reason: String },
    ApplyFailed { field_id: String, error: String },
    ResumeAttached { pass: u32, inputs: usize },
    ResumeSkipped { pass: u32, reason: String },
    PassCompleted { pass: u32, filled: usize },
}
