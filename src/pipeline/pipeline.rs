use crate::apply::applier::apply;
use crate::client::assignment::{AssignmentBackend, AssignmentOutcome};
use crate::dom::dom_model::Document;
use crate::field::collector::collect;
use crate::field::registry::SeenRegistry;
use crate::resume::attach::{ResumeBackend, attach_resume, collect_file_inputs};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// Pipeline orchestration: collect -> request -> apply, re-run on mutation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Collecting,
    Requesting,
    Applying,
}

/// Result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: u32,
    pub fields: usize,
    pub filled: usize,
}

/// Pipeline orchestrator. Owns the seen-element registry for one page load;
/// navigation means a new pipeline (and with it a fresh registry).
///
/// Passes are serialized through a single-slot in-flight flag: a mutation
/// trigger that lands while a pass is running coalesces into exactly one
/// follow-up pass after the current one completes, instead of spawning a
/// second concurrent pass against the same fields.
pub struct Pipeline {
    registry: SeenRegistry,
    assignments: Box<dyn AssignmentBackend>,
    resume: Option<Box<dyn ResumeBackend>>,
    tracer: TraceLogger,
    state: PassState,
    pass_count: u32,
    in_flight: bool,
    pending: bool,
}

impl Pipeline {
    pub fn new(
        assignments: Box<dyn AssignmentBackend>,
        resume: Option<Box<dyn ResumeBackend>>,
        tracer: TraceLogger,
    ) -> Self {
        Self {
            registry: SeenRegistry::new(),
            assignments,
            resume,
            tracer,
            state: PassState::Idle,
            pass_count: 0,
            in_flight: false,
            pending: false,
        }
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn registry(&self) -> &SeenRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SeenRegistry {
        &mut self.registry
    }

    pub fn tracer(&self) -> &TraceLogger {
        &self.tracer
    }

    /// Mutation trigger. Defers to the coalescing slot when a pass is
    /// already running.
    pub fn notify_mutation(&mut self) {
        self.pending = true;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// One full pass: collect, request, apply, then resume attachment.
    /// Returns None when a pass is already in flight; the trigger is
    /// remembered and coalesced into the next run.
    pub fn run_pass(&mut self, doc: &mut Document, url: &str) -> Option<PassSummary> {
        if self.in_flight {
            self.pending = true;
            return None;
        }
        self.in_flight = true;
        self.pass_count += 1;
        let pass = self.pass_count;

        self.tracer.log(&TraceEvent::PassStarted {
            pass,
            url: url.to_string(),
        });

        self.state = PassState::Collecting;
        let fields = collect(doc, &mut self.registry);
        self.tracer.log(&TraceEvent::FieldsCollected {
            pass,
            count: fields.len(),
        });

        let mut filled = 0;
        if !fields.is_empty() {
            self.state = PassState::Requesting;
            match self.assignments.request(url, &fields) {
                AssignmentOutcome::Assignments(assignments) => {
                    self.tracer.log(&TraceEvent::AssignmentsReceived {
                        pass,
                        count: assignments.len(),
                    });
                    self.state = PassState::Applying;
                    let report = apply(doc, &fields, &assignments);
                    for failure in &report.failures {
                        self.tracer.log(&TraceEvent::ApplyFailed {
                            field_id: failure.field_id.clone(),
                            error: failure.error.clone(),
                        });
                    }
                    filled = report.filled;
                }
                AssignmentOutcome::Skip => {
                    self.tracer.log(&TraceEvent::ServerSkip {
                        pass,
                        url: url.to_string(),
                    });
                }
                AssignmentOutcome::Unavailable { reason } => {
                    self.tracer
                        .log(&TraceEvent::AssignmentsUnavailable { pass, reason });
                }
            }
        }

        self.run_resume_flow(doc, url, pass);

        self.state = PassState::Idle;
        self.in_flight = false;
        self.tracer.log(&TraceEvent::PassCompleted { pass, filled });

        Some(PassSummary {
            pass,
            fields: fields.len(),
            filled,
        })
    }

    /// Independent per-pass flow: re-attaches the resume to every visible
    /// file input, regardless of field assignments. Failures skip attachment
    /// without failing the pass.
    fn run_resume_flow(&mut self, doc: &mut Document, url: &str, pass: u32) {
        let Some(resume) = &self.resume else {
            return;
        };

        let inputs = collect_file_inputs(doc);
        if inputs.is_empty() {
            return;
        }

        match resume.fetch(url) {
            Ok(bytes) => {
                let attached = attach_resume(doc, &inputs, &bytes);
                self.tracer.log(&TraceEvent::ResumeAttached {
                    pass,
                    inputs: attached,
                });
            }
            Err(e) => {
                self.tracer.log(&TraceEvent::ResumeSkipped {
                    pass,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Run the initial pass, then keep re-running while childList mutations
    /// (or a coalesced trigger) are outstanding, up to `max_passes`. The
    /// bound keeps SPA re-render storms from looping forever.
    pub fn watch_until_quiet(
        &mut self,
        doc: &mut Document,
        url: &str,
        max_passes: u32,
    ) -> Vec<PassSummary> {
        let mut summaries = Vec::new();
        if max_passes == 0 {
            return summaries;
        }

        // Anything recorded before the watch started is covered by the
        // initial pass.
        doc.take_mutations();

        if let Some(summary) = self.run_pass(doc, url) {
            summaries.push(summary);
        }

        while (summaries.len() as u32) < max_passes {
            let mutated = !doc.take_mutations().is_empty();
            if !mutated && !self.pending {
                break;
            }
            self.pending = false;
            if let Some(summary) = self.run_pass(doc, url) {
                summaries.push(summary);
            }
        }
        summaries
    }
}
