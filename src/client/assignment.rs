use serde::{Deserialize, Serialize};

use crate::field::field_model::FieldDescriptor;

// ============================================================================
// Remote assignment service
// ============================================================================

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Request body for `POST {base}/extension/autofill`. Only the fields'
/// external-facing attributes go over the wire; the live element handle is
/// skipped at the serde level.
#[derive(Debug, Serialize)]
pub struct AutofillRequest<'a> {
    pub url: &'a str,
    pub fields: &'a [FieldDescriptor],
}

#[derive(Debug, Default, Deserialize)]
pub struct AutofillResponse {
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// A field-identity-to-value mapping returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub field_id: String,
    pub value: String,
}

/// Outcome of one assignment request. `Unavailable` covers transport
/// failures and non-success statuses alike; retries, if any, belong to the
/// next mutation-triggered pass, never to this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// Server responded with a value mapping (possibly empty).
    Assignments(Vec<Assignment>),
    /// Server declared an opt-out for this domain. Not an error.
    Skip,
    /// Transport failure or non-success status.
    Unavailable { reason: String },
}

/// Boundary to the remote assignment service, injectable for tests.
pub trait AssignmentBackend {
    fn request(&self, url: &str, fields: &[FieldDescriptor]) -> AssignmentOutcome;
}

pub struct HttpAssignmentClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl HttpAssignmentClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl AssignmentBackend for HttpAssignmentClient {
    fn request(&self, url: &str, fields: &[FieldDescriptor]) -> AssignmentOutcome {
        if self.base.is_empty() {
            return AssignmentOutcome::Unavailable {
                reason: "no API base configured".to_string(),
            };
        }

        let body = AutofillRequest { url, fields };
        let endpoint = format!("{}/extension/autofill", self.base);

        let response = match self.http.post(&endpoint).json(&body).send() {
            Ok(response) => response,
            Err(e) => {
                return AssignmentOutcome::Unavailable {
                    reason: format!("transport failure: {}", e),
                };
            }
        };

        if !response.status().is_success() {
            return AssignmentOutcome::Unavailable {
                reason: format!("status {}", response.status().as_u16()),
            };
        }

        let parsed: AutofillResponse = match response.json() {
            Ok(parsed) => parsed,
            Err(e) => {
                return AssignmentOutcome::Unavailable {
                    reason: format!("malformed response: {}", e),
                };
            }
        };

        if parsed.skip {
            return AssignmentOutcome::Skip;
        }
        AssignmentOutcome::Assignments(parsed.assignments)
    }
}
