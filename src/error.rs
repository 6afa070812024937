use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// Snapshot file could not be read
    SnapshotIo { path: String, source: std::io::Error },

    /// JSON parsing failed (snapshot or remote response)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (field dump)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Remote call failed at the transport layer
    Http { context: String, source: reqwest::Error },

    /// Remote call returned a non-success status
    HttpStatus { context: String, status: u16 },

    /// No API base endpoint resolvable for a request path
    MissingApiBase,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SnapshotIo { path, source } => {
                write!(f, "Failed to read snapshot '{}': {}", path, source)
            }
            EngineError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            EngineError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            EngineError::Http { context, source } => {
                write!(f, "HTTP request failed ({}): {}", context, source)
            }
            EngineError::HttpStatus { context, status } => {
                write!(f, "HTTP status {} ({})", status, context)
            }
            EngineError::MissingApiBase => {
                write!(f, "No API base endpoint configured")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::SnapshotIo { source, .. } => Some(source),
            EngineError::JsonParse { source, .. } => Some(source),
            EngineError::JsonSerialize { source, .. } => Some(source),
            EngineError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
