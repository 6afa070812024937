use std::{fs::OpenOptions, io::Write, sync::Mutex};

use crate::trace::trace::TraceEvent;

/// JSONL sink for pipeline trace events.
///
/// A file sink that cannot be opened degrades to disabled with a warning;
/// tracing must never take the pipeline down. The in-memory sink exists so
/// tests can assert on the event stream.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
    memory: Option<Mutex<Vec<TraceEvent>>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
                memory: None,
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            file: None,
            memory: None,
        }
    }

    pub fn memory() -> Self {
        Self {
            file: None,
            memory: Some(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self, event: &TraceEvent) {
        if let Some(memory) = &self.memory {
            if let Ok(mut events) = memory.lock() {
                events.push(event.clone());
            }
        }

        let file_mutex = match &self.file {
            Some(f) => f,
            None => return,
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Warning: trace logger lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            eprintln!("Warning: failed to write trace event: {}", e);
        }
    }

    /// Events recorded by the in-memory sink, in order. Empty for file-backed
    /// and disabled loggers.
    pub fn recorded(&self) -> Vec<TraceEvent> {
        match &self.memory {
            Some(memory) => memory.lock().map(|e| e.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}
