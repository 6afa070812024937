use crate::client::assignment::HttpAssignmentClient;
use crate::dom::snapshot::load_snapshot;
use crate::error::EngineError;
use crate::field::collector::collect;
use crate::field::registry::SeenRegistry;
use crate::pipeline::pipeline::Pipeline;
use crate::resume::attach::{HttpResumeClient, ResumeBackend};
use crate::trace::logger::TraceLogger;

// ============================================================================
// fill subcommand
// ============================================================================

pub fn cmd_fill(
    snapshot_path: &str,
    url: &str,
    api_base: &str,
    max_passes: u32,
    no_resume: bool,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<(), EngineError> {
    let mut doc = load_snapshot(snapshot_path)?;

    if verbose > 0 {
        eprintln!(
            "Filling {} against {} (max_passes={})...",
            snapshot_path, api_base, max_passes
        );
    }

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let resume: Option<Box<dyn ResumeBackend>> = if no_resume {
        None
    } else {
        Some(Box::new(HttpResumeClient::new(api_base)))
    };
    let mut pipeline = Pipeline::new(
        Box::new(HttpAssignmentClient::new(api_base)),
        resume,
        tracer,
    );

    let summaries = pipeline.watch_until_quiet(&mut doc, url, max_passes);

    let total_fields: usize = summaries.iter().map(|s| s.fields).sum();
    let total_filled: usize = summaries.iter().map(|s| s.filled).sum();
    println!(
        "{} passes, {} fields discovered, {} filled",
        summaries.len(),
        total_fields,
        total_filled
    );

    if verbose > 0 {
        for summary in &summaries {
            eprintln!(
                "  pass {}: {} fields, {} filled",
                summary.pass, summary.fields, summary.filled
            );
        }
    }

    Ok(())
}

// ============================================================================
// collect subcommand
// ============================================================================

/// Discovery only: print the field descriptors a pipeline pass would send,
/// without touching the network.
pub fn cmd_collect(snapshot_path: &str, verbose: u8) -> Result<(), EngineError> {
    let doc = load_snapshot(snapshot_path)?;
    let mut registry = SeenRegistry::new();
    let fields = collect(&doc, &mut registry);

    if verbose > 0 {
        eprintln!("Discovered {} fields", fields.len());
    }

    let json = serde_json::to_string_pretty(&fields).map_err(|e| EngineError::JsonSerialize {
        context: "field descriptors".to_string(),
        source: e,
    })?;
    println!("{}", json);

    Ok(())
}
