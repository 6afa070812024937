use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::assignment::DEFAULT_API_BASE;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "formfill",
    version,
    about = "Form-field discovery and autofill engine"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Assignment service base endpoint
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Write a JSONL pipeline trace to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: formfill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline against a page snapshot
    Fill {
        /// Path to a page snapshot JSON file
        #[arg(long)]
        snapshot: String,

        /// URL of the page the snapshot was taken from
        #[arg(long)]
        url: String,

        /// Maximum mutation-driven pipeline passes
        #[arg(long)]
        max_passes: Option<u32>,

        /// Skip the resume-attachment flow
        #[arg(long, default_value_t = false)]
        no_resume: bool,
    },

    /// Discover fields in a page snapshot and print them as JSON
    Collect {
        /// Path to a page snapshot JSON file
        #[arg(long)]
        snapshot: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `formfill.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: Option<String>,

    #[serde(default = "default_max_passes")]
    pub max_passes: u32,

    pub trace: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            max_passes: default_max_passes(),
            trace: None,
        }
    }
}

fn default_max_passes() -> u32 {
    8
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("formfill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Resolve the assignment service base: CLI > config file > fixed local
/// default.
pub fn resolve_api_base(cli: Option<&str>, config: Option<&str>) -> String {
    cli.or(config).unwrap_or(DEFAULT_API_BASE).to_string()
}
