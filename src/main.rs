use clap::Parser;
use formfill::cli::commands::{cmd_collect, cmd_fill};
use formfill::cli::config::{Cli, Commands, load_config, resolve_api_base};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let api_base = resolve_api_base(cli.api_base.as_deref(), config.api_base.as_deref());
    let trace_path = cli.trace.as_deref().or(config.trace.as_deref());

    match cli.command {
        Commands::Fill {
            snapshot,
            url,
            max_passes,
            no_resume,
        } => {
            let max_passes = max_passes.unwrap_or(config.max_passes);
            cmd_fill(
                &snapshot,
                &url,
                &api_base,
                max_passes,
                no_resume,
                trace_path,
                cli.verbose,
            )?;
        }
        Commands::Collect { snapshot } => {
            cmd_collect(&snapshot, cli.verbose)?;
        }
    }

    Ok(())
}
