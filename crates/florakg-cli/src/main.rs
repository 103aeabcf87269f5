//! florakg CLI
//!
//! Question answering over a plant-culture knowledge graph.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

const DEFAULT_FILTER: &str = "florakg=info,florakg_core=info,florakg_web=debug";
const VERBOSE_FILTER: &str = "florakg=debug,florakg_core=debug,florakg_graph=debug,florakg_llm=debug,florakg_web=debug";

/// Initialize tracing with optional file logging.
///
/// `serve` logs to stdout; every other command logs to stderr so answers on
/// stdout stay clean.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool, to_stdout: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }.into());

    let writer = if to_stdout {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    let console = tracing_subscriber::fmt::layer().with_writer(writer);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) => args.log_file.clone(),
        _ => None,
    };
    let serving = matches!(&cli.command, Commands::Serve(_));
    init_tracing(log_file.as_deref(), cli.verbose, serving)?;

    cli.execute().await
}
