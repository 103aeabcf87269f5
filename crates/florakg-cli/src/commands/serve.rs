//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use florakg_core::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to server.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let qa = Arc::new(super::load_service(config).await?);

    println!();
    println!("  {} {}", "florakg".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}      http://{}:{}", "Page".green(), host, port);
    println!("  {}       http://{}:{}/api", "API".green(), host, port);
    println!(
        "  {}   {} / {} ({} plants)",
        "Store".green(),
        qa.backend().as_str(),
        qa.strategy().as_str(),
        qa.list_entities().len()
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    florakg_web::run_server(qa, &host, port).await?;

    Ok(())
}
