//! CSV to Neo4j import command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use florakg_core::config::AppConfig;
use florakg_core::TableStore;
use florakg_graph::{GraphClient, GraphConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file with one plant per row
    #[arg(long)]
    pub file: PathBuf,

    /// Remove existing plant data before importing
    #[arg(long)]
    pub replace: bool,
}

pub async fn execute(args: ImportArgs, config: &AppConfig) -> Result<()> {
    let plants = TableStore::read_csv(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    println!(
        "{} {} plants from {}",
        "Importing".bold(),
        plants.len().to_string().cyan(),
        args.file.display()
    );

    let graph_config = GraphConfig::from(&config.store);
    let client = GraphClient::connect(&graph_config).await?;

    florakg_graph::schema::initialize_schema(&client).await?;
    let result = florakg_graph::import_plants(&client, &plants, args.replace).await?;

    println!("\n{}", "Import complete:".green().bold());
    if args.replace {
        println!("  Nodes removed:         {}", result.removed);
    }
    println!("  Plants imported:       {}", result.plants);
    println!("  Relationships linked:  {}", result.relationships);

    Ok(())
}
