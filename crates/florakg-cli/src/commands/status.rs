//! Knowledge base status command.

use anyhow::Result;
use colored::Colorize;
use florakg_core::config::AppConfig;
use florakg_core::{AnswerStrategy, StoreBackend};
use florakg_graph::{GraphConfig, GraphStore};

pub async fn execute(config: &AppConfig) -> Result<()> {
    println!("{}", "Knowledge Base Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Backend:       {}", config.store.backend.as_str().cyan());
    println!("  Strategy:      {}", config.answer.strategy.as_str().cyan());
    println!("  Aliases:       {}", config.aliases.len().to_string().cyan());

    if config.store.backend == StoreBackend::Graph {
        println!("  Neo4j:         {}", config.store.uri);
        match GraphStore::connect(&GraphConfig::from(&config.store)).await {
            Ok(store) => {
                let counts = store.client().await?.get_counts().await?;
                println!("  Plants:        {}", counts.plants.to_string().cyan());
                println!("  Relationships: {}", counts.relationships.to_string().cyan());
            }
            Err(e) => {
                println!("  Store:         {}", "unavailable".red());
                println!("{}", "─".repeat(40));
                return Err(e.into());
            }
        }
    } else {
        let store = super::open_store(config).await?;
        let names = store.list_entity_names().await?;
        println!("  Plants:        {}", names.len().to_string().cyan());
    }

    match config.answer.strategy {
        AnswerStrategy::Grounded if config.llm.api_key.is_none() => {
            println!("  Completion:    {}", "no API key".yellow());
        }
        AnswerStrategy::Grounded => {
            println!("  Completion:    {}", config.llm.model.green());
        }
        AnswerStrategy::Template => {}
    }

    println!("{}", "─".repeat(40));
    Ok(())
}
