//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use florakg_core::config::AppConfig;
use florakg_core::qa::composer::AnswerComposer;
use florakg_core::store::fixture::fixture_store;
use florakg_core::{AnswerStrategy, QaService, RecordStore, StoreBackend, TableStore};
use florakg_graph::{GraphConfig, GraphStore};
use florakg_llm::ChatClient;
use std::path::PathBuf;
use std::sync::Arc;

pub mod ask;
pub mod import;
pub mod plants;
pub mod serve;
pub mod show;
pub mod status;

/// Plant culture knowledge-graph question answering
#[derive(Parser)]
#[command(name = "florakg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file (defaults to ./florakg.toml)
    #[arg(short, long, global = true, env = "FLORAKG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Record store backend: graph, table or fixture
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Answer strategy: template or grounded
    #[arg(short, long, global = true)]
    pub strategy: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Answer a question (interactive when no question is given)
    Ask(ask::AskArgs),

    /// List all plants in the knowledge base
    Plants,

    /// Show the full record of one plant
    Show(show::ShowArgs),

    /// Import plants from a CSV table into Neo4j
    Import(import::ImportArgs),

    /// Show knowledge base status
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Ask(args) => ask::execute(args, &config).await,
            Commands::Plants => plants::execute(&config).await,
            Commands::Show(args) => show::execute(args, &config).await,
            Commands::Import(args) => import::execute(args, &config).await,
            Commands::Status => status::execute(&config).await,
        }
    }

    /// Load the config file and environment, then apply command-line flags.
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        if let Some(backend) = &self.backend {
            config.store.backend = StoreBackend::parse(backend)
                .with_context(|| format!("Unknown backend '{}' (expected graph, table or fixture)", backend))?;
        }
        if let Some(strategy) = &self.strategy {
            config.answer.strategy = AnswerStrategy::parse(strategy)
                .with_context(|| format!("Unknown strategy '{}' (expected template or grounded)", strategy))?;
        }
        Ok(config)
    }
}

/// Open the configured record store.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.store.backend {
        StoreBackend::Graph => {
            let graph_config = GraphConfig::from(&config.store);
            Arc::new(GraphStore::connect(&graph_config).await.with_context(|| {
                format!(
                    "Cannot reach Neo4j at {}; use --backend fixture for offline mode",
                    graph_config.uri
                )
            })?)
        }
        StoreBackend::Table => {
            let path = config
                .store
                .table_path
                .as_deref()
                .context("The table backend needs store.table_path or FLORAKG_TABLE_PATH")?;
            Arc::new(TableStore::from_csv(path)?)
        }
        StoreBackend::Fixture => Arc::new(fixture_store()),
    };
    Ok(store)
}

/// Build the answer composer for the configured strategy.
pub fn build_composer(config: &AppConfig) -> AnswerComposer {
    match config.answer.strategy {
        AnswerStrategy::Template => AnswerComposer::template(&config.answer),
        AnswerStrategy::Grounded => match ChatClient::new(&config.llm) {
            Ok(client) => {
                tracing::info!(model = %config.llm.model, "Grounded answers enabled");
                AnswerComposer::new(&config.answer, config.llm.max_tokens, Some(Arc::new(client)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion service unavailable; grounded answers will report it");
                AnswerComposer::new(&config.answer, config.llm.max_tokens, None)
            }
        },
    }
}

/// Open the store and load the question answering service.
pub async fn load_service(config: &AppConfig) -> Result<QaService> {
    let store = open_store(config).await?;
    let qa = QaService::load(store, &config.aliases, build_composer(config)).await?;
    Ok(qa)
}
