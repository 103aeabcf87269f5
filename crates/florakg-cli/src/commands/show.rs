//! Plant detail command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use florakg_core::config::AppConfig;
use florakg_core::FloraError;

#[derive(Args)]
pub struct ShowArgs {
    /// Canonical plant name
    pub name: String,
}

pub async fn execute(args: ShowArgs, config: &AppConfig) -> Result<()> {
    let qa = super::load_service(config).await?;
    let result = qa.get_entity_detail(&args.name).await;
    qa.close().await;

    match result {
        Ok(detail) => {
            crate::output::print_plant_detail(&detail, &config.answer.delimiter);
            Ok(())
        }
        Err(FloraError::EntityNotFound(name)) => {
            println!("{} {}", "Plant not found:".red(), name);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
