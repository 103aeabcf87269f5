//! Plant listing command.

use anyhow::Result;
use florakg_core::config::AppConfig;

pub async fn execute(config: &AppConfig) -> Result<()> {
    let qa = super::load_service(config).await?;
    crate::output::print_plant_list(qa.list_entities(), &config.answer.delimiter);
    qa.close().await;
    Ok(())
}
