//! Clean Command

use anyhow::Result;
use tracing::info;

use travelpay_common::{SqlHelper, SuiteConfig};

use crate::output::print_success;

pub async fn execute(config: &SuiteConfig) -> Result<bool> {
    let sql = SqlHelper::connect(&config.db).await?;
    info!("Cleaning {}", config.db.url_without_credentials());
    sql.clean_database().await?;
    sql.close().await;

    print_success("Database cleaned");
    Ok(true)
}
