//! Check Command

use anyhow::Result;
use std::time::Duration;

use travelpay_common::{SqlHelper, SuiteConfig, Table};
use travelpay_e2e::launcher::wait_until_reachable;

use crate::output::{print_error, print_success};

pub async fn execute(config: &SuiteConfig) -> Result<bool> {
    let mut healthy = true;

    match wait_until_reachable(&config.app.url, Duration::from_secs(5)).await {
        Ok(_) => print_success(&format!("Application is up at {}", config.app.url)),
        Err(e) => {
            print_error(&e.to_string());
            healthy = false;
        }
    }

    match SqlHelper::connect(&config.db).await {
        Ok(sql) => {
            // Counting orders proves the schema is in place too
            match sql.count(Table::Order).await {
                Ok(rows) => print_success(&format!("Database is reachable ({} order rows)", rows)),
                Err(e) => {
                    print_error(&format!("Database query failed: {}", e));
                    healthy = false;
                }
            }
            sql.close().await;
        }
        Err(e) => {
            print_error(&format!("Cannot connect to database: {}", e));
            healthy = false;
        }
    }

    Ok(healthy)
}
