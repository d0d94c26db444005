//! Shared helpers for the live purchase suites
//!
//! These tests need the application, a Playwright-capable Node install and the
//! application database. Configure them through `travelpay.toml` or the
//! `TRAVELPAY_*` environment variables and run with `cargo test -- --ignored`.

use tokio::sync::Mutex;

use travelpay_common::{default_config_path, SuiteConfig};
use travelpay_e2e::scenario::{catalog, find};
use travelpay_e2e::SuiteRunner;

/// Scenarios share one database; they must not overlap
static DATABASE: Mutex<()> = Mutex::const_new(());

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Run a built-in scenario and fail with its failed checks
pub async fn run_catalog_scenario(id: &str) {
    init_tracing();
    let _guard = DATABASE.lock().await;

    let config = SuiteConfig::from_env(&default_config_path()).expect("load suite config");
    let scenarios = catalog();
    let scenario = find(&scenarios, id).expect("scenario in catalog");

    let mut runner = SuiteRunner::new(config).await.expect("create runner");
    runner.prepare().await.expect("application and browser ready");

    let result = runner.run_scenario(scenario).await;
    assert!(
        result.success,
        "{} failed:\n{}",
        result.name,
        result.failure_summary()
    );
}
