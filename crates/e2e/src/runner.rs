//! Suite runner: plays scenarios in the browser, checks the database, cleans up

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use travelpay_common::{PurchaseKind, SqlHelper, SuiteConfig};

use crate::check::{evaluate_records, needs_records, CheckResult, RecordSnapshot};
use crate::error::E2eResult;
use crate::launcher::{wait_until_reachable, AppHandle};
use crate::playwright::{PlaywrightConfig, PlaywrightHandle};
use crate::scenario::Scenario;

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub id: String,
    pub name: String,
    pub kind: PurchaseKind,
    pub success: bool,
    pub duration_ms: u64,
    pub checks: Vec<CheckResult>,
    pub error: Option<String>,
}

impl ScenarioResult {
    /// Failed checks and the infrastructure error, one per line
    pub fn failure_summary(&self) -> String {
        let mut lines: Vec<String> = self
            .checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("{}: {}", c.name, c.detail.as_deref().unwrap_or("failed")))
            .collect();
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        lines.join("\n")
    }
}

/// Result of running a set of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    fn from_results(started_at: DateTime<Utc>, duration: Duration, results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            started_at,
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms: duration.as_millis() as u64,
            results,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Main E2E suite runner
pub struct SuiteRunner {
    config: SuiteConfig,
    sql: SqlHelper,
    playwright: PlaywrightHandle,
    app: Option<AppHandle>,
}

impl SuiteRunner {
    /// Connect to the database and set up the browser driver
    pub async fn new(config: SuiteConfig) -> E2eResult<Self> {
        let sql = SqlHelper::connect(&config.db).await?;
        let playwright = PlaywrightHandle::new(PlaywrightConfig::from_browser(
            &config.browser,
            config.screenshot_dir(),
        )?)?;

        Ok(Self {
            config,
            sql,
            playwright,
            app: None,
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn sql(&self) -> &SqlHelper {
        &self.sql
    }

    /// Make sure the browser tooling and the application are available
    pub async fn prepare(&mut self) -> E2eResult<()> {
        self.playwright.ensure_installed().await?;

        if self.config.app.launch {
            if self.app.is_none() {
                let app = AppHandle::spawn(&self.config.app, &self.config.db, &self.config.output_dir).await?;
                self.app = Some(app);
            }
        } else {
            let timeout = Duration::from_secs(self.config.app.startup_timeout_secs);
            wait_until_reachable(&self.config.app.url, timeout).await?;
        }
        Ok(())
    }

    /// Stop the application if this runner launched it
    pub fn shutdown(&mut self) -> E2eResult<()> {
        if let Some(mut app) = self.app.take() {
            app.stop()?;
        }
        Ok(())
    }

    /// Run scenarios one after another
    pub async fn run_scenarios(&mut self, scenarios: &[Scenario]) -> E2eResult<SuiteResult> {
        let started_at = Utc::now();
        let start = Instant::now();

        self.prepare().await?;

        info!("Running {} scenario(s)...", scenarios.len());

        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_scenario(scenario).await;
            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!("✗ {}\n{}", result.name, result.failure_summary());
            }
            results.push(result);
        }

        let suite = SuiteResult::from_results(started_at, start.elapsed(), results);
        info!(
            "Results: {} passed, {} failed ({} ms)",
            suite.passed, suite.failed, suite.duration_ms
        );
        Ok(suite)
    }

    /// Run one scenario and always clean the database afterwards
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioResult {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.id);

        let (mut checks, mut error) = match self.execute(scenario).await {
            Ok(checks) => (checks, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        if let Err(e) = self.sql.clean_database().await {
            warn!("Cleanup after {} failed: {}", scenario.id, e);
            checks.push(CheckResult::fail("cleanup", e.to_string()));
            error.get_or_insert_with(|| "database cleanup failed".to_string());
        }

        let success = error.is_none() && checks.iter().all(|c| c.passed);
        ScenarioResult {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            kind: scenario.kind,
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            checks,
            error,
        }
    }

    async fn execute(&self, scenario: &Scenario) -> E2eResult<Vec<CheckResult>> {
        let page = scenario.page(&self.config);
        let outcome = page.run(&self.playwright, &scenario.id).await?;

        let mut checks = outcome.checks().to_vec();
        if needs_records(&scenario.expectation) {
            let records = RecordSnapshot::read(&self.sql).await?;
            debug!("Records after {}: {:?}", scenario.id, records);
            checks.extend(evaluate_records(
                scenario.kind,
                &scenario.expectation,
                &records,
                outcome.price_in_kops(),
            ));
        }
        Ok(checks)
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Drop for SuiteRunner {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
