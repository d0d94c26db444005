//! Run Command

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use travelpay_common::SuiteConfig;
use travelpay_e2e::{ScenarioResult, SuiteRunner};

use crate::output::{print_error, print_info, print_list, print_success, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct RunArgs {
    /// Only scenarios with this tag
    #[arg(long)]
    tag: Option<String>,

    /// Run a single scenario
    #[arg(long)]
    id: Option<String>,
}

/// Scenario result row
#[derive(Serialize)]
pub struct ResultDisplay {
    pub id: String,
    pub success: bool,
    pub duration_ms: u64,
    pub failures: String,
}

impl From<&ScenarioResult> for ResultDisplay {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            id: result.id.clone(),
            success: result.success,
            duration_ms: result.duration_ms,
            failures: result.failure_summary(),
        }
    }
}

impl TableDisplay for ResultDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Scenario", "Result", "Duration", "Failures"]
    }

    fn row(&self) -> Vec<String> {
        let status = if self.success {
            "PASS".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        vec![
            self.id.clone(),
            status,
            format!("{} ms", self.duration_ms),
            self.failures.clone(),
        ]
    }
}

pub async fn execute(args: RunArgs, config: SuiteConfig, format: OutputFormat) -> Result<bool> {
    let scenarios = super::select(&config, args.tag.as_deref(), args.id.as_deref())?;
    if scenarios.is_empty() {
        print_info("No scenarios selected");
        return Ok(true);
    }

    let mut runner = SuiteRunner::new(config).await?;
    let suite = runner.run_scenarios(&scenarios).await?;
    let report = runner.write_results(&suite)?;
    runner.shutdown()?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<ResultDisplay> = suite.results.iter().map(ResultDisplay::from).collect();
            print_list(&rows, format);

            let summary = format!(
                "{} passed, {} failed in {} ms (report: {})",
                suite.passed,
                suite.failed,
                suite.duration_ms,
                report.display()
            );
            if suite.success() {
                print_success(&summary);
            } else {
                print_error(&summary);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&suite)?);
        }
    }

    Ok(suite.success())
}
