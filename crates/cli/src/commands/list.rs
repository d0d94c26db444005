//! List Command

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use travelpay_common::SuiteConfig;
use travelpay_e2e::{Expectation, Scenario};

use crate::output::{print_list, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct ListArgs {
    /// Only scenarios with this tag
    #[arg(long)]
    tag: Option<String>,
}

/// Scenario display wrapper for serialization
#[derive(Serialize)]
pub struct ScenarioDisplay {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub expect: String,
    pub tags: Vec<String>,
}

impl From<&Scenario> for ScenarioDisplay {
    fn from(scenario: &Scenario) -> Self {
        let expect = match &scenario.expectation {
            Expectation::Approved => "approved".to_string(),
            Expectation::Declined => "declined".to_string(),
            Expectation::Rejected => "rejected".to_string(),
            Expectation::FieldMessages(messages) => messages
                .iter()
                .map(|m| m.field.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        };

        Self {
            id: scenario.id.clone(),
            kind: scenario.kind.to_string(),
            name: scenario.name.clone(),
            expect,
            tags: scenario.tags.clone(),
        }
    }
}

impl TableDisplay for ScenarioDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Kind", "Name", "Expect", "Tags"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.kind.clone(),
            self.name.clone(),
            self.expect.clone(),
            self.tags.join(","),
        ]
    }
}

pub fn execute(args: ListArgs, config: &SuiteConfig, format: OutputFormat) -> Result<bool> {
    let scenarios = super::select(config, args.tag.as_deref(), None)?;
    let displays: Vec<ScenarioDisplay> = scenarios.iter().map(ScenarioDisplay::from).collect();
    print_list(&displays, format);
    Ok(true)
}
