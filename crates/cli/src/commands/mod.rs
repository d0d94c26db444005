//! CLI Commands

pub mod check;
pub mod clean;
pub mod list;
pub mod run;

use anyhow::Result;
use tracing::debug;
use travelpay_common::SuiteConfig;
use travelpay_e2e::scenario::{filter_by_tag, find, load_all};
use travelpay_e2e::Scenario;

/// Scenarios selected by id or tag; all of them when neither is given
pub fn select(config: &SuiteConfig, tag: Option<&str>, id: Option<&str>) -> Result<Vec<Scenario>> {
    let scenarios = load_all(config)?;
    debug!("Loaded {} scenario(s)", scenarios.len());

    if let Some(id) = id {
        return Ok(vec![find(&scenarios, id)?.clone()]);
    }
    let selected: Vec<Scenario> = match tag {
        Some(tag) => filter_by_tag(&scenarios, tag).into_iter().cloned().collect(),
        None => scenarios,
    };
    debug!("Selected {} scenario(s) (tag: {:?})", selected.len(), tag);
    Ok(selected)
}
