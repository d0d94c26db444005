//! Scenario files and result reports, without a browser

use std::fs;

use tempfile::TempDir;
use travelpay_common::{PurchaseKind, SuiteConfig};
use travelpay_e2e::scenario::{filter_by_tag, find, load_all};
use travelpay_e2e::{Expectation, SuiteRunner};

const FAR_EXPIRY: &str = r#"
id: debit-far-expiry
name: Debit card payment expiring in five years
kind: debit
tags: [debit, extra]
card: APPROVED
month: { input: month_plus, months: 0 }
year: { input: year_plus, years: 5 }
owner: { input: holder }
cvc: { input: cvc, digits: 3 }
expect: approved
"#;

const LITERAL_OWNER: &str = r#"
id: credit-hyphen-owner
name: Credit payment with a hyphenated owner
kind: credit
tags: [credit, extra]
card: APPROVED
month: { input: month_plus, months: 1 }
year: { input: year_plus, years: 1 }
owner: { input: literal, value: "ANNA-MARIA PETROVA" }
cvc: { input: cvc, digits: 3 }
expect: approved
"#;

fn config_with_scenarios(dir: &TempDir) -> SuiteConfig {
    let scenarios_dir = dir.path().join("scenarios");
    fs::create_dir_all(scenarios_dir.join("credit")).unwrap();
    fs::write(scenarios_dir.join("far-expiry.yaml"), FAR_EXPIRY).unwrap();
    fs::write(scenarios_dir.join("credit/hyphen-owner.yml"), LITERAL_OWNER).unwrap();
    fs::write(scenarios_dir.join("README.txt"), "not a scenario").unwrap();

    SuiteConfig {
        output_dir: dir.path().join("results"),
        scenarios_dir: Some(scenarios_dir),
        ..Default::default()
    }
}

#[test]
fn yaml_scenarios_extend_the_catalog() {
    let dir = TempDir::new().unwrap();
    let config = config_with_scenarios(&dir);

    let scenarios = load_all(&config).unwrap();
    assert_eq!(scenarios.len(), 38);

    let extra = filter_by_tag(&scenarios, "extra");
    assert_eq!(extra.len(), 2);

    let hyphen = find(&scenarios, "credit-hyphen-owner").unwrap();
    assert_eq!(hyphen.kind, PurchaseKind::Credit);
    assert_eq!(hyphen.expectation, Expectation::Approved);
    assert_eq!(hyphen.owner.resolve().as_deref(), Some("ANNA-MARIA PETROVA"));
}

#[test]
fn broken_yaml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let config = config_with_scenarios(&dir);
    let scenarios_dir = config.scenarios_dir.clone().unwrap();
    fs::write(scenarios_dir.join("broken.yaml"), "id: [unterminated").unwrap();

    let err = load_all(&config).unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}

#[tokio::test]
async fn runner_writes_empty_report() {
    let dir = TempDir::new().unwrap();
    let mut config = config_with_scenarios(&dir);
    config.db.url = "sqlite::memory:".to_string();
    config.db.max_connections = 1;

    let runner = SuiteRunner::new(config).await.unwrap();
    assert!(dir.path().join("results/screenshots").is_dir());

    let report = serde_json::json!({
        "started_at": "2026-01-01T00:00:00Z",
        "total": 0,
        "passed": 0,
        "failed": 0,
        "duration_ms": 0,
        "results": []
    });
    let suite = serde_json::from_value(report).unwrap();
    let path = runner.write_results(&suite).unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written["total"], 0);
    assert!(written["results"].as_array().unwrap().is_empty());
}
