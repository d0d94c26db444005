//! TravelPay E2E Test Framework
//!
//! This crate drives the tour purchase page of the application under test:
//! - Launches the application as a subprocess (or waits for a running one)
//! - Controls Playwright through a generated Node script and JSON events
//! - Describes debit and credit purchase scenarios, built in or from YAML
//! - Verifies payment, credit request and order records after each scenario
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SuiteRunner (Rust)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  prepare()          -> AppHandle | wait_until_reachable     │
//! │  run_scenario(s)    -> ScenarioResult                       │
//! │    ├── Scenario::page()     -> TravelPurchasePage (steps)   │
//! │    ├── PlaywrightHandle::run -> captures + soft checks      │
//! │    ├── RecordSnapshot::read  -> evaluate_records()          │
//! │    └── SqlHelper::clean_database()                          │
//! │  write_results()    -> test-results.json                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod check;
pub mod error;
pub mod launcher;
pub mod page;
pub mod playwright;
pub mod runner;
pub mod scenario;

pub use check::{CheckResult, RecordSnapshot};
pub use error::{E2eError, E2eResult};
pub use page::{Field, TravelPurchasePage};
pub use runner::{ScenarioResult, SuiteResult, SuiteRunner};
pub use scenario::{Expectation, Scenario};
