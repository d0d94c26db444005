//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Application failed to start: {0}")]
    AppStartup(String),

    #[error("Application at {url} not reachable after {attempts} attempts")]
    AppUnreachable { url: String, attempts: usize },

    #[error("Playwright not found. Install with: npm i playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error(transparent)]
    Common(#[from] travelpay_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
