//! Playwright browser automation
//!
//! Steps are compiled into a standalone Node script that drives one browser
//! session. The script reports back on stdout with one JSON event per line,
//! each prefixed with [`EVENT_MARKER`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use travelpay_common::config::BrowserConfig;

use crate::check::CheckResult;
use crate::error::{E2eError, E2eResult};

/// Prefix of every event line printed by a generated script
pub const EVENT_MARKER: &str = "@@travelpay ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(E2eError::Playwright(format!("unsupported browser: {}", other))),
        }
    }
}

/// A single browser action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to an absolute URL
    Open { url: String },

    /// Click the first matching element
    Click { selector: String },

    /// Replace an input's value in one go
    Fill { selector: String, value: String },

    /// Type key by key, for inputs behind an input mask
    Type { selector: String, text: String },

    /// Read the inner text of the first matching element
    Capture { name: String, selector: String },

    /// Soft check: an element containing `text` becomes visible
    ExpectText {
        check: String,
        selector: String,
        text: String,
        timeout_ms: u64,
    },
}

impl Step {
    /// Short description used in logs and script comments
    pub fn describe(&self) -> String {
        match self {
            Step::Open { url } => format!("open:{}", url),
            Step::Click { selector } => format!("click:{}", selector),
            Step::Fill { selector, .. } => format!("fill:{}", selector),
            Step::Type { selector, .. } => format!("type:{}", selector),
            Step::Capture { name, .. } => format!("capture:{}", name),
            Step::ExpectText { check, .. } => format!("expect:{}", check),
        }
    }
}

/// Event printed by a generated script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Capture {
        name: String,
        value: String,
    },
    Check {
        name: String,
        ok: bool,
        #[serde(default)]
        error: Option<String>,
    },
    Done,
    Failed {
        error: String,
    },
}

/// What a completed script observed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptOutcome {
    pub captures: BTreeMap<String, String>,
    pub checks: Vec<CheckResult>,
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Timeout for clicks, fills and captures
    pub action_timeout_ms: u64,
    /// Upper bound for a whole script run
    pub script_timeout: Duration,
    pub screenshot_dir: PathBuf,
    pub node_path: Option<PathBuf>,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout_ms: 5_000,
            script_timeout: Duration::from_secs(180),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            node_path: None,
        }
    }
}

impl PlaywrightConfig {
    pub fn from_browser(browser: &BrowserConfig, screenshot_dir: PathBuf) -> E2eResult<Self> {
        Ok(Self {
            browser: browser.kind.parse()?,
            headless: browser.headless,
            viewport_width: browser.viewport_width,
            viewport_height: browser.viewport_height,
            screenshot_dir,
            node_path: browser.node_path.clone(),
            ..Default::default()
        })
    }
}

/// Playwright browser handle
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlaywrightConfig {
        &self.config
    }

    /// Check that node can load the playwright package
    pub async fn ensure_installed(&self) -> E2eResult<()> {
        let mut cmd = Command::new("node");
        cmd.args(["-e", "require('playwright')"])
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(node_path) = &self.config.node_path {
            cmd.env("NODE_PATH", node_path);
        }

        match cmd.status().await {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the Node script for a set of steps
    ///
    /// `screenshot` names the full-page screenshot taken on a hard failure.
    pub fn build_script(&self, steps: &[Step], screenshot: &str) -> String {
        let screenshot_path = self.config.screenshot_dir.join(format!("{}.png", screenshot));
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

const emit = (event) => console.log({marker} + JSON.stringify(event));

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultTimeout({timeout});

  try {{
"#,
            marker = js(EVENT_MARKER),
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            timeout = self.config.action_timeout_ms,
        ));

        for (i, step) in steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.describe().replace('\n', " ")));
            script.push_str(&step_to_js(step));
            script.push('\n');
        }

        script.push_str(&format!(
            r#"
    emit({{ event: 'done' }});
  }} catch (error) {{
    await page.screenshot({{ path: {path}, fullPage: true }}).catch(() => {{}});
    emit({{ event: 'failed', error: error.message }});
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            path = js(&screenshot_path.to_string_lossy()),
        ));

        script
    }

    /// Run steps in a fresh browser session
    pub async fn run(&self, steps: &[Step], screenshot: &str) -> E2eResult<ScriptOutcome> {
        let script = self.build_script(steps, screenshot);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {} ({} steps)", script_path.display(), steps.len());

        let mut cmd = Command::new("node");
        cmd.arg(&script_path)
            .current_dir(temp_dir.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(node_path) = &self.config.node_path {
            cmd.env("NODE_PATH", node_path);
        }

        let output = tokio::time::timeout(self.config.script_timeout, cmd.output())
            .await
            .map_err(|_| E2eError::Timeout(format!("browser script ({})", screenshot)))??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("Playwright stderr: {}", stderr.trim());
        }

        match parse_output(&stdout) {
            Err(E2eError::Playwright(reason)) if !output.status.success() && !stderr.trim().is_empty() => {
                warn!("Browser script exited with {}", output.status);
                Err(E2eError::Playwright(format!("{}\nstderr: {}", reason, stderr.trim())))
            }
            result => result,
        }
    }
}

/// Convert a step to JavaScript code
fn step_to_js(step: &Step) -> String {
    match step {
        Step::Open { url } => format!("    await page.goto({});", js(url)),
        Step::Click { selector } => {
            format!("    await page.locator({}).first().click();", js(selector))
        }
        Step::Fill { selector, value } => {
            format!("    await page.locator({}).first().fill({});", js(selector), js(value))
        }
        Step::Type { selector, text } => format!(
            "    await page.locator({sel}).first().click();\n    await page.keyboard.type({text}, {{ delay: 20 }});",
            sel = js(selector),
            text = js(text),
        ),
        Step::Capture { name, selector } => format!(
            "    emit({{ event: 'capture', name: {name}, value: await page.locator({sel}).first().innerText() }});",
            name = js(name),
            sel = js(selector),
        ),
        Step::ExpectText {
            check,
            selector,
            text,
            timeout_ms,
        } => soft_check(
            check,
            &format!(
                "page.locator({}).filter({{ hasText: {} }}).first().waitFor({{ state: 'visible', timeout: {} }})",
                js(selector),
                js(text),
                timeout_ms
            ),
        ),
    }
}

fn soft_check(check: &str, wait: &str) -> String {
    format!(
        r#"    try {{
      await {wait};
      emit({{ event: 'check', name: {name}, ok: true }});
    }} catch (error) {{
      emit({{ event: 'check', name: {name}, ok: false, error: error.message }});
    }}"#,
        wait = wait,
        name = js(check),
    )
}

/// JavaScript string literal
fn js(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Collect the events printed by a script run
pub fn parse_output(stdout: &str) -> E2eResult<ScriptOutcome> {
    let mut outcome = ScriptOutcome::default();
    let mut done = false;

    for line in stdout.lines() {
        let Some(payload) = line.trim_start().strip_prefix(EVENT_MARKER) else {
            continue;
        };

        match serde_json::from_str::<ScriptEvent>(payload)? {
            ScriptEvent::Capture { name, value } => {
                outcome.captures.insert(name, value);
            }
            ScriptEvent::Check { name, ok, error } => {
                outcome.checks.push(if ok {
                    CheckResult::pass(name)
                } else {
                    let detail = error.unwrap_or_else(|| "check failed".to_string());
                    CheckResult::fail(name, first_line(&detail))
                });
            }
            ScriptEvent::Done => done = true,
            ScriptEvent::Failed { error } => return Err(E2eError::Playwright(error)),
        }
    }

    if done {
        Ok(outcome)
    } else {
        Err(E2eError::Playwright("browser script ended before completing".to_string()))
    }
}

/// Playwright errors carry a multi-line call log; the headline is enough
fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> PlaywrightHandle {
        PlaywrightHandle {
            config: PlaywrightConfig {
                screenshot_dir: PathBuf::from("/tmp/shots"),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_browser_parse() {
        assert_eq!("Firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert_eq!("chrome".parse::<Browser>().unwrap(), Browser::Chromium);
        assert!("lynx".parse::<Browser>().is_err());
    }

    #[test]
    fn test_script_escapes_literals() {
        let steps = vec![
            Step::Open { url: "http://localhost:8080".to_string() },
            Step::Fill {
                selector: r#".input:has(.input__top:text-is("Владелец")) input"#.to_string(),
                value: "O'BRIEN \"JR\"".to_string(),
            },
        ];
        let script = handle().build_script(&steps, "debit-approved");

        assert!(script.contains(r#"await page.goto("http://localhost:8080");"#));
        assert!(script.contains(r#"page.locator(".input:has(.input__top:text-is(\"Владелец\")) input")"#));
        assert!(script.contains(r#".fill("O'BRIEN \"JR\"")"#));
        assert!(script.contains(r#"path: "/tmp/shots/debit-approved.png""#));
        assert!(script.contains("chromium.launch({ headless: true })"));
    }

    #[test]
    fn test_expect_steps_are_soft() {
        let step = Step::ExpectText {
            check: "message:month".to_string(),
            selector: ".input__sub".to_string(),
            text: "Неверный формат".to_string(),
            timeout_ms: 15000,
        };
        let js = step_to_js(&step);
        assert!(js.contains("try {"));
        assert!(js.contains(r#"filter({ hasText: "Неверный формат" })"#));
        assert!(js.contains("timeout: 15000"));
        assert!(js.contains(r#"ok: false, error: error.message"#));
    }

    #[test]
    fn test_parse_output_collects_events() {
        let stdout = format!(
            "noise\n{m}{{\"event\":\"capture\",\"name\":\"price\",\"value\":\"Всего 45 000 руб.\"}}\n\
             {m}{{\"event\":\"check\",\"name\":\"notification_ok\",\"ok\":true}}\n\
             {m}{{\"event\":\"check\",\"name\":\"message:cvc\",\"ok\":false,\"error\":\"Timeout 15000ms exceeded.\\n=== logs ===\"}}\n\
             {m}{{\"event\":\"done\"}}\n",
            m = EVENT_MARKER
        );
        let outcome = parse_output(&stdout).unwrap();
        assert_eq!(outcome.captures.get("price").map(String::as_str), Some("Всего 45 000 руб."));
        assert_eq!(outcome.checks.len(), 2);
        assert!(outcome.checks[0].passed);
        assert_eq!(outcome.checks[1].detail.as_deref(), Some("Timeout 15000ms exceeded."));
    }

    #[test]
    fn test_parse_output_failed_script() {
        let stdout = format!("{}{{\"event\":\"failed\",\"error\":\"locator.click: Timeout\"}}\n", EVENT_MARKER);
        let err = parse_output(&stdout).unwrap_err();
        assert!(matches!(err, E2eError::Playwright(ref e) if e == "locator.click: Timeout"));
    }

    #[test]
    fn test_parse_output_requires_done() {
        assert!(matches!(parse_output("").unwrap_err(), E2eError::Playwright(_)));
    }
}
