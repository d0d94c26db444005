//! Application launcher - spawning the app under test and waiting for it

use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

use travelpay_common::config::{AppConfig, DatabaseConfig};

use crate::error::{E2eError, E2eResult};

/// Time the application gets to exit after SIGTERM
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Handle to a running application process
pub struct AppHandle {
    child: Child,
    pub base_url: String,
}

impl AppHandle {
    /// Spawn the application and wait until its page answers
    pub async fn spawn(app: &AppConfig, db: &DatabaseConfig, log_dir: &Path) -> E2eResult<Self> {
        let (program, args) = app
            .command
            .split_first()
            .ok_or_else(|| E2eError::AppStartup("empty app command".to_string()))?;

        std::fs::create_dir_all(log_dir)?;
        let log_path = log_dir.join("app.log");
        let log = File::create(&log_path)?;

        info!("Spawning application: {} (log: {})", app.command.join(" "), log_path.display());

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log.try_clone()?))
            .stderr(Stdio::from(log));

        for (key, value) in datasource_env(db) {
            cmd.env(key, value);
        }

        let child = cmd
            .spawn()
            .map_err(|e| E2eError::AppStartup(format!("Failed to spawn {}: {}", program, e)))?;

        let handle = AppHandle {
            child,
            base_url: app.url.clone(),
        };

        wait_until_reachable(&handle.base_url, Duration::from_secs(app.startup_timeout_secs)).await?;

        info!("Application is up at {}", handle.base_url);
        Ok(handle)
    }

    /// Get the base URL for this application
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the application
    pub fn stop(&mut self) -> E2eResult<()> {
        if let Ok(Some(_)) = self.child.try_wait() {
            return Ok(());
        }

        info!("Stopping application (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() && self.wait_exit(STOP_GRACE) {
                return Ok(());
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl AppHandle {
    /// Poll for exit for at most `grace`
    fn wait_exit(&mut self, grace: Duration) -> bool {
        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if let Ok(Some(_)) = self.child.try_wait() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }
}

impl Drop for AppHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Spring datasource settings for the launched application
///
/// Credentials always travel as separate variables, never inside the URL.
pub fn datasource_env(db: &DatabaseConfig) -> Vec<(&'static str, String)> {
    let mut env = Vec::new();
    if let Some(url) = jdbc_url(&db.url_without_credentials()) {
        env.push(("SPRING_DATASOURCE_URL", url));
    }
    let (user, password) = db.credentials();
    if let Some(user) = user {
        env.push(("SPRING_DATASOURCE_USERNAME", user));
    }
    if let Some(password) = password {
        env.push(("SPRING_DATASOURCE_PASSWORD", password));
    }
    env
}

/// JDBC form of a MySQL or PostgreSQL URL
fn jdbc_url(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let scheme = match scheme {
        "postgres" | "postgresql" => "postgresql",
        "mysql" => "mysql",
        "mariadb" => "mariadb",
        _ => return None,
    };
    Some(format!("jdbc:{}://{}", scheme, rest))
}

/// Poll `url` until it answers with a success status
pub async fn wait_until_reachable(url: &str, timeout: Duration) -> E2eResult<usize> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => {
                return Ok(attempts);
            }
            Ok(resp) => {
                warn!("Application returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for application at {}...", url);
                }
                // Connection refused is expected while the app is starting
                if !e.is_connect() && !e.is_timeout() {
                    warn!("Reachability check error: {}", e);
                }
            }
        }

        sleep(Duration::from_millis(250)).await;
    }

    Err(E2eError::AppUnreachable {
        url: url.to_string(),
        attempts,
    })
}
