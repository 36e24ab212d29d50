//! Health monitor for a running chatbot backend and chat UI.
//!
//! Runs a fixed battery of checks (backend and UI reachability, sample
//! chats, host resources, vector store presence and response latency) and
//! writes each outcome to the monitor log. The monitor only observes.

pub mod checks;
pub mod log;
pub mod resources;

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::db::STORE_FILE;

pub use checks::{CheckResult, HealthReport};
pub use log::{Level, MonitorLog};
pub use resources::{ResourceSample, ResourceThresholds};

pub const SAMPLE_MESSAGES: &[&str] = &[
    "Hello",
    "Do you allow pets on flights?",
    "I want to book a flight",
    "Check my flight status",
];

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const CHAT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub backend_url: String,
    pub ui_url: String,
    pub interval: Duration,
    pub log_file: PathBuf,
    pub store_dir: PathBuf,
    pub min_store_bytes: u64,
    pub min_success_rate: f64,
    pub max_response_ms: u128,
    pub thresholds: ResourceThresholds,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            ui_url: "http://localhost:8501".to_string(),
            interval: Duration::from_secs(60),
            log_file: PathBuf::from("monitoring.log"),
            store_dir: PathBuf::from("data/vector_store"),
            min_store_bytes: 16 * 1024,
            min_success_rate: 80.0,
            max_response_ms: 5000,
            thresholds: ResourceThresholds::default(),
        }
    }
}

#[derive(Deserialize)]
struct ChatBody {
    #[serde(default)]
    response: Option<String>,
}

pub struct Monitor {
    config: MonitorConfig,
    client: reqwest::Client,
    log: MonitorLog,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Self {
        let log = MonitorLog::new(config.log_file.clone());
        Self {
            config,
            client: reqwest::Client::new(),
            log,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn log(&self) -> &MonitorLog {
        &self.log
    }

    pub async fn check_backend_health(&self) -> bool {
        let url = format!("{}/health", self.config.backend_url);
        self.check_reachable(&url, "Backend").await
    }

    pub async fn check_ui_health(&self) -> bool {
        self.check_reachable(&self.config.ui_url, "UI").await
    }

    async fn check_reachable(&self, url: &str, label: &str) -> bool {
        match self.client.get(url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(res) if res.status().is_success() => {
                self.log.info(&format!("{label} health check: PASSED"));
                true
            }
            Ok(res) => {
                self.log.error(&format!(
                    "{label} health check: FAILED (Status: {})",
                    res.status().as_u16()
                ));
                false
            }
            Err(e) => {
                self.log.error(&format!("{label} health check: FAILED ({e})"));
                false
            }
        }
    }

    /// Sends each sample message and passes when the success rate meets the floor.
    pub async fn test_chatbot_functionality(&self) -> bool {
        let mut results = Vec::with_capacity(SAMPLE_MESSAGES.len());
        for message in SAMPLE_MESSAGES {
            let ok = match self.post_chat(message).await {
                Ok(res) if res.status().is_success() => match res.json::<ChatBody>().await {
                    Ok(ChatBody { response: Some(text) }) if !text.is_empty() => {
                        self.log.info(&format!("Chat test '{message}': PASSED"));
                        true
                    }
                    Ok(_) => {
                        self.log.error(&format!("Chat test '{message}': FAILED (No response)"));
                        false
                    }
                    Err(e) => {
                        self.log.error(&format!("Chat test '{message}': FAILED ({e})"));
                        false
                    }
                },
                Ok(res) => {
                    self.log.error(&format!(
                        "Chat test '{message}': FAILED (Status: {})",
                        res.status().as_u16()
                    ));
                    false
                }
                Err(e) => {
                    self.log.error(&format!("Chat test '{message}': FAILED ({e})"));
                    false
                }
            };
            results.push(ok);
        }

        let rate = checks::success_rate(&results);
        self.log
            .info(&format!("Chatbot functionality: {rate:.1}% success rate"));
        rate >= self.config.min_success_rate
    }

    pub async fn check_system_resources(&self) -> bool {
        let sample = match tokio::task::spawn_blocking(ResourceSample::collect).await {
            Ok(sample) => sample,
            Err(e) => {
                self.log.error(&format!("System resource check failed: {e}"));
                return false;
            }
        };

        self.log.info(&format!(
            "System resources - CPU: {:.1}%, Memory: {:.1}%, Disk: {:.1}%",
            sample.cpu_percent, sample.memory_percent, sample.disk_percent
        ));

        let breaches = sample.breaches(&self.config.thresholds);
        for breach in &breaches {
            self.log.warning(breach);
        }
        breaches.is_empty()
    }

    pub fn check_vector_store(&self) -> bool {
        let dir = &self.config.store_dir;
        if !dir.is_dir() {
            self.log.error(&format!("Vector store directory not found: {}", dir.display()));
            return false;
        }
        if !dir.join(STORE_FILE).is_file() {
            self.log.error(&format!("Vector store file missing: {STORE_FILE}"));
            return false;
        }

        let size = resources::directory_size(dir);
        self.log.info(&format!(
            "Vector store size: {:.2} MB",
            size as f64 / (1024.0 * 1024.0)
        ));
        if size < self.config.min_store_bytes {
            self.log.warning("Vector store size seems too small");
            return false;
        }

        self.log.info("Vector store health check: PASSED");
        true
    }

    pub async fn measure_response_time(&self) -> bool {
        let started = Instant::now();
        match self.post_chat("Hello").await {
            Ok(res) if res.status().is_success() => {
                let elapsed = started.elapsed();
                self.log.info(&format!(
                    "Response time: {:.2}ms",
                    elapsed.as_secs_f64() * 1000.0
                ));
                elapsed.as_millis() < self.config.max_response_ms
            }
            Ok(res) => {
                self.log.error(&format!(
                    "Response time test failed (Status: {})",
                    res.status().as_u16()
                ));
                false
            }
            Err(e) => {
                self.log.error(&format!("Response time test failed: {e}"));
                false
            }
        }
    }

    pub async fn run_full_check(&self) -> HealthReport {
        self.log.info("Starting full health check...");

        let checks = vec![
            outcome("backend_health", self.check_backend_health().await),
            outcome("ui_health", self.check_ui_health().await),
            outcome("chatbot_functionality", self.test_chatbot_functionality().await),
            outcome("system_resources", self.check_system_resources().await),
            outcome("vector_store", self.check_vector_store()),
            outcome("response_time", self.measure_response_time().await),
        ];
        let report = HealthReport { checks };

        self.log.info(&report.summary());
        if report.all_passed() {
            self.log.success("All systems operational");
        } else {
            self.log.warning("Some systems have issues");
        }
        report
    }

    /// Runs a full check every interval until `shutdown` resolves.
    pub async fn run_continuous<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let seconds = self.config.interval.as_secs();
        self.log
            .info(&format!("Starting continuous monitoring (interval: {seconds}s)"));

        let mut ticker = tokio::time::interval(self.config.interval);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_full_check().await;
                    self.log.info(&format!("Waiting {seconds} seconds before next check..."));
                }
                _ = &mut shutdown => {
                    self.log.info("Monitoring stopped by user");
                    break;
                }
            }
        }
    }

    async fn post_chat(&self, message: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}/chat", self.config.backend_url))
            .form(&[("message", message)])
            .timeout(CHAT_TIMEOUT)
            .send()
            .await
    }
}

fn outcome(name: &'static str, passed: bool) -> CheckResult {
    if passed {
        CheckResult::pass(name, "passed")
    } else {
        CheckResult::fail(name, "failed, see log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor_in(dir: &std::path::Path) -> Monitor {
        Monitor::new(MonitorConfig {
            log_file: dir.join("monitoring.log"),
            store_dir: dir.join("store"),
            ..MonitorConfig::default()
        })
    }

    #[test]
    fn test_vector_store_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor_in(dir.path());
        assert!(!monitor.check_vector_store());

        let log = std::fs::read_to_string(dir.path().join("monitoring.log")).unwrap();
        assert!(log.contains("[ERROR] Vector store directory not found"));
    }

    #[test]
    fn test_vector_store_size_floor() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store");
        std::fs::create_dir(&store).unwrap();
        std::fs::write(store.join(STORE_FILE), vec![0u8; 1024]).unwrap();

        let monitor = monitor_in(dir.path());
        assert!(!monitor.check_vector_store());

        std::fs::write(store.join(STORE_FILE), vec![0u8; 32 * 1024]).unwrap();
        assert!(monitor.check_vector_store());

        let log = std::fs::read_to_string(dir.path().join("monitoring.log")).unwrap();
        assert!(log.contains("[WARNING] Vector store size seems too small"));
        assert!(log.contains("[INFO] Vector store health check: PASSED"));
    }
}
