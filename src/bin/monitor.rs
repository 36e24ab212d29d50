use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use airline_chatbot::monitor::{Monitor, MonitorConfig};

/// Health monitor for the airline chatbot backend and chat UI
#[derive(Parser, Debug)]
#[command(name = "monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct MonitorArgs {
    /// Backend base URL
    #[arg(long, env = "MONITOR_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    backend: String,

    /// Chat UI URL
    #[arg(
        long,
        alias = "frontend",
        env = "MONITOR_UI_URL",
        default_value = "http://localhost:8501"
    )]
    ui: String,

    /// Seconds between checks in continuous mode
    #[arg(long, env = "MONITOR_INTERVAL", default_value_t = 60)]
    interval: u64,

    /// Run one full check and exit
    #[arg(long, env = "MONITOR_ONCE")]
    once: bool,

    /// File the check results are appended to
    #[arg(long, env = "MONITOR_LOG_FILE", default_value = "monitoring.log")]
    log_file: PathBuf,

    /// Vector store directory to inspect
    #[arg(long, env = "MONITOR_STORE_DIR", default_value = "data/vector_store")]
    store_dir: PathBuf,
}

impl MonitorArgs {
    fn into_config(self) -> MonitorConfig {
        MonitorConfig {
            backend_url: self.backend.trim_end_matches('/').to_string(),
            ui_url: self.ui,
            interval: Duration::from_secs(self.interval.max(1)),
            log_file: self.log_file,
            store_dir: self.store_dir,
            ..MonitorConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Lines already carry their own timestamp and level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .without_time()
        .with_level(false)
        .with_target(false)
        .init();

    let args = MonitorArgs::parse();
    let once = args.once;
    let monitor = Monitor::new(args.into_config());

    if once {
        monitor.run_full_check().await;
    } else {
        monitor.run_continuous(ctrl_c()).await;
    }

    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
