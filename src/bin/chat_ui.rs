use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use airline_chatbot::config::UiConfig;
use airline_chatbot::ui::{self, HttpChatBackend, UiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = UiConfig::from_env()?;
    tracing::info!(backend = %config.backend_url, "chat UI forwarding to backend");

    let state = Arc::new(UiState::new(Box::new(HttpChatBackend::new(
        config.backend_url.clone(),
    ))));
    let app = ui::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting chat UI on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
