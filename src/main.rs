use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use airline_chatbot::config::AppConfig;
use airline_chatbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        fallback_order = config.fallback_order.as_str(),
        embedder = config.embedder.as_str(),
        seeded = config.rng_seed.is_some(),
        "configuration loaded"
    );

    let state = Arc::new(AppState::build(config.clone())?);
    let app = airline_chatbot::app(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(state) {
        Ok(state) => state.shutdown()?,
        Err(_) => tracing::warn!("application state still shared, vector store left to drop"),
    }
    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
