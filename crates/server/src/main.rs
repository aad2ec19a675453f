//! Pharma Assistant Server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharma_assist_agent::{HistoryStore, JsonFileBackend};
use pharma_assist_config::{load_settings, Settings};
use pharma_assist_core::{GenerativeModel, SpeechRecognizer, SpeechSynthesizer};
use pharma_assist_llm::{GeminiBackend, LlmConfig};
use pharma_assist_server::{create_router, init_metrics, AppState};
use pharma_assist_speech::{GeminiSpeech, NoopRecognizer, TtsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.toml > config/default.toml > defaults
    let env = std::env::var("PHARMA_ASSIST_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing is not initialized yet.
            eprintln!("Warning: failed to load config: {e}. Using defaults.");
            Settings::default()
        }
    };

    init_tracing();
    tracing::info!("Starting Pharma Assistant Server v{}", env!("CARGO_PKG_VERSION"));

    if init_metrics().is_some() {
        tracing::info!("Initialized Prometheus metrics at /metrics");
    }

    let timeout = Duration::from_secs(config.provider.timeout_secs);
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiBackend::new(LlmConfig {
        endpoint: config.provider.endpoint.clone(),
        api_key: config.provider.api_key.clone(),
        model: config.provider.model.clone(),
        timeout,
    })?);
    let speech: Arc<dyn SpeechSynthesizer> = Arc::new(GeminiSpeech::new(TtsConfig {
        endpoint: config.provider.endpoint.clone(),
        api_key: config.provider.api_key.clone(),
        model: config.provider.tts_model.clone(),
        voice: config.provider.voice.clone(),
        timeout,
    })?);
    // Dictation capture lives with the client; the server carries the
    // no-op capability.
    let recognizer: Arc<dyn SpeechRecognizer> = Arc::new(NoopRecognizer);

    let history = Arc::new(HistoryStore::new(
        Arc::new(JsonFileBackend::new(&config.history.path)),
        config.history.capacity,
    ));
    tracing::info!(
        path = %config.history.path,
        entries = history.len(),
        "History store ready"
    );

    let port = config.server.port;
    let state = AppState::new(config, model, speech, recognizer, history);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pharma_assist=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
