use anyhow::Context;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use video_processing_service::app;
use video_processing_service::config::settings::AppConfig;
use video_processing_service::infrastructure::media::ffmpeg::FfmpegTranscoder;
use video_processing_service::infrastructure::storage::local::LocalStorage;
use video_processing_service::infrastructure::storage::s3::{StorageService, StorageSettings};
use video_processing_service::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting video processing service...");

    let config = AppConfig::new().context("Invalid configuration")?;

    let local = LocalStorage::new(config.raw_dir.clone(), config.processed_dir.clone());
    local
        .setup_directories()
        .await
        .context("Failed to create working directories")?;

    let remote = StorageService::new(StorageSettings {
        endpoint: &config.storage_endpoint,
        region: &config.storage_region,
        access_key: &config.storage_access_key,
        secret_key: &config.storage_secret_key,
        raw_bucket: &config.raw_bucket,
        processed_bucket: &config.processed_bucket,
    });
    let transcoder = FfmpegTranscoder::new(&config.ffmpeg_path, config.scale_height);

    let state = AppState::new(local, Arc::new(remote), Arc::new(transcoder));
    let app = app::create_app(state, config.max_body_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Video processing service listening at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
