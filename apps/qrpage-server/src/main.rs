//! qrpage - QR code paging server
//!
//! Reads one file at startup and serves it as numbered QR code images for a
//! camera on another device to scan, with no network link between the two.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use qrpage_domain::{PagingService, PayloadSource};
use qrpage_qr::QrSegmentEncoder;
use qrpage_server::{config::ServerConfig, create_router, source::FileSource, telemetry, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let config = ServerConfig::parse();
    telemetry::init_tracing(config.log_format);

    info!("Starting qrpage server");

    let paging_config = config.paging_config()?;
    let encoder = QrSegmentEncoder::new(config.encoder_config());
    let source = FileSource::new(&config.file);

    info!(
        source = %source.describe(),
        segment_size = %paging_config.segment_size,
        ec_level = %config.ec_level,
        image_size = config.image_size,
        "Loading payload"
    );

    let service = PagingService::load(&source, paging_config, encoder).await?;

    let manifest = service.manifest();
    info!(
        length = manifest.length,
        segment_count = manifest.segment_count,
        "Payload ready"
    );

    let state = AppState {
        paging_service: Arc::new(service),
    };

    let app = create_router(state);

    info!(addr = %config.addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
