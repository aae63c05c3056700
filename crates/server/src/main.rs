mod bootstrap;
mod health;
mod products;
mod site;

use std::time::Duration;

use anyhow::Result;
use shopfront_core::config::{AppConfig, LoadOptions};
use tracing::{info, warn};

fn init_logging(config: &AppConfig) {
    use shopfront_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;

    let router = products::router(app.catalog.clone(), app.filter_mode())
        .merge(health::router(app.catalog.clone()))
        .merge(site::router());

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.server.started",
        bind_address = %address,
        products = app.catalog.len(),
        strict_filters = app.config.catalog.strict_filters,
        "shopfront server listening"
    );

    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let serve = async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                wait_for_shutdown().await;
                let _ = shutdown_tx.send(());
            })
            .await
    };

    tokio::select! {
        result = serve => result?,
        _ = drain_deadline(shutdown_rx, grace) => {
            warn!(
                event_name = "system.server.drain_timeout",
                grace_secs = grace.as_secs(),
                "graceful shutdown deadline exceeded, abandoning open connections"
            );
        }
    }

    info!(event_name = "system.server.stopped", "shopfront server stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            event_name = "system.server.signal_error",
            error = %error,
            "could not listen for shutdown signal"
        );
        return;
    }
    info!(event_name = "system.server.stopping", "shutdown signal received, draining connections");
}

async fn drain_deadline(shutdown_rx: tokio::sync::oneshot::Receiver<()>, grace: Duration) {
    let _ = shutdown_rx.await;
    tokio::time::sleep(grace).await;
}
