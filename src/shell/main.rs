use seat_reservations::shell::config::Config;
use seat_reservations::shell::http::router;
use seat_reservations::shell::state::AppState;
use seat_reservations::shell::workers::{spawn_projectors, spawn_sweeper};
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seat_reservations=debug".into()),
        )
        .with(fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::in_memory(config.reservation, config.max_append_attempts);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let workers = [
        spawn_projectors(
            &state,
            Duration::from_millis(config.projector_interval_ms),
            shutdown_rx.clone(),
        ),
        spawn_sweeper(
            &state,
            Duration::from_millis(config.sweep_interval_ms),
            shutdown_rx,
        ),
    ];

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening, GraphQL at /graphql");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tx.send(true)?;
    for worker in workers {
        if let Err(error) = worker.await {
            tracing::warn!(%error, "worker ended abnormally");
        }
    }
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl-C"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
