// Background workers: both projectors and the reservation sweeper.
//
// Each worker ticks on its own interval and stops when the shutdown channel
// flips to true. Failures are logged and retried on the next tick.

use crate::shared::core::primitives::now_millis;
use crate::shell::state::AppState;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

pub fn spawn_projectors(
    state: &AppState,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let seat_projector = state.seat_projector.clone();
    let booking_projector = state.booking_projector.clone();
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for result in [
                        (seat_projector.name(), seat_projector.catch_up().await),
                        (booking_projector.name(), booking_projector.catch_up().await),
                    ] {
                        match result {
                            (_, Ok(0)) => {}
                            (projector, Ok(applied)) => {
                                tracing::debug!(projector, applied, "projection caught up")
                            }
                            (projector, Err(error)) => {
                                tracing::warn!(projector, %error, "projection failed")
                            }
                        }
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("projector worker stopping");
                        break;
                    }
                }
            }
        }
    })
}

pub fn spawn_sweeper(
    state: &AppState,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let sweeper = state.sweeper.clone();
    let seat_projector = state.seat_projector.clone();
    let booking_projector = state.booking_projector.clone();
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // The sweeper reads candidates from the read models.
                    if let Err(error) = seat_projector.catch_up().await {
                        tracing::warn!(%error, "seat map is behind before sweep");
                    }
                    if let Err(error) = booking_projector.catch_up().await {
                        tracing::warn!(%error, "bookings are behind before sweep");
                    }
                    match sweeper.sweep(now_millis()).await {
                        Ok(report) if !report.is_empty() => {
                            tracing::info!(
                                bookings_expired = report.bookings_expired,
                                bookings_abandoned = report.bookings_abandoned,
                                seats_released = report.seats_released,
                                failures = report.failures,
                                "reservation sweep finished"
                            );
                        }
                        Ok(_) => {}
                        Err(error) => tracing::warn!(%error, "reservation sweep failed"),
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("sweeper worker stopping");
                        break;
                    }
                }
            }
        }
    })
}
