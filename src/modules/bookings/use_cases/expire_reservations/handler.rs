// Releases what ran out of time.
//
// Expiry already holds at read and decide time; the sweeper records it, so
// the event log, the outbox and the read models catch up with the clock.

use crate::modules::bookings::core::commands::BookingCommand;
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::events::v1::CancelReason;
use crate::modules::bookings::core::state::BookingStatus;
use crate::modules::bookings::use_cases::get_booking::queries_port::BookingQueries;
use crate::modules::bookings::use_cases::reserve_seats::handler::ReservationCoordinator;
use crate::modules::event_seats::core::commands::EventSeatCommand;
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::events::v1::ReleaseReason;
use crate::modules::event_seats::use_cases::list_event_seats::queries_port::EventSeatQueries;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::sync::Arc;

pub const DEFAULT_SWEEP_BATCH: usize = 500;

impl<TSeatStore, TBookingStore, TOutbox> ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    /// Cancels a reserved booking past its deadline and releases its seats.
    /// Returns false when there was nothing to expire.
    ///
    /// Seats are only released when this booking ended up cancelled by expiry,
    /// so a confirm that got in first keeps its sold seats.
    pub async fn expire_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<bool, ApplicationError> {
        let (booking, changed) = self
            .bookings
            .execute_tracked(tenant_id, booking_id, BookingCommand::Expire { now })
            .await?;
        if booking.status != BookingStatus::Cancelled
            || booking.cancel_reason != Some(CancelReason::Expired)
        {
            return Ok(false);
        }
        self.release_seats(
            tenant_id,
            booking_id,
            &booking.event_seat_ids,
            ReleaseReason::Expired,
            now,
        )
        .await?;
        if changed {
            tracing::info!(%tenant_id, %booking_id, "booking expired");
        }
        Ok(changed)
    }

    /// Cancels a booking left pending by an interrupted reservation and frees
    /// whatever seats it took. Returns false when the booking moved on meanwhile.
    pub async fn abandon_pending_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<bool, ApplicationError> {
        let booking = self.bookings.load(tenant_id, booking_id).await?;
        if booking.status != BookingStatus::Pending {
            return Ok(false);
        }
        let abandoned = self.abandon(tenant_id, booking_id, now).await?;
        if abandoned {
            tracing::info!(%tenant_id, %booking_id, "stale pending booking cancelled");
        }
        Ok(abandoned)
    }

    /// Releases a seat whose hold or reservation ran out.
    pub async fn expire_seat(
        &self,
        tenant_id: &str,
        event_seat_id: &str,
        now: i64,
    ) -> Result<bool, ApplicationError> {
        let (_, changed) = self
            .seats
            .execute_tracked(tenant_id, event_seat_id, EventSeatCommand::Expire { now })
            .await?;
        Ok(changed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub bookings_expired: usize,
    pub bookings_abandoned: usize,
    pub seats_released: usize,
    pub failures: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct ReservationSweeper<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    coordinator: Arc<ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>>,
    seat_queries: Arc<dyn EventSeatQueries>,
    booking_queries: Arc<dyn BookingQueries>,
    batch_size: usize,
}

impl<TSeatStore, TBookingStore, TOutbox> ReservationSweeper<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(
        coordinator: Arc<ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>>,
        seat_queries: Arc<dyn EventSeatQueries>,
        booking_queries: Arc<dyn BookingQueries>,
    ) -> Self {
        Self {
            coordinator,
            seat_queries,
            booking_queries,
            batch_size: DEFAULT_SWEEP_BATCH,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Expires bookings first, then cancels stale pending ones, then clears any hold
    /// or reservation still left on the seat map.
    /// One failing item is counted and skipped; running the sweep again is harmless.
    pub async fn sweep(&self, now: i64) -> Result<SweepReport, ApplicationError> {
        let mut report = SweepReport::default();

        for expired in self.booking_queries.find_expired(now, self.batch_size).await? {
            match self
                .coordinator
                .expire_booking(&expired.tenant_id, &expired.booking_id, now)
                .await
            {
                Ok(true) => report.bookings_expired += 1,
                Ok(false) => {}
                Err(error) => {
                    report.failures += 1;
                    tracing::warn!(booking_id = %expired.booking_id, %error, "booking expiry failed");
                }
            }
        }

        // A reservation that never got past pending is given the same time a
        // reserved booking gets before it is let go.
        let created_before = now - self.coordinator.settings().reservation_ttl_ms;
        for stale in self
            .booking_queries
            .find_stale_pending(created_before, self.batch_size)
            .await?
        {
            match self
                .coordinator
                .abandon_pending_booking(&stale.tenant_id, &stale.booking_id, now)
                .await
            {
                Ok(true) => report.bookings_abandoned += 1,
                Ok(false) => {}
                Err(error) => {
                    report.failures += 1;
                    tracing::warn!(booking_id = %stale.booking_id, %error, "pending booking cleanup failed");
                }
            }
        }

        for expired in self.seat_queries.find_expired(now, self.batch_size).await? {
            match self
                .coordinator
                .expire_seat(&expired.tenant_id, &expired.event_seat_id, now)
                .await
            {
                Ok(true) => report.seats_released += 1,
                Ok(false) => {}
                Err(error) => {
                    report.failures += 1;
                    tracing::warn!(event_seat_id = %expired.event_seat_id, %error, "seat expiry failed");
                }
            }
        }

        if !report.is_empty() {
            tracing::debug!(
                bookings_expired = report.bookings_expired,
                bookings_abandoned = report.bookings_abandoned,
                seats_released = report.seats_released,
                failures = report.failures,
                "expiry sweep done"
            );
        }
        Ok(report)
    }
}
