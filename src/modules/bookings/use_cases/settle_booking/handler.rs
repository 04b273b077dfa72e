// Moves a reserved booking on to confirmed, paid, cancelled or refunded,
// keeping its seats in step.

use crate::modules::bookings::core::commands::BookingCommand;
use crate::modules::bookings::core::decide::decide;
use crate::modules::bookings::core::decision::{DecideError, Decision};
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::events::v1::CancelReason;
use crate::modules::bookings::core::state::{Booking, BookingState, BookingStatus};
use crate::modules::bookings::use_cases::reserve_seats::handler::ReservationCoordinator;
use crate::modules::event_seats::core::commands::EventSeatCommand;
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::events::v1::ReleaseReason;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;

/// Whether `command` would be accepted by the booking as it is now, and if it would change it.
fn check(booking: &Booking, command: BookingCommand) -> Result<bool, ApplicationError> {
    match decide(&BookingState::Placed(booking.clone()), command) {
        Decision::Accepted { events, .. } => Ok(!events.is_empty()),
        Decision::Rejected {
            reason: DecideError::NotFound,
        } => Err(ApplicationError::NotFound(format!(
            "booking {}",
            booking.booking_id
        ))),
        Decision::Rejected { reason } => Err(ApplicationError::Domain(reason.to_string())),
    }
}

impl<TSeatStore, TBookingStore, TOutbox> ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    /// Sells every seat of a reserved booking, then confirms it.
    ///
    /// If a seat cannot be sold the whole booking is released and cancelled.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<Booking, ApplicationError> {
        let booking = self.bookings.load(tenant_id, booking_id).await?;
        if !check(&booking, BookingCommand::Confirm { now })? {
            return Ok(booking);
        }

        let mut ordered = booking.event_seat_ids.clone();
        ordered.sort();
        for event_seat_id in &ordered {
            let sold = self
                .seats
                .execute(
                    tenant_id,
                    event_seat_id,
                    EventSeatCommand::Sell {
                        booking_id: booking_id.to_string(),
                        now,
                    },
                )
                .await;
            if let Err(error) = sold {
                tracing::info!(%event_seat_id, %error, "seat could not be sold, rolling back");
                self.roll_back(tenant_id, booking_id, now).await;
                return Err(error);
            }
        }

        match self
            .bookings
            .execute(tenant_id, booking_id, BookingCommand::Confirm { now })
            .await
        {
            Ok(booking) => {
                tracing::info!("booking confirmed");
                Ok(booking)
            }
            Err(error) => {
                self.roll_back(tenant_id, booking_id, now).await;
                Err(error)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_payment(
        &self,
        tenant_id: &str,
        booking_id: &str,
        amount_cents: i64,
        payment_reference: &str,
        now: i64,
    ) -> Result<Booking, ApplicationError> {
        let booking = self
            .bookings
            .execute(
                tenant_id,
                booking_id,
                BookingCommand::RecordPayment {
                    amount_cents,
                    payment_reference: payment_reference.to_string(),
                    now,
                },
            )
            .await?;
        tracing::info!("payment recorded");
        Ok(booking)
    }

    /// Cancels the booking, then releases its seats. Cancelling twice is accepted.
    ///
    /// Seats are only let go once the cancellation is on the booking stream,
    /// so a payment racing in either loses or makes the cancel fail.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<Booking, ApplicationError> {
        let booking = self
            .bookings
            .execute(
                tenant_id,
                booking_id,
                BookingCommand::Cancel {
                    reason: CancelReason::Customer,
                    now,
                },
            )
            .await?;
        if booking.status == BookingStatus::Cancelled {
            self.release_seats(
                tenant_id,
                booking_id,
                &booking.event_seat_ids,
                ReleaseReason::Cancelled,
                now,
            )
            .await?;
        }
        tracing::info!("booking cancelled");
        Ok(booking)
    }

    /// Marks the paid booking refunded, then returns its sold seats to sale.
    #[tracing::instrument(skip(self))]
    pub async fn refund_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<Booking, ApplicationError> {
        let booking = self
            .bookings
            .execute(tenant_id, booking_id, BookingCommand::Refund { now })
            .await?;
        if booking.status == BookingStatus::Refunded {
            self.release_seats(
                tenant_id,
                booking_id,
                &booking.event_seat_ids,
                ReleaseReason::Refunded,
                now,
            )
            .await?;
        }
        tracing::info!("booking refunded");
        Ok(booking)
    }
}
