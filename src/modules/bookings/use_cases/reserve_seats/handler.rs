// Coordinates the booking and seat aggregates.
//
// Seats and bookings live in separate streams, so a multi-seat reservation is
// a sequence of single-stream commands. Seats are taken in ascending id order;
// when one step fails, the booking is cancelled and the seats it already took
// are released with a system reason.

use crate::modules::bookings::core::commands::{BookingCommand, CreateBooking};
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::events::v1::{CancelReason, Ticket};
use crate::modules::bookings::core::state::{Booking, BookingStatus};
use crate::modules::bookings::use_cases::change_booking_status::handler::BookingHandler;
use crate::modules::bookings::use_cases::reserve_seats::command::ReserveSeats;
use crate::modules::event_seats::core::commands::EventSeatCommand;
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::events::v1::ReleaseReason;
use crate::modules::event_seats::use_cases::change_seat_status::handler::EventSeatHandler;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::new_id;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationSettings {
    pub hold_ttl_ms: i64,
    pub reservation_ttl_ms: i64,
    pub max_seats_per_booking: usize,
}

impl Default for ReservationSettings {
    fn default() -> Self {
        Self {
            hold_ttl_ms: 5 * 60 * 1_000,
            reservation_ttl_ms: 15 * 60 * 1_000,
            max_seats_per_booking: 10,
        }
    }
}

pub struct ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub(crate) seats: Arc<EventSeatHandler<TSeatStore, TOutbox>>,
    pub(crate) bookings: Arc<BookingHandler<TBookingStore, TOutbox>>,
    pub(crate) settings: ReservationSettings,
}

impl<TSeatStore, TBookingStore, TOutbox> ReservationCoordinator<TSeatStore, TBookingStore, TOutbox>
where
    TSeatStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TBookingStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(
        seats: Arc<EventSeatHandler<TSeatStore, TOutbox>>,
        bookings: Arc<BookingHandler<TBookingStore, TOutbox>>,
        settings: ReservationSettings,
    ) -> Self {
        Self {
            seats,
            bookings,
            settings,
        }
    }

    pub fn settings(&self) -> ReservationSettings {
        self.settings
    }

    pub async fn get_booking(
        &self,
        tenant_id: &str,
        booking_id: &str,
    ) -> Result<Booking, ApplicationError> {
        self.bookings.load(tenant_id, booking_id).await
    }

    /// Creates a booking and reserves every requested seat for it.
    ///
    /// Either all seats end up reserved for the new booking, or none of them
    /// do and the booking is cancelled with `SeatUnavailable`.
    #[tracing::instrument(
        skip(self, command),
        fields(
            tenant_id = %command.tenant_id,
            customer_id = %command.customer_id,
            seats = command.event_seat_ids.len()
        )
    )]
    pub async fn reserve_seats(&self, command: ReserveSeats) -> Result<Booking, ApplicationError> {
        self.validate(&command)?;
        let ReserveSeats {
            tenant_id,
            customer_id,
            event_id,
            event_seat_ids,
            now,
        } = command;
        let booking_id = new_id();

        self.bookings
            .execute(
                &tenant_id,
                &booking_id,
                BookingCommand::Create(CreateBooking {
                    tenant_id: tenant_id.clone(),
                    booking_id: booking_id.clone(),
                    customer_id: customer_id.clone(),
                    event_id: event_id.clone(),
                    event_seat_ids: event_seat_ids.clone(),
                    max_seats: self.settings.max_seats_per_booking,
                    created_at: now,
                }),
            )
            .await?;

        let mut ordered = event_seat_ids;
        ordered.sort();
        let reserved_until = now + self.settings.reservation_ttl_ms;

        let mut tickets = Vec::with_capacity(ordered.len());
        for event_seat_id in &ordered {
            let reserved = self
                .seats
                .execute(
                    &tenant_id,
                    event_seat_id,
                    EventSeatCommand::Reserve {
                        booking_id: booking_id.clone(),
                        customer_id: customer_id.clone(),
                        event_id: event_id.clone(),
                        now,
                        ttl_ms: self.settings.reservation_ttl_ms,
                    },
                )
                .await;
            match reserved {
                Ok(seat) => tickets.push(Ticket {
                    ticket_id: new_id(),
                    event_seat_id: seat.event_seat_id,
                    price_cents: seat.price_cents,
                }),
                Err(error) => {
                    tracing::info!(%booking_id, %event_seat_id, %error, "seat unavailable, rolling back");
                    self.roll_back(&tenant_id, &booking_id, now).await;
                    return Err(error);
                }
            }
        }

        match self
            .bookings
            .execute(
                &tenant_id,
                &booking_id,
                BookingCommand::MarkReserved {
                    tickets,
                    reserved_until,
                    now,
                },
            )
            .await
        {
            Ok(booking) => {
                tracing::info!(%booking_id, total_cents = booking.total_cents, "seats reserved");
                Ok(booking)
            }
            Err(error) => {
                self.roll_back(&tenant_id, &booking_id, now).await;
                Err(error)
            }
        }
    }

    fn validate(&self, command: &ReserveSeats) -> Result<(), ApplicationError> {
        for (field, value) in [
            ("customer_id", &command.customer_id),
            ("event_id", &command.event_id),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
        }
        let count = command.event_seat_ids.len();
        if count == 0 {
            return Err(ApplicationError::Validation(
                "at least one seat is required".into(),
            ));
        }
        if count > self.settings.max_seats_per_booking {
            return Err(ApplicationError::Validation(format!(
                "at most {} seats per booking",
                self.settings.max_seats_per_booking
            )));
        }
        let unique: HashSet<&str> = command.event_seat_ids.iter().map(String::as_str).collect();
        if unique.len() != count {
            return Err(ApplicationError::Validation(
                "a seat is listed more than once".into(),
            ));
        }
        Ok(())
    }

    /// Releases the given seats of a booking. Seats the booking no longer owns are left alone.
    pub(crate) async fn release_seats(
        &self,
        tenant_id: &str,
        booking_id: &str,
        event_seat_ids: &[String],
        reason: ReleaseReason,
        now: i64,
    ) -> Result<(), ApplicationError> {
        let mut ordered: Vec<&String> = event_seat_ids.iter().collect();
        ordered.sort();
        for event_seat_id in ordered {
            let released = self
                .seats
                .execute(
                    tenant_id,
                    event_seat_id,
                    EventSeatCommand::Release {
                        owner_id: booking_id.to_string(),
                        reason,
                        now,
                    },
                )
                .await;
            match released {
                // A seat that was never opened holds nothing to release.
                Ok(_) | Err(ApplicationError::NotFound(_)) => {}
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    /// Best effort undo after a failed step. Whatever is left behind is swept later.
    pub(crate) async fn roll_back(&self, tenant_id: &str, booking_id: &str, now: i64) {
        if let Err(error) = self.abandon(tenant_id, booking_id, now).await {
            tracing::warn!(%booking_id, %error, "compensation failed");
        }
    }

    /// Cancels the booking as `SeatUnavailable`, then releases every seat it still owns.
    /// Returns whether the booking changed.
    pub(crate) async fn abandon(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> Result<bool, ApplicationError> {
        let (booking, changed) = self
            .bookings
            .execute_tracked(
                tenant_id,
                booking_id,
                BookingCommand::Cancel {
                    reason: CancelReason::SeatUnavailable,
                    now,
                },
            )
            .await?;
        if booking.status == BookingStatus::Cancelled {
            self.release_seats(
                tenant_id,
                booking_id,
                &booking.event_seat_ids,
                ReleaseReason::Compensation,
                now,
            )
            .await?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod reservation_coordinator_tests {
    use super::*;
    use crate::modules::bookings::core::state::BookingStatus;
    use crate::modules::event_seats::core::state::SeatStatus;
    use crate::tests::fixtures::app_state::{
        TENANT, TestCoordinator, make_coordinator_with_seats, reserve_command,
    };
    use rstest::rstest;

    async fn seat_status(coordinator: &TestCoordinator, event_seat_id: &str) -> SeatStatus {
        coordinator
            .seats
            .load(TENANT, event_seat_id)
            .await
            .unwrap()
            .status
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reserve_every_seat_and_issue_one_ticket_per_seat() {
        let coordinator = make_coordinator_with_seats(&["s-1", "s-2", "s-3"]).await;
        let booking = coordinator
            .reserve_seats(reserve_command("c-1", &["s-3", "s-1"]))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Reserved);
        assert_eq!(booking.tickets.len(), 2);
        assert_eq!(booking.total_cents, 10_000);
        assert_eq!(
            booking.reserved_until,
            Some(reserve_command("c-1", &[]).now + coordinator.settings().reservation_ttl_ms)
        );
        for seat in ["s-1", "s-3"] {
            assert_eq!(
                seat_status(&coordinator, seat).await.owner(),
                Some(booking.booking_id.as_str())
            );
        }
        assert_eq!(seat_status(&coordinator, "s-2").await, SeatStatus::Available);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_roll_back_every_seat_when_one_is_taken() {
        let coordinator = make_coordinator_with_seats(&["s-1", "s-2", "s-3"]).await;
        let first = coordinator
            .reserve_seats(reserve_command("c-1", &["s-3"]))
            .await
            .unwrap();

        let result = coordinator
            .reserve_seats(reserve_command("c-2", &["s-1", "s-2", "s-3"]))
            .await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));

        assert_eq!(seat_status(&coordinator, "s-1").await, SeatStatus::Available);
        assert_eq!(seat_status(&coordinator, "s-2").await, SeatStatus::Available);
        assert_eq!(
            seat_status(&coordinator, "s-3").await.owner(),
            Some(first.booking_id.as_str())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_release_the_seats_taken_before_an_unknown_seat() {
        let coordinator = make_coordinator_with_seats(&["s-1"]).await;
        let result = coordinator
            .reserve_seats(reserve_command("c-1", &["s-1", "s-missing"]))
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
        assert_eq!(seat_status(&coordinator, "s-1").await, SeatStatus::Available);
    }

    #[rstest]
    #[case(&[], "at least one seat")]
    #[case(&["s-1", "s-1"], "more than once")]
    #[tokio::test]
    async fn it_should_reject_invalid_requests_before_touching_any_seat(
        #[case] seats: &[&str],
        #[case] message: &str,
    ) {
        let coordinator = make_coordinator_with_seats(&["s-1"]).await;
        match coordinator.reserve_seats(reserve_command("c-1", seats)).await {
            Err(ApplicationError::Validation(reason)) => assert!(reason.contains(message)),
            other => panic!("expected a validation error, got {other:?}"),
        }
        assert_eq!(seat_status(&coordinator, "s-1").await, SeatStatus::Available);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_the_holder_turn_a_hold_into_a_reservation() {
        let coordinator = make_coordinator_with_seats(&["s-1"]).await;
        let now = reserve_command("c-1", &[]).now;
        coordinator
            .seats
            .execute(
                TENANT,
                "s-1",
                EventSeatCommand::Hold {
                    holder_id: "c-1".into(),
                    now,
                    ttl_ms: 60_000,
                },
            )
            .await
            .unwrap();

        let other = coordinator
            .reserve_seats(reserve_command("c-2", &["s-1"]))
            .await;
        assert!(matches!(other, Err(ApplicationError::Domain(_))));

        let booking = coordinator
            .reserve_seats(reserve_command("c-1", &["s-1"]))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Reserved);
    }
}
