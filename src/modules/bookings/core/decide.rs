// Pure decision function for the booking lifecycle.
//
// pending -> reserved -> confirmed -> paid -> refunded
// pending | reserved | confirmed -> cancelled
//
// Repeating a command that already took effect is accepted without events.

use crate::modules::bookings::core::commands::{BookingCommand, CreateBooking};
use crate::modules::bookings::core::decision::{DecideError, Decision};
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::events::v1::{
    BookingCancelledV1, BookingConfirmedV1, BookingCreatedV1, BookingPaidV1, BookingRefundedV1,
    BookingReservedV1, CancelReason, Ticket,
};
use crate::modules::bookings::core::evolve::evolve;
use crate::modules::bookings::core::intents::{BookingIntent, BookingStatusChangedPayload};
use crate::modules::bookings::core::state::{Booking, BookingState, BookingStatus};
use std::collections::HashSet;

pub fn decide(state: &BookingState, command: BookingCommand) -> Decision {
    match decide_events(state, command) {
        Ok(events) => {
            let intents = intents_for(state, &events);
            Decision::Accepted { events, intents }
        }
        Err(reason) => Decision::Rejected { reason },
    }
}

fn decide_events(
    state: &BookingState,
    command: BookingCommand,
) -> Result<Vec<BookingEvent>, DecideError> {
    let (booking, command) = match (state, command) {
        (BookingState::None, BookingCommand::Create(create)) => return create_booking(create),
        (BookingState::Placed(_), BookingCommand::Create(_)) => {
            return Err(DecideError::AlreadyExists);
        }
        (BookingState::None, _) => return Err(DecideError::NotFound),
        (BookingState::Placed(booking), command) => (booking, command),
    };

    match command {
        BookingCommand::Create(_) => Err(DecideError::AlreadyExists),
        BookingCommand::MarkReserved {
            tickets,
            reserved_until,
            now,
        } => mark_reserved(booking, tickets, reserved_until, now),
        BookingCommand::Confirm { now } => confirm(booking, now),
        BookingCommand::RecordPayment {
            amount_cents,
            payment_reference,
            now,
        } => record_payment(booking, amount_cents, payment_reference, now),
        BookingCommand::Cancel { reason, now } => cancel(booking, reason, now),
        BookingCommand::Refund { now } => refund(booking, now),
        BookingCommand::Expire { now } => expire(booking, now),
    }
}

fn create_booking(command: CreateBooking) -> Result<Vec<BookingEvent>, DecideError> {
    for (field, value) in [
        ("booking_id", &command.booking_id),
        ("customer_id", &command.customer_id),
        ("event_id", &command.event_id),
    ] {
        if value.trim().is_empty() {
            return Err(DecideError::InvalidBooking(format!(
                "{field} must not be empty"
            )));
        }
    }
    if command.event_seat_ids.is_empty() {
        return Err(DecideError::InvalidBooking(
            "at least one seat is required".into(),
        ));
    }
    if command.event_seat_ids.len() > command.max_seats {
        return Err(DecideError::InvalidBooking(format!(
            "at most {} seats per booking",
            command.max_seats
        )));
    }
    let duplicate = {
        let mut seen = HashSet::new();
        command
            .event_seat_ids
            .iter()
            .find(|id| !seen.insert(id.as_str()))
            .cloned()
    };
    if let Some(duplicate) = duplicate {
        return Err(DecideError::InvalidBooking(format!(
            "seat {duplicate} is listed twice"
        )));
    }
    Ok(vec![BookingEvent::BookingCreatedV1(BookingCreatedV1 {
        tenant_id: command.tenant_id,
        booking_id: command.booking_id,
        customer_id: command.customer_id,
        event_id: command.event_id,
        event_seat_ids: command.event_seat_ids,
        created_at: command.created_at,
    })])
}

fn invalid_transition(booking: &Booking, action: &str) -> DecideError {
    DecideError::InvalidTransition {
        status: booking.status.label().into(),
        action: action.into(),
    }
}

fn mark_reserved(
    booking: &Booking,
    tickets: Vec<Ticket>,
    reserved_until: i64,
    now: i64,
) -> Result<Vec<BookingEvent>, DecideError> {
    if booking.status != BookingStatus::Pending {
        return Err(invalid_transition(booking, "reserve"));
    }
    let mut ticketed: Vec<&str> = tickets.iter().map(|t| t.event_seat_id.as_str()).collect();
    let mut expected: Vec<&str> = booking.event_seat_ids.iter().map(String::as_str).collect();
    ticketed.sort_unstable();
    expected.sort_unstable();
    if ticketed != expected {
        return Err(DecideError::InvalidBooking(
            "exactly one ticket per booked seat is required".into(),
        ));
    }
    if reserved_until <= now {
        return Err(DecideError::ReservationExpired);
    }
    let total_cents = tickets.iter().map(|t| t.price_cents).sum();
    Ok(vec![BookingEvent::BookingReservedV1(BookingReservedV1 {
        booking_id: booking.booking_id.clone(),
        tickets,
        total_cents,
        reserved_until,
        reserved_at: now,
    })])
}

fn confirm(booking: &Booking, now: i64) -> Result<Vec<BookingEvent>, DecideError> {
    match booking.status {
        BookingStatus::Reserved if booking.is_expired(now) => Err(DecideError::ReservationExpired),
        BookingStatus::Reserved => Ok(vec![BookingEvent::BookingConfirmedV1(
            BookingConfirmedV1 {
                booking_id: booking.booking_id.clone(),
                confirmed_at: now,
            },
        )]),
        BookingStatus::Confirmed => Ok(vec![]),
        _ => Err(invalid_transition(booking, "confirm")),
    }
}

fn record_payment(
    booking: &Booking,
    amount_cents: i64,
    payment_reference: String,
    now: i64,
) -> Result<Vec<BookingEvent>, DecideError> {
    if payment_reference.trim().is_empty() {
        return Err(DecideError::MissingPaymentReference);
    }
    match booking.status {
        BookingStatus::Confirmed if amount_cents != booking.total_cents => {
            Err(DecideError::AmountMismatch {
                expected: booking.total_cents,
                actual: amount_cents,
            })
        }
        BookingStatus::Confirmed => Ok(vec![BookingEvent::BookingPaidV1(BookingPaidV1 {
            booking_id: booking.booking_id.clone(),
            amount_cents,
            payment_reference,
            paid_at: now,
        })]),
        BookingStatus::Paid if booking.payment_reference.as_deref() == Some(payment_reference.as_str()) => {
            Ok(vec![])
        }
        _ => Err(invalid_transition(booking, "pay")),
    }
}

fn cancel(
    booking: &Booking,
    reason: CancelReason,
    now: i64,
) -> Result<Vec<BookingEvent>, DecideError> {
    match booking.status {
        BookingStatus::Pending | BookingStatus::Reserved | BookingStatus::Confirmed => {
            Ok(vec![cancelled(booking, reason, now)])
        }
        BookingStatus::Cancelled => Ok(vec![]),
        _ => Err(invalid_transition(booking, "cancel")),
    }
}

fn refund(booking: &Booking, now: i64) -> Result<Vec<BookingEvent>, DecideError> {
    match booking.status {
        BookingStatus::Paid => Ok(vec![BookingEvent::BookingRefundedV1(BookingRefundedV1 {
            booking_id: booking.booking_id.clone(),
            refunded_at: now,
        })]),
        BookingStatus::Refunded => Ok(vec![]),
        _ => Err(invalid_transition(booking, "refund")),
    }
}

fn expire(booking: &Booking, now: i64) -> Result<Vec<BookingEvent>, DecideError> {
    if booking.is_expired(now) {
        Ok(vec![cancelled(booking, CancelReason::Expired, now)])
    } else {
        Ok(vec![])
    }
}

fn cancelled(booking: &Booking, reason: CancelReason, now: i64) -> BookingEvent {
    BookingEvent::BookingCancelledV1(BookingCancelledV1 {
        booking_id: booking.booking_id.clone(),
        reason,
        cancelled_at: now,
    })
}

fn intents_for(state: &BookingState, events: &[BookingEvent]) -> Vec<BookingIntent> {
    let mut current = state.clone();
    let mut intents = Vec::with_capacity(events.len());
    for event in events {
        current = evolve(current, event.clone());
        if let BookingState::Placed(booking) = &current {
            intents.push(BookingIntent::PublishBookingStatusChanged {
                payload: BookingStatusChangedPayload {
                    tenant_id: booking.tenant_id.clone(),
                    booking_id: booking.booking_id.clone(),
                    customer_id: booking.customer_id.clone(),
                    event_id: booking.event_id.clone(),
                    event_seat_ids: booking.event_seat_ids.clone(),
                    status: booking.status.label().into(),
                    total_cents: booking.total_cents,
                    occurred_at: event.occurred_at(),
                },
            });
        }
    }
    intents
}
