// Pure decision function for the event seat lifecycle.
//
// available -> held -> reserved -> sold -> available (released)
// available <-> blocked
//
// Expiry is evaluated against the time carried by the command: a hold or
// reservation past its `until` counts as available without a release event.
// Accepted commands that would not change the seat return no events.

use crate::modules::event_seats::core::commands::{EventSeatCommand, OpenEventSeat};
use crate::modules::event_seats::core::decision::{DecideError, Decision};
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::events::v1::{
    ReleaseReason, SeatBlockedV1, SeatHeldV1, SeatOpenedV1, SeatReleasedV1, SeatReservedV1,
    SeatSoldV1, SeatUnblockedV1,
};
use crate::modules::event_seats::core::evolve::evolve;
use crate::modules::event_seats::core::intents::{EventSeatIntent, SeatStatusChangedPayload};
use crate::modules::event_seats::core::state::{EventSeat, EventSeatState, SeatStatus};

pub fn decide(state: &EventSeatState, command: EventSeatCommand) -> Decision {
    match decide_events(state, command) {
        Ok(events) => {
            let intents = intents_for(state, &events);
            Decision::Accepted { events, intents }
        }
        Err(reason) => Decision::Rejected { reason },
    }
}

fn decide_events(
    state: &EventSeatState,
    command: EventSeatCommand,
) -> Result<Vec<EventSeatEvent>, DecideError> {
    let seat = match (state, &command) {
        (EventSeatState::None, EventSeatCommand::Open(open)) => return open_seat(open.clone()),
        (EventSeatState::Listed(_), EventSeatCommand::Open(_)) => {
            return Err(DecideError::AlreadyExists);
        }
        (EventSeatState::None, _) => return Err(DecideError::NotFound),
        (EventSeatState::Listed(seat), _) => seat,
    };

    match command {
        EventSeatCommand::Open(_) => Err(DecideError::AlreadyExists),
        EventSeatCommand::Hold {
            holder_id,
            now,
            ttl_ms,
        } => hold(seat, holder_id, now, ttl_ms),
        EventSeatCommand::Reserve {
            booking_id,
            customer_id,
            event_id,
            now,
            ttl_ms,
        } => reserve(seat, booking_id, customer_id, event_id, now, ttl_ms),
        EventSeatCommand::Sell { booking_id, now } => sell(seat, booking_id, now),
        EventSeatCommand::Release {
            owner_id,
            reason,
            now,
        } => release(seat, owner_id, reason, now),
        EventSeatCommand::Expire { now } => expire(seat, now),
        EventSeatCommand::Block { reason, now } => block(seat, reason, now),
        EventSeatCommand::Unblock { now } => unblock(seat, now),
    }
}

fn open_seat(command: OpenEventSeat) -> Result<Vec<EventSeatEvent>, DecideError> {
    for (field, value) in [
        ("event_seat_id", &command.event_seat_id),
        ("event_id", &command.event_id),
        ("section", &command.section),
        ("row_label", &command.row_label),
        ("seat_number", &command.seat_number),
    ] {
        if value.trim().is_empty() {
            return Err(DecideError::InvalidSeat(format!("{field} must not be empty")));
        }
    }
    if command.price_cents < 0 {
        return Err(DecideError::InvalidSeat("price must not be negative".into()));
    }
    Ok(vec![EventSeatEvent::SeatOpenedV1(SeatOpenedV1 {
        tenant_id: command.tenant_id,
        event_id: command.event_id,
        event_seat_id: command.event_seat_id,
        section: command.section,
        row_label: command.row_label,
        seat_number: command.seat_number,
        price_cents: command.price_cents,
        opened_at: command.opened_at,
    })])
}

fn hold(
    seat: &EventSeat,
    holder_id: String,
    now: i64,
    ttl_ms: i64,
) -> Result<Vec<EventSeatEvent>, DecideError> {
    if ttl_ms <= 0 {
        return Err(DecideError::InvalidTtl);
    }
    match seat.status.effective(now) {
        SeatStatus::Available => {}
        SeatStatus::Held {
            holder_id: current, ..
        } if current == holder_id => {}
        other => {
            return Err(DecideError::Unavailable {
                status: other.label().into(),
            });
        }
    }
    Ok(vec![EventSeatEvent::SeatHeldV1(SeatHeldV1 {
        event_seat_id: seat.event_seat_id.clone(),
        holder_id,
        held_until: now + ttl_ms,
        held_at: now,
    })])
}

fn reserve(
    seat: &EventSeat,
    booking_id: String,
    customer_id: String,
    event_id: String,
    now: i64,
    ttl_ms: i64,
) -> Result<Vec<EventSeatEvent>, DecideError> {
    if ttl_ms <= 0 {
        return Err(DecideError::InvalidTtl);
    }
    if seat.event_id != event_id {
        return Err(DecideError::WrongEvent);
    }
    match seat.status.effective(now) {
        SeatStatus::Available => {}
        SeatStatus::Held { holder_id, .. } if holder_id == customer_id => {}
        SeatStatus::Reserved {
            booking_id: current,
            ..
        } if current == booking_id => return Ok(vec![]),
        other => {
            return Err(DecideError::Unavailable {
                status: other.label().into(),
            });
        }
    }
    Ok(vec![EventSeatEvent::SeatReservedV1(SeatReservedV1 {
        event_seat_id: seat.event_seat_id.clone(),
        booking_id,
        customer_id,
        reserved_until: now + ttl_ms,
        reserved_at: now,
    })])
}

fn sell(seat: &EventSeat, booking_id: String, now: i64) -> Result<Vec<EventSeatEvent>, DecideError> {
    match &seat.status {
        SeatStatus::Reserved {
            booking_id: current,
            customer_id,
            until,
        } if *current == booking_id => {
            if *until <= now {
                return Err(DecideError::ReservationExpired);
            }
            Ok(vec![EventSeatEvent::SeatSoldV1(SeatSoldV1 {
                event_seat_id: seat.event_seat_id.clone(),
                booking_id,
                customer_id: customer_id.clone(),
                sold_at: now,
            })])
        }
        SeatStatus::Sold {
            booking_id: current,
            ..
        } if *current == booking_id => Ok(vec![]),
        SeatStatus::Available => Err(DecideError::ReservationExpired),
        _ => Err(DecideError::NotOwner),
    }
}

fn release(
    seat: &EventSeat,
    owner_id: String,
    reason: ReleaseReason,
    now: i64,
) -> Result<Vec<EventSeatEvent>, DecideError> {
    let effective = seat.status.effective(now);
    if !reason.is_system() {
        // A customer may only drop their own live hold.
        return match effective {
            SeatStatus::Held { holder_id, .. } if holder_id == owner_id => {
                Ok(vec![released(seat, reason, now)])
            }
            SeatStatus::Available => Ok(vec![]),
            SeatStatus::Held { .. } => Err(DecideError::NotOwner),
            other => Err(DecideError::Unavailable {
                status: other.label().into(),
            }),
        };
    }
    match seat.status.owner() {
        Some(owner) if owner == owner_id => Ok(vec![released(seat, reason, now)]),
        _ => Ok(vec![]),
    }
}

fn expire(seat: &EventSeat, now: i64) -> Result<Vec<EventSeatEvent>, DecideError> {
    match seat.status.until() {
        Some(until) if until <= now => Ok(vec![released(seat, ReleaseReason::Expired, now)]),
        _ => Ok(vec![]),
    }
}

fn block(seat: &EventSeat, reason: String, now: i64) -> Result<Vec<EventSeatEvent>, DecideError> {
    if reason.trim().is_empty() {
        return Err(DecideError::MissingReason);
    }
    match seat.status.effective(now) {
        SeatStatus::Available => Ok(vec![EventSeatEvent::SeatBlockedV1(SeatBlockedV1 {
            event_seat_id: seat.event_seat_id.clone(),
            reason,
            blocked_at: now,
        })]),
        SeatStatus::Blocked { .. } => Ok(vec![]),
        other => Err(DecideError::Unavailable {
            status: other.label().into(),
        }),
    }
}

fn unblock(seat: &EventSeat, now: i64) -> Result<Vec<EventSeatEvent>, DecideError> {
    match &seat.status {
        SeatStatus::Blocked { .. } => Ok(vec![EventSeatEvent::SeatUnblockedV1(SeatUnblockedV1 {
            event_seat_id: seat.event_seat_id.clone(),
            unblocked_at: now,
        })]),
        SeatStatus::Available => Ok(vec![]),
        other => Err(DecideError::Unavailable {
            status: other.label().into(),
        }),
    }
}

fn released(seat: &EventSeat, release_reason: ReleaseReason, now: i64) -> EventSeatEvent {
    EventSeatEvent::SeatReleasedV1(SeatReleasedV1 {
        event_seat_id: seat.event_seat_id.clone(),
        release_reason,
        released_at: now,
    })
}

fn intents_for(state: &EventSeatState, events: &[EventSeatEvent]) -> Vec<EventSeatIntent> {
    let mut current = state.clone();
    let mut intents = Vec::with_capacity(events.len());
    for event in events {
        current = evolve(current, event.clone());
        if let EventSeatState::Listed(seat) = &current {
            intents.push(EventSeatIntent::PublishSeatStatusChanged {
                payload: SeatStatusChangedPayload {
                    tenant_id: seat.tenant_id.clone(),
                    event_id: seat.event_id.clone(),
                    event_seat_id: seat.event_seat_id.clone(),
                    status: seat.status.label().into(),
                    owner_id: seat.status.owner().map(str::to_string),
                    occurred_at: event.occurred_at(),
                },
            });
        }
    }
    intents
}
