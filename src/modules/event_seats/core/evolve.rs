use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::state::{EventSeat, EventSeatState, SeatStatus};

pub fn evolve(state: EventSeatState, event: EventSeatEvent) -> EventSeatState {
    match (state, event) {
        (EventSeatState::None, EventSeatEvent::SeatOpenedV1(e)) => EventSeatState::Listed(EventSeat {
            tenant_id: e.tenant_id,
            event_id: e.event_id,
            event_seat_id: e.event_seat_id,
            section: e.section,
            row_label: e.row_label,
            seat_number: e.seat_number,
            price_cents: e.price_cents,
            status: SeatStatus::Available,
            updated_at: e.opened_at,
        }),
        (EventSeatState::Listed(seat), event) => {
            let (status, updated_at) = match event {
                EventSeatEvent::SeatOpenedV1(_) => return EventSeatState::Listed(seat),
                EventSeatEvent::SeatHeldV1(e) => (
                    SeatStatus::Held {
                        holder_id: e.holder_id,
                        until: e.held_until,
                    },
                    e.held_at,
                ),
                EventSeatEvent::SeatReservedV1(e) => (
                    SeatStatus::Reserved {
                        booking_id: e.booking_id,
                        customer_id: e.customer_id,
                        until: e.reserved_until,
                    },
                    e.reserved_at,
                ),
                EventSeatEvent::SeatSoldV1(e) => (
                    SeatStatus::Sold {
                        booking_id: e.booking_id,
                        customer_id: e.customer_id,
                    },
                    e.sold_at,
                ),
                EventSeatEvent::SeatReleasedV1(e) => (SeatStatus::Available, e.released_at),
                EventSeatEvent::SeatBlockedV1(e) => {
                    (SeatStatus::Blocked { reason: e.reason }, e.blocked_at)
                }
                EventSeatEvent::SeatUnblockedV1(e) => (SeatStatus::Available, e.unblocked_at),
            };
            EventSeatState::Listed(EventSeat {
                status,
                updated_at,
                ..seat
            })
        }
        (state, _) => state,
    }
}
