use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::state::{Booking, BookingState, BookingStatus};

pub fn evolve(state: BookingState, event: BookingEvent) -> BookingState {
    match (state, event) {
        (BookingState::None, BookingEvent::BookingCreatedV1(e)) => BookingState::Placed(Booking {
            tenant_id: e.tenant_id,
            booking_id: e.booking_id,
            customer_id: e.customer_id,
            event_id: e.event_id,
            event_seat_ids: e.event_seat_ids,
            tickets: Vec::new(),
            total_cents: 0,
            status: BookingStatus::Pending,
            reserved_until: None,
            payment_reference: None,
            cancel_reason: None,
            created_at: e.created_at,
            updated_at: e.created_at,
        }),
        (BookingState::Placed(booking), event) => BookingState::Placed(match event {
            BookingEvent::BookingCreatedV1(_) => booking,
            BookingEvent::BookingReservedV1(e) => Booking {
                tickets: e.tickets,
                total_cents: e.total_cents,
                status: BookingStatus::Reserved,
                reserved_until: Some(e.reserved_until),
                updated_at: e.reserved_at,
                ..booking
            },
            BookingEvent::BookingConfirmedV1(e) => Booking {
                status: BookingStatus::Confirmed,
                updated_at: e.confirmed_at,
                ..booking
            },
            BookingEvent::BookingPaidV1(e) => Booking {
                status: BookingStatus::Paid,
                payment_reference: Some(e.payment_reference),
                updated_at: e.paid_at,
                ..booking
            },
            BookingEvent::BookingCancelledV1(e) => Booking {
                status: BookingStatus::Cancelled,
                cancel_reason: Some(e.reason),
                updated_at: e.cancelled_at,
                ..booking
            },
            BookingEvent::BookingRefundedV1(e) => Booking {
                status: BookingStatus::Refunded,
                updated_at: e.refunded_at,
                ..booking
            },
        }),
        (state, _) => state,
    }
}
