// Commands accepted by the booking aggregate.

use crate::modules::bookings::core::events::v1::{CancelReason, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBooking {
    pub tenant_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub max_seats: usize,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingCommand {
    Create(CreateBooking),
    MarkReserved {
        tickets: Vec<Ticket>,
        reserved_until: i64,
        now: i64,
    },
    Confirm {
        now: i64,
    },
    RecordPayment {
        amount_cents: i64,
        payment_reference: String,
        now: i64,
    },
    Cancel {
        reason: CancelReason,
        now: i64,
    },
    Refund {
        now: i64,
    },
    Expire {
        now: i64,
    },
}
