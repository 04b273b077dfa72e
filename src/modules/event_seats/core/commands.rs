// Commands accepted by the event seat aggregate.
//
// Every command carries the time it is decided at, so `decide` stays pure.

use crate::modules::event_seats::core::events::v1::ReleaseReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEventSeat {
    pub tenant_id: String,
    pub event_id: String,
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub opened_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSeatCommand {
    Open(OpenEventSeat),
    Hold {
        holder_id: String,
        now: i64,
        ttl_ms: i64,
    },
    Reserve {
        booking_id: String,
        customer_id: String,
        event_id: String,
        now: i64,
        ttl_ms: i64,
    },
    Sell {
        booking_id: String,
        now: i64,
    },
    Release {
        owner_id: String,
        reason: ReleaseReason,
        now: i64,
    },
    Expire {
        now: i64,
    },
    Block {
        reason: String,
        now: i64,
    },
    Unblock {
        now: i64,
    },
}
