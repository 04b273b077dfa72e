use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::intents::EventSeatIntent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("event seat not found")]
    NotFound,

    #[error("event seat already exists")]
    AlreadyExists,

    #[error("event seat is {status}")]
    Unavailable { status: String },

    #[error("event seat is owned by someone else")]
    NotOwner,

    #[error("reservation has expired")]
    ReservationExpired,

    #[error("event seat belongs to another event")]
    WrongEvent,

    #[error("invalid event seat: {0}")]
    InvalidSeat(String),

    #[error("time to live must be positive")]
    InvalidTtl,

    #[error("a reason is required")]
    MissingReason,
}

#[derive(Debug)]
pub enum Decision {
    Accepted {
        events: Vec<EventSeatEvent>,
        intents: Vec<EventSeatIntent>,
    },
    Rejected {
        reason: DecideError,
    },
}
