use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::intents::BookingIntent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("booking not found")]
    NotFound,

    #[error("booking already exists")]
    AlreadyExists,

    #[error("invalid booking: {0}")]
    InvalidBooking(String),

    #[error("cannot {action} a {status} booking")]
    InvalidTransition { status: String, action: String },

    #[error("reservation has expired")]
    ReservationExpired,

    #[error("payment of {actual} does not match the total of {expected}")]
    AmountMismatch { expected: i64, actual: i64 },

    #[error("a payment reference is required")]
    MissingPaymentReference,
}

#[derive(Debug)]
pub enum Decision {
    Accepted {
        events: Vec<BookingEvent>,
        intents: Vec<BookingIntent>,
    },
    Rejected {
        reason: DecideError,
    },
}
