use crate::modules::bookings::core::events::v1::{CancelReason, Ticket};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Reserved,
    Confirmed,
    Paid,
    Cancelled,
    Refunded,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Reserved => "reserved",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Paid => "paid",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Refunded => "refunded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Refunded)
    }
}

/// Status of a ticket, mirroring the seat it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Reserved,
    Sold,
    Cancelled,
    Refunded,
}

impl TicketStatus {
    /// `None` while the booking has no tickets yet.
    pub fn for_booking(status: BookingStatus) -> Option<TicketStatus> {
        match status {
            BookingStatus::Pending => None,
            BookingStatus::Reserved => Some(TicketStatus::Reserved),
            BookingStatus::Confirmed | BookingStatus::Paid => Some(TicketStatus::Sold),
            BookingStatus::Cancelled => Some(TicketStatus::Cancelled),
            BookingStatus::Refunded => Some(TicketStatus::Refunded),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "reserved",
            TicketStatus::Sold => "sold",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub tenant_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub tickets: Vec<Ticket>,
    pub total_cents: i64,
    pub status: BookingStatus,
    pub reserved_until: Option<i64>,
    pub payment_reference: Option<String>,
    pub cancel_reason: Option<CancelReason>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn is_expired(&self, now: i64) -> bool {
        self.status == BookingStatus::Reserved
            && self.reserved_until.is_some_and(|until| until <= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    None,
    Placed(Booking),
}

#[cfg(test)]
mod booking_state_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Pending, None)]
    #[case(BookingStatus::Reserved, Some(TicketStatus::Reserved))]
    #[case(BookingStatus::Confirmed, Some(TicketStatus::Sold))]
    #[case(BookingStatus::Paid, Some(TicketStatus::Sold))]
    #[case(BookingStatus::Cancelled, Some(TicketStatus::Cancelled))]
    #[case(BookingStatus::Refunded, Some(TicketStatus::Refunded))]
    fn it_should_mirror_the_booking_status_on_its_tickets(
        #[case] booking: BookingStatus,
        #[case] expected: Option<TicketStatus>,
    ) {
        assert_eq!(TicketStatus::for_booking(booking), expected);
    }

    #[rstest]
    fn it_should_only_treat_terminal_statuses_as_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Refunded.is_terminal());
        assert!(!BookingStatus::Paid.is_terminal());
    }
}
