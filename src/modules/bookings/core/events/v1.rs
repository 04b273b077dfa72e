use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub ticket_id: String,
    pub event_seat_id: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    Customer,
    SeatUnavailable,
    Expired,
    PaymentFailed,
}

impl CancelReason {
    pub fn label(&self) -> &'static str {
        match self {
            CancelReason::Customer => "customer",
            CancelReason::SeatUnavailable => "seat_unavailable",
            CancelReason::Expired => "expired",
            CancelReason::PaymentFailed => "payment_failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingCreatedV1 {
    pub tenant_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingReservedV1 {
    pub booking_id: String,
    pub tickets: Vec<Ticket>,
    pub total_cents: i64,
    pub reserved_until: i64,
    pub reserved_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfirmedV1 {
    pub booking_id: String,
    pub confirmed_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingPaidV1 {
    pub booking_id: String,
    pub amount_cents: i64,
    pub payment_reference: String,
    pub paid_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingCancelledV1 {
    pub booking_id: String,
    pub reason: CancelReason,
    pub cancelled_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingRefundedV1 {
    pub booking_id: String,
    pub refunded_at: i64,
}
