use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatOpenedV1 {
    pub tenant_id: String,
    pub event_id: String,
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub opened_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatHeldV1 {
    pub event_seat_id: String,
    pub holder_id: String,
    pub held_until: i64,
    pub held_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatReservedV1 {
    pub event_seat_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub reserved_until: i64,
    pub reserved_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSoldV1 {
    pub event_seat_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub sold_at: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    HoldReleased,
    Cancelled,
    Expired,
    Refunded,
    Compensation,
}

impl ReleaseReason {
    /// Releases driven by the system are idempotent: a seat the owner no longer holds is left alone.
    pub fn is_system(&self) -> bool {
        !matches!(self, ReleaseReason::HoldReleased)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatReleasedV1 {
    pub event_seat_id: String,
    pub release_reason: ReleaseReason,
    pub released_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatBlockedV1 {
    pub event_seat_id: String,
    pub reason: String,
    pub blocked_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatUnblockedV1 {
    pub event_seat_id: String,
    pub unblocked_at: i64,
}
