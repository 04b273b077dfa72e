use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusChangedPayload {
    pub tenant_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub status: String,
    pub total_cents: i64,
    pub occurred_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingIntent {
    PublishBookingStatusChanged {
        payload: BookingStatusChangedPayload,
    },
}
