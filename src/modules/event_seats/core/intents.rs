use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStatusChangedPayload {
    pub tenant_id: String,
    pub event_id: String,
    pub event_seat_id: String,
    pub status: String,
    pub owner_id: Option<String>,
    pub occurred_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSeatIntent {
    PublishSeatStatusChanged { payload: SeatStatusChangedPayload },
}
