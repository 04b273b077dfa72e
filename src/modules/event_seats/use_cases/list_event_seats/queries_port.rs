use crate::modules::event_seats::use_cases::list_event_seats::projection::SeatRow;
use async_trait::async_trait;
use serde::Serialize;

/// A seat as shown on the seat map at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSeatView {
    pub event_seat_id: String,
    pub event_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub status: String,
    pub until: Option<i64>,
    pub block_reason: Option<String>,
    pub updated_at: i64,
}

impl EventSeatView {
    /// Holds and reservations past their deadline read as available.
    pub fn at(row: SeatRow, now: i64) -> Self {
        let expired = matches!(row.until, Some(until) if until <= now)
            && matches!(row.status.as_str(), "held" | "reserved");
        let (status, until) = if expired {
            ("available".to_string(), None)
        } else {
            (row.status, row.until)
        };
        Self {
            event_seat_id: row.event_seat_id,
            event_id: row.event_id,
            section: row.section,
            row_label: row.row_label,
            seat_number: row.seat_number,
            price_cents: row.price_cents,
            status,
            until,
            block_reason: row.block_reason,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredSeat {
    pub tenant_id: String,
    pub event_seat_id: String,
}

#[async_trait]
pub trait EventSeatQueries: Send + Sync {
    /// Seats of one event ordered by section, row and seat number,
    /// optionally only those with the given effective status.
    async fn list_by_event(
        &self,
        tenant_id: &str,
        event_id: &str,
        status: Option<&str>,
        now: i64,
    ) -> anyhow::Result<Vec<EventSeatView>>;

    /// Holds and reservations whose deadline has passed but that are not released yet.
    async fn find_expired(&self, now: i64, limit: usize) -> anyhow::Result<Vec<ExpiredSeat>>;
}
