use crate::modules::bookings::use_cases::get_booking::projection::{BookingRow, TicketRow};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub ticket_id: String,
    pub event_seat_id: String,
    pub price_cents: i64,
    pub status: String,
}

/// A booking as seen at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub tickets: Vec<TicketView>,
    pub total_cents: i64,
    pub status: String,
    pub reserved_until: Option<i64>,
    pub payment_reference: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl BookingView {
    /// A reservation past its deadline reads as cancelled by expiry, tickets included,
    /// before the sweeper has recorded it.
    pub fn at(row: BookingRow, now: i64) -> Self {
        let expired = row.status == "reserved" && row.reserved_until.is_some_and(|u| u <= now);
        let (status, cancel_reason) = if expired {
            ("cancelled".to_string(), Some("expired".to_string()))
        } else {
            (row.status, row.cancel_reason)
        };
        let tickets = row
            .tickets
            .into_iter()
            .map(|t: TicketRow| TicketView {
                status: if expired { "cancelled".to_string() } else { t.status },
                ticket_id: t.ticket_id,
                event_seat_id: t.event_seat_id,
                price_cents: t.price_cents,
            })
            .collect();
        Self {
            booking_id: row.booking_id,
            customer_id: row.customer_id,
            event_id: row.event_id,
            event_seat_ids: row.event_seat_ids,
            tickets,
            total_cents: row.total_cents,
            status,
            reserved_until: row.reserved_until,
            payment_reference: row.payment_reference,
            cancel_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredBooking {
    pub tenant_id: String,
    pub booking_id: String,
}

#[async_trait]
pub trait BookingQueries: Send + Sync {
    async fn get(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> anyhow::Result<Option<BookingView>>;

    /// Newest first.
    async fn list_by_customer(
        &self,
        tenant_id: &str,
        customer_id: &str,
        offset: u64,
        limit: u64,
        now: i64,
    ) -> anyhow::Result<Vec<BookingView>>;

    /// Reserved bookings past their deadline.
    async fn find_expired(&self, now: i64, limit: usize) -> anyhow::Result<Vec<ExpiredBooking>>;

    /// Bookings still pending that were created at or before `created_before`.
    async fn find_stale_pending(
        &self,
        created_before: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ExpiredBooking>>;
}

#[cfg(test)]
mod booking_view_tests {
    use super::*;
    use rstest::rstest;

    fn row(status: &str, reserved_until: Option<i64>) -> BookingRow {
        BookingRow {
            stream_id: "Booking-t-b".into(),
            tenant_id: "t".into(),
            booking_id: "b".into(),
            customer_id: "c".into(),
            event_id: "e".into(),
            event_seat_ids: vec!["s".into()],
            tickets: vec![TicketRow {
                ticket_id: "tk".into(),
                event_seat_id: "s".into(),
                price_cents: 100,
                status: "reserved".into(),
            }],
            total_cents: 100,
            status: status.into(),
            reserved_until,
            payment_reference: None,
            cancel_reason: None,
            created_at: 0,
            updated_at: 0,
            last_event_id: None,
        }
    }

    #[rstest]
    #[case("reserved", Some(100), 99, "reserved", "reserved")]
    #[case("reserved", Some(100), 100, "cancelled", "cancelled")]
    #[case("confirmed", Some(100), 500, "confirmed", "reserved")]
    fn it_should_expire_a_reservation_at_read_time(
        #[case] status: &str,
        #[case] until: Option<i64>,
        #[case] now: i64,
        #[case] expected_booking: &str,
        #[case] expected_ticket: &str,
    ) {
        let view = BookingView::at(row(status, until), now);
        assert_eq!(view.status, expected_booking);
        assert_eq!(view.tickets[0].status, expected_ticket);
    }
}
