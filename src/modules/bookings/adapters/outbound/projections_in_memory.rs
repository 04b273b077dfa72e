// In memory booking repository, serving both the projector and the queries.

use crate::modules::bookings::adapters::outbound::projections::BookingProjectionRepository;
use crate::modules::bookings::use_cases::get_booking::projection::{BookingPatch, BookingRow};
use crate::modules::bookings::use_cases::get_booking::queries_port::{
    BookingQueries, BookingView, ExpiredBooking,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryBookingProjections {
    rows: RwLock<HashMap<String, BookingRow>>,
    is_offline: bool,
}

impl InMemoryBookingProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingProjectionRepository for InMemoryBookingProjections {
    async fn insert(&self, row: BookingRow) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.rows.write().await.insert(row.stream_id.clone(), row);
        Ok(())
    }

    async fn patch(&self, stream_id: &str, patch: BookingPatch) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let row = guard
            .get_mut(stream_id)
            .ok_or_else(|| anyhow::anyhow!("no booking row for {stream_id}"))?;
        row.status = patch.status;
        if let Some(tickets) = patch.tickets {
            row.tickets = tickets;
        }
        if let Some(ticket_status) = patch.ticket_status {
            for ticket in &mut row.tickets {
                ticket.status = ticket_status.clone();
            }
        }
        if let Some(total_cents) = patch.total_cents {
            row.total_cents = total_cents;
        }
        if patch.reserved_until.is_some() {
            row.reserved_until = patch.reserved_until;
        }
        if patch.payment_reference.is_some() {
            row.payment_reference = patch.payment_reference;
        }
        if patch.cancel_reason.is_some() {
            row.cancel_reason = patch.cancel_reason;
        }
        row.updated_at = patch.updated_at;
        row.last_event_id = Some(patch.last_event_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingQueries for InMemoryBookingProjections {
    async fn get(
        &self,
        tenant_id: &str,
        booking_id: &str,
        now: i64,
    ) -> anyhow::Result<Option<BookingView>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .find(|row| row.tenant_id == tenant_id && row.booking_id == booking_id)
            .cloned()
            .map(|row| BookingView::at(row, now)))
    }

    async fn list_by_customer(
        &self,
        tenant_id: &str,
        customer_id: &str,
        offset: u64,
        limit: u64,
        now: i64,
    ) -> anyhow::Result<Vec<BookingView>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let mut rows: Vec<BookingRow> = guard
            .values()
            .filter(|row| row.tenant_id == tenant_id && row.customer_id == customer_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.booking_id.cmp(&a.booking_id))
        });
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|row| BookingView::at(row, now))
            .collect())
    }

    async fn find_expired(&self, now: i64, limit: usize) -> anyhow::Result<Vec<ExpiredBooking>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .filter(|row| row.status == "reserved")
            .filter(|row| row.reserved_until.is_some_and(|until| until <= now))
            .take(limit)
            .map(|row| ExpiredBooking {
                tenant_id: row.tenant_id.clone(),
                booking_id: row.booking_id.clone(),
            })
            .collect())
    }

    async fn find_stale_pending(
        &self,
        created_before: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ExpiredBooking>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .filter(|row| row.status == "pending" && row.created_at <= created_before)
            .take(limit)
            .map(|row| ExpiredBooking {
                tenant_id: row.tenant_id.clone(),
                booking_id: row.booking_id.clone(),
            })
            .collect())
    }
}
