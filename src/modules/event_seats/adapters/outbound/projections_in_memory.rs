// In memory seat map repository.
//
// Purpose
// - Exercise the seat map projector and its queries without a database.

use crate::modules::event_seats::adapters::outbound::projections::EventSeatProjectionRepository;
use crate::modules::event_seats::use_cases::list_event_seats::projection::{
    SeatRow, SeatStatusPatch,
};
use crate::modules::event_seats::use_cases::list_event_seats::queries_port::{
    EventSeatQueries, EventSeatView, ExpiredSeat,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEventSeatProjections {
    rows: RwLock<HashMap<String, SeatRow>>,
    is_offline: bool,
}

impl InMemoryEventSeatProjections {
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
impl EventSeatProjectionRepository for InMemoryEventSeatProjections {
    async fn upsert(&self, row: SeatRow) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.rows.write().await.insert(row.stream_id.clone(), row);
        Ok(())
    }

    async fn patch_status(&self, stream_id: &str, patch: SeatStatusPatch) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let row = guard
            .get_mut(stream_id)
            .ok_or_else(|| anyhow::anyhow!("no seat row for {stream_id}"))?;
        row.status = patch.status;
        row.owner_id = patch.owner_id;
        row.until = patch.until;
        row.block_reason = patch.block_reason;
        row.updated_at = patch.updated_at;
        row.last_event_id = Some(patch.last_event_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl EventSeatQueries for InMemoryEventSeatProjections {
    async fn list_by_event(
        &self,
        tenant_id: &str,
        event_id: &str,
        status: Option<&str>,
        now: i64,
    ) -> anyhow::Result<Vec<EventSeatView>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let mut rows: Vec<SeatRow> = guard
            .values()
            .filter(|row| row.tenant_id == tenant_id && row.event_id == event_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (&a.section, &a.row_label, a.seat_number.parse::<u32>().ok(), &a.seat_number).cmp(&(
                &b.section,
                &b.row_label,
                b.seat_number.parse::<u32>().ok(),
                &b.seat_number,
            ))
        });
        Ok(rows
            .into_iter()
            .map(|row| EventSeatView::at(row, now))
            .filter(|view| status.is_none_or(|wanted| view.status == wanted))
            .collect())
    }

    async fn find_expired(&self, now: i64, limit: usize) -> anyhow::Result<Vec<ExpiredSeat>> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .filter(|row| matches!(row.status.as_str(), "held" | "reserved"))
            .filter(|row| matches!(row.until, Some(until) if until <= now))
            .take(limit)
            .map(|row| ExpiredSeat {
                tenant_id: row.tenant_id.clone(),
                event_seat_id: row.event_seat_id.clone(),
            })
            .collect())
    }
}
