use crate::modules::event_seats::use_cases::list_event_seats::projection::{
    SeatRow, SeatStatusPatch,
};
use async_trait::async_trait;

#[async_trait]
pub trait EventSeatProjectionRepository: Send + Sync {
    async fn upsert(&self, row: SeatRow) -> anyhow::Result<()>;
    async fn patch_status(&self, stream_id: &str, patch: SeatStatusPatch) -> anyhow::Result<()>;
}
