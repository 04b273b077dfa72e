use crate::modules::bookings::use_cases::get_booking::projection::{BookingPatch, BookingRow};
use async_trait::async_trait;

#[async_trait]
pub trait BookingProjectionRepository: Send + Sync {
    async fn insert(&self, row: BookingRow) -> anyhow::Result<()>;
    async fn patch(&self, stream_id: &str, patch: BookingPatch) -> anyhow::Result<()>;
}
