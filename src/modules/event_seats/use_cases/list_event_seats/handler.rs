use crate::modules::event_seats::adapters::outbound::projections::EventSeatProjectionRepository;
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::use_cases::list_event_seats::projection::{Mutation, apply};
use crate::shared::infrastructure::event_store::RecordedEvent;
use crate::shared::infrastructure::projector::Projection;
use async_trait::async_trait;
use std::sync::Arc;

pub const SEAT_MAP_PROJECTOR: &str = "seat-map";

/// Keeps the seat map read model in step with the seat event log.
pub struct SeatMapProjection<TRepository>
where
    TRepository: EventSeatProjectionRepository,
{
    repository: Arc<TRepository>,
}

impl<TRepository> SeatMapProjection<TRepository>
where
    TRepository: EventSeatProjectionRepository,
{
    pub fn new(repository: Arc<TRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TRepository> Projection<EventSeatEvent> for SeatMapProjection<TRepository>
where
    TRepository: EventSeatProjectionRepository,
{
    async fn apply(&self, recorded: &RecordedEvent<EventSeatEvent>) -> anyhow::Result<()> {
        for mutation in apply(&recorded.stream_id, recorded.version, &recorded.event) {
            match mutation {
                Mutation::Upsert(row) => self.repository.upsert(row).await?,
                Mutation::PatchStatus { stream_id, patch } => {
                    self.repository.patch_status(&stream_id, patch).await?
                }
            }
        }
        Ok(())
    }
}
