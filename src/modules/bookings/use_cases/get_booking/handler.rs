use crate::modules::bookings::adapters::outbound::projections::BookingProjectionRepository;
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::use_cases::get_booking::projection::{Mutation, apply};
use crate::shared::infrastructure::event_store::RecordedEvent;
use crate::shared::infrastructure::projector::Projection;
use async_trait::async_trait;
use std::sync::Arc;

pub const BOOKINGS_PROJECTOR: &str = "bookings";

pub struct BookingProjection<TRepository>
where
    TRepository: BookingProjectionRepository,
{
    repository: Arc<TRepository>,
}

impl<TRepository> BookingProjection<TRepository>
where
    TRepository: BookingProjectionRepository,
{
    pub fn new(repository: Arc<TRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TRepository> Projection<BookingEvent> for BookingProjection<TRepository>
where
    TRepository: BookingProjectionRepository,
{
    async fn apply(&self, recorded: &RecordedEvent<BookingEvent>) -> anyhow::Result<()> {
        for mutation in apply(&recorded.stream_id, recorded.version, &recorded.event) {
            match mutation {
                Mutation::Insert(row) => self.repository.insert(row).await?,
                Mutation::Patch { stream_id, patch } => {
                    self.repository.patch(&stream_id, patch).await?
                }
            }
        }
        Ok(())
    }
}
