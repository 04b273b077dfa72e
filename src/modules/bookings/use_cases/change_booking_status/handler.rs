use crate::modules::bookings::adapters::outbound::intent_outbox::dispatch_intents;
use crate::modules::bookings::core::commands::BookingCommand;
use crate::modules::bookings::core::decide::decide;
use crate::modules::bookings::core::decision::{DecideError, Decision};
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::evolve::evolve;
use crate::modules::bookings::core::state::{Booking, BookingState};
use crate::shared::application::errors::ApplicationError;
use crate::shared::application::retry::retry_on_conflict;
use crate::shared::core::primitives::stream_id;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::sync::Arc;

pub const BOOKING_STREAM: &str = "Booking";

/// Runs one booking command against the booking's stream.
pub struct BookingHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    topic: String,
    event_store: Arc<TEventStore>,
    outbox: Arc<TOutbox>,
    max_attempts: u32,
}

impl<TEventStore, TOutbox> BookingHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<BookingEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(
        topic: impl Into<String>,
        event_store: Arc<TEventStore>,
        outbox: Arc<TOutbox>,
        max_attempts: u32,
    ) -> Self {
        Self {
            topic: topic.into(),
            event_store,
            outbox,
            max_attempts,
        }
    }

    pub async fn load(&self, tenant_id: &str, booking_id: &str) -> Result<Booking, ApplicationError> {
        let stream_id = stream_id(BOOKING_STREAM, tenant_id, booking_id);
        let stream = self.event_store.load(&stream_id).await?;
        match stream.events.into_iter().fold(BookingState::None, evolve) {
            BookingState::Placed(booking) => Ok(booking),
            BookingState::None => Err(not_found(booking_id)),
        }
    }

    pub async fn execute(
        &self,
        tenant_id: &str,
        booking_id: &str,
        command: BookingCommand,
    ) -> Result<Booking, ApplicationError> {
        self.execute_tracked(tenant_id, booking_id, command)
            .await
            .map(|(booking, _)| booking)
    }

    /// Like `execute`, also telling whether any event was appended.
    pub async fn execute_tracked(
        &self,
        tenant_id: &str,
        booking_id: &str,
        command: BookingCommand,
    ) -> Result<(Booking, bool), ApplicationError> {
        let stream_id = stream_id(BOOKING_STREAM, tenant_id, booking_id);
        let stream_id = stream_id.as_str();
        let command = &command;
        retry_on_conflict(self.max_attempts, move || {
            self.execute_once(stream_id, booking_id, command.clone())
        })
        .await
    }

    async fn execute_once(
        &self,
        stream_id: &str,
        booking_id: &str,
        command: BookingCommand,
    ) -> Result<(Booking, bool), ApplicationError> {
        let stream = self.event_store.load(stream_id).await?;
        let state = stream
            .events
            .iter()
            .cloned()
            .fold(BookingState::None, evolve);

        match decide(&state, command) {
            Decision::Accepted { events, intents } => {
                let changed = !events.is_empty();
                if changed {
                    self.event_store
                        .append(stream_id, stream.version, &events)
                        .await?;
                    dispatch_intents(
                        &*self.outbox,
                        stream_id,
                        stream.version,
                        &self.topic,
                        intents,
                    )
                    .await?;
                    tracing::debug!(stream_id, events = events.len(), "booking changed");
                }
                match events.into_iter().fold(state, evolve) {
                    BookingState::Placed(booking) => Ok((booking, changed)),
                    BookingState::None => Err(ApplicationError::Unexpected(format!(
                        "booking {booking_id} has no state after an accepted command"
                    ))),
                }
            }
            Decision::Rejected {
                reason: DecideError::NotFound,
            } => Err(not_found(booking_id)),
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason.to_string())),
        }
    }
}

fn not_found(booking_id: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("booking {booking_id}"))
}
