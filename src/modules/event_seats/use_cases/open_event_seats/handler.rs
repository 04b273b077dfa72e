use crate::modules::event_seats::core::commands::{EventSeatCommand, OpenEventSeat};
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::use_cases::change_seat_status::handler::EventSeatHandler;
use crate::modules::event_seats::use_cases::open_event_seats::command::OpenEventSeats;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::collections::HashSet;
use std::sync::Arc;

pub const MAX_SEATS_PER_REQUEST: usize = 5_000;

pub struct OpenEventSeatsHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    seats: Arc<EventSeatHandler<TEventStore, TOutbox>>,
}

impl<TEventStore, TOutbox> OpenEventSeatsHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    pub fn new(seats: Arc<EventSeatHandler<TEventStore, TOutbox>>) -> Self {
        Self { seats }
    }

    /// Opens every seat in request order and returns their ids.
    ///
    /// Each seat is its own stream, so a failure part way leaves the seats
    /// before it opened; repeating the request reports them as existing.
    pub async fn handle(&self, command: OpenEventSeats) -> Result<Vec<String>, ApplicationError> {
        if command.seats.is_empty() {
            return Err(ApplicationError::Validation(
                "at least one seat is required".into(),
            ));
        }
        if command.seats.len() > MAX_SEATS_PER_REQUEST {
            return Err(ApplicationError::Validation(format!(
                "at most {MAX_SEATS_PER_REQUEST} seats per request"
            )));
        }
        let duplicate = {
            let mut seen = HashSet::new();
            command
                .seats
                .iter()
                .find(|seat| !seen.insert(seat.event_seat_id.as_str()))
                .map(|seat| seat.event_seat_id.clone())
        };
        if let Some(duplicate) = duplicate {
            return Err(ApplicationError::Validation(format!(
                "duplicate event seat {duplicate}"
            )));
        }

        let mut opened = Vec::with_capacity(command.seats.len());
        for spec in command.seats {
            let event_seat_id = spec.event_seat_id.clone();
            self.seats
                .execute(
                    &command.tenant_id,
                    &event_seat_id,
                    EventSeatCommand::Open(OpenEventSeat {
                        tenant_id: command.tenant_id.clone(),
                        event_id: command.event_id.clone(),
                        event_seat_id: spec.event_seat_id,
                        section: spec.section,
                        row_label: spec.row_label,
                        seat_number: spec.seat_number,
                        price_cents: spec.price_cents,
                        opened_at: command.opened_at,
                    }),
                )
                .await?;
            opened.push(event_seat_id);
        }
        tracing::info!(
            tenant_id = %command.tenant_id,
            event_id = %command.event_id,
            seats = opened.len(),
            "event seats opened"
        );
        Ok(opened)
    }
}
