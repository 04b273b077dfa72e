use crate::modules::event_seats::adapters::outbound::intent_outbox::dispatch_intents;
use crate::modules::event_seats::core::commands::EventSeatCommand;
use crate::modules::event_seats::core::decide::decide;
use crate::modules::event_seats::core::decision::{DecideError, Decision};
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::core::evolve::evolve;
use crate::modules::event_seats::core::state::{EventSeat, EventSeatState};
use crate::shared::application::errors::ApplicationError;
use crate::shared::application::retry::retry_on_conflict;
use crate::shared::core::primitives::stream_id;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use std::sync::Arc;

pub const EVENT_SEAT_STREAM: &str = "EventSeat";

/// Runs one seat command against the seat's stream: load, fold, decide, append, publish.
/// A lost optimistic-concurrency race reruns the whole cycle on fresh state.
pub struct EventSeatHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
    TOutbox: DomainOutbox + Send + Sync + 'static,
{
    topic: String,
    event_store: Arc<TEventStore>,
    outbox: Arc<TOutbox>,
    max_attempts: u32,
}

impl<TEventStore, TOutbox> EventSeatHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<EventSeatEvent> + Send + Sync + 'static,
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

    pub async fn load(
        &self,
        tenant_id: &str,
        event_seat_id: &str,
    ) -> Result<EventSeat, ApplicationError> {
        let stream_id = stream_id(EVENT_SEAT_STREAM, tenant_id, event_seat_id);
        let stream = self.event_store.load(&stream_id).await?;
        match stream
            .events
            .into_iter()
            .fold(EventSeatState::None, evolve)
        {
            EventSeatState::Listed(seat) => Ok(seat),
            EventSeatState::None => Err(not_found(event_seat_id)),
        }
    }

    pub async fn execute(
        &self,
        tenant_id: &str,
        event_seat_id: &str,
        command: EventSeatCommand,
    ) -> Result<EventSeat, ApplicationError> {
        self.execute_tracked(tenant_id, event_seat_id, command)
            .await
            .map(|(seat, _)| seat)
    }

    /// Like `execute`, also telling whether any event was appended.
    pub async fn execute_tracked(
        &self,
        tenant_id: &str,
        event_seat_id: &str,
        command: EventSeatCommand,
    ) -> Result<(EventSeat, bool), ApplicationError> {
        let stream_id = stream_id(EVENT_SEAT_STREAM, tenant_id, event_seat_id);
        let stream_id = stream_id.as_str();
        let command = &command;
        retry_on_conflict(self.max_attempts, move || {
            self.execute_once(stream_id, event_seat_id, command.clone())
        })
        .await
    }

    async fn execute_once(
        &self,
        stream_id: &str,
        event_seat_id: &str,
        command: EventSeatCommand,
    ) -> Result<(EventSeat, bool), ApplicationError> {
        let stream = self.event_store.load(stream_id).await?;
        let state = stream
            .events
            .iter()
            .cloned()
            .fold(EventSeatState::None, evolve);

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
                    tracing::debug!(stream_id, events = events.len(), "event seat changed");
                }
                match events.into_iter().fold(state, evolve) {
                    EventSeatState::Listed(seat) => Ok((seat, changed)),
                    EventSeatState::None => Err(ApplicationError::Unexpected(format!(
                        "event seat {event_seat_id} has no state after an accepted command"
                    ))),
                }
            }
            Decision::Rejected {
                reason: DecideError::NotFound,
            } => Err(not_found(event_seat_id)),
            Decision::Rejected { reason } => Err(ApplicationError::Domain(reason.to_string())),
        }
    }
}

fn not_found(event_seat_id: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("event seat {event_seat_id}"))
}

#[cfg(test)]
mod event_seat_handler_tests {
    use super::*;
    use crate::modules::event_seats::core::events::v1::ReleaseReason;
    use crate::modules::event_seats::core::state::SeatStatus;
    use crate::shared::infrastructure::event_store::EventStoreError;
    use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
    use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
    use crate::tests::fixtures::commands::open_event_seat::OpenEventSeatBuilder;
    use rstest::{fixture, rstest};

    const TOPIC: &str = "event-seats.v1";
    const TENANT: &str = "tenant-0001";
    const SEAT: &str = "seat-0001";
    const NOW: i64 = 1_700_000_000_000;

    type Handler = EventSeatHandler<InMemoryEventStore<EventSeatEvent>, InMemoryDomainOutbox>;

    struct Setup {
        handler: Arc<Handler>,
        event_store: Arc<InMemoryEventStore<EventSeatEvent>>,
        outbox: Arc<InMemoryDomainOutbox>,
    }

    fn setup_with(event_store: InMemoryEventStore<EventSeatEvent>, max_attempts: u32) -> Setup {
        let event_store = Arc::new(event_store);
        let outbox = Arc::new(InMemoryDomainOutbox::new());
        let handler = Arc::new(EventSeatHandler::new(
            TOPIC,
            event_store.clone(),
            outbox.clone(),
            max_attempts,
        ));
        Setup {
            handler,
            event_store,
            outbox,
        }
    }

    #[fixture]
    async fn opened() -> Setup {
        let setup = setup_with(InMemoryEventStore::new(), 5);
        setup
            .handler
            .execute(
                TENANT,
                SEAT,
                EventSeatCommand::Open(OpenEventSeatBuilder::new().build()),
            )
            .await
            .expect("open failed");
        setup
    }

    fn reserve(booking_id: &str, customer_id: &str) -> EventSeatCommand {
        EventSeatCommand::Reserve {
            booking_id: booking_id.into(),
            customer_id: customer_id.into(),
            event_id: "event-0001".into(),
            now: NOW,
            ttl_ms: 60_000,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_the_events_and_enqueue_the_intents(#[future] opened: Setup) {
        let setup = opened.await;
        let seat = setup
            .handler
            .execute(TENANT, SEAT, reserve("booking-0001", "customer-0001"))
            .await
            .expect("reserve failed");
        assert_eq!(seat.status.label(), "reserved");

        let stream = setup
            .event_store
            .load("EventSeat-tenant-0001-seat-0001")
            .await
            .unwrap();
        assert_eq!(stream.version, 2);
        assert_eq!(setup.outbox.rows.lock().await.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_append_anything_for_a_no_op(#[future] opened: Setup) {
        let setup = opened.await;
        let (seat, changed) = setup
            .handler
            .execute_tracked(TENANT, SEAT, EventSeatCommand::Expire { now: NOW })
            .await
            .unwrap();
        assert!(!changed);
        assert_eq!(seat.status, SeatStatus::Available);
        assert_eq!(setup.outbox.rows.lock().await.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_not_found_for_an_unknown_seat() {
        let setup = setup_with(InMemoryEventStore::new(), 5);
        let result = setup
            .handler
            .execute(TENANT, "seat-missing", reserve("booking-0001", "customer-0001"))
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
        assert!(matches!(
            setup.handler.load(TENANT, "seat-missing").await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_tenants_apart(#[future] opened: Setup) {
        let setup = opened.await;
        let result = setup.handler.load("tenant-other", SEAT).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_domain_rejections(#[future] opened: Setup) {
        let setup = opened.await;
        let result = setup
            .handler
            .execute(
                TENANT,
                SEAT,
                EventSeatCommand::Release {
                    owner_id: "customer-0002".into(),
                    reason: ReleaseReason::HoldReleased,
                    now: NOW,
                },
            )
            .await;
        assert!(result.is_ok(), "releasing an available seat is a no-op");

        setup
            .handler
            .execute(TENANT, SEAT, reserve("booking-0001", "customer-0001"))
            .await
            .unwrap();
        let result = setup
            .handler
            .execute(TENANT, SEAT, reserve("booking-0002", "customer-0002"))
            .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::Domain(
                DecideError::Unavailable {
                    status: "reserved".into()
                }
                .to_string()
            )
            .to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_event_store_is_offline() {
        let mut event_store = InMemoryEventStore::new();
        event_store.toggle_offline();
        let setup = setup_with(event_store, 5);
        let result = setup
            .handler
            .execute(TENANT, SEAT, reserve("booking-0001", "customer-0001"))
            .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            ApplicationError::VersionConflict(EventStoreError::Backend(
                "Event store offline".into()
            ))
            .to_string()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_exactly_one_of_two_racing_bookings_win(#[future] opened: Setup) {
        let setup = opened.await;
        setup.event_store.set_delay_append_ms(10);
        let (first, second) = tokio::join!(
            setup
                .handler
                .execute(TENANT, SEAT, reserve("booking-0001", "customer-0001")),
            setup
                .handler
                .execute(TENANT, SEAT, reserve("booking-0002", "customer-0002"))
        );
        assert!(first.is_ok() ^ second.is_ok(), "exactly one should win");
        let loser = first.err().or(second.err()).unwrap();
        assert!(
            matches!(loser, ApplicationError::Domain(_)),
            "the loser should be rejected after retrying, got {loser:?}"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_the_conflict_once_retries_are_exhausted(#[future] opened: Setup) {
        let opened = opened.await;
        let setup = Setup {
            handler: Arc::new(EventSeatHandler::new(
                TOPIC,
                opened.event_store.clone(),
                opened.outbox.clone(),
                1,
            )),
            ..opened
        };
        setup.event_store.set_delay_append_ms(10);
        let (first, second) = tokio::join!(
            setup
                .handler
                .execute(TENANT, SEAT, reserve("booking-0001", "customer-0001")),
            setup
                .handler
                .execute(TENANT, SEAT, reserve("booking-0002", "customer-0002"))
        );
        let loser = first.err().or(second.err()).unwrap();
        match loser {
            ApplicationError::VersionConflict(EventStoreError::VersionMismatch {
                expected,
                actual,
            }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }
}
