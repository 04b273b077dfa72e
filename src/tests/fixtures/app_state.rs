// Fully wired in-memory application state for handler and HTTP tests.

use crate::modules::bookings::use_cases::reserve_seats::command::ReserveSeats;
use crate::modules::bookings::use_cases::reserve_seats::handler::ReservationSettings;
use crate::modules::event_seats::use_cases::open_event_seats::command::{OpenEventSeats, SeatSpec};
use crate::shared::core::primitives::now_millis;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shell::state::{AppState, Coordinator};
use std::sync::Arc;

pub const TENANT: &str = "tenant-0001";
pub const EVENT: &str = "event-0001";
pub const NOW: i64 = 1_700_000_000_000;
pub const SEAT_PRICE_CENTS: i64 = 5_000;

pub type TestCoordinator = Coordinator;

pub fn make_test_state() -> AppState {
    AppState::in_memory(ReservationSettings::default(), 5)
}

pub fn make_offline_test_state() -> AppState {
    let mut seat_store = InMemoryEventStore::new();
    seat_store.toggle_offline();
    AppState::with_stores(
        seat_store,
        InMemoryEventStore::new(),
        ReservationSettings::default(),
        5,
    )
}

/// State with the given seats open for sale in section A, row 1 of `EVENT`.
pub async fn make_test_state_with_seats(event_seat_ids: &[&str]) -> AppState {
    let state = make_test_state();
    if event_seat_ids.is_empty() {
        return state;
    }
    let seats = event_seat_ids
        .iter()
        .enumerate()
        .map(|(index, id)| SeatSpec {
            event_seat_id: id.to_string(),
            section: "A".into(),
            row_label: "1".into(),
            seat_number: (index + 1).to_string(),
            price_cents: SEAT_PRICE_CENTS,
        })
        .collect();
    state
        .open_seats
        .handle(OpenEventSeats {
            tenant_id: TENANT.into(),
            event_id: EVENT.into(),
            seats,
            opened_at: now_millis(),
        })
        .await
        .expect("opening test seats failed");
    state
}

pub async fn make_coordinator_with_seats(event_seat_ids: &[&str]) -> Arc<TestCoordinator> {
    make_test_state_with_seats(event_seat_ids).await.coordinator
}

pub fn reserve_command(customer_id: &str, event_seat_ids: &[&str]) -> ReserveSeats {
    ReserveSeats {
        tenant_id: TENANT.into(),
        customer_id: customer_id.into(),
        event_id: EVENT.into(),
        event_seat_ids: event_seat_ids.iter().map(|id| id.to_string()).collect(),
        now: NOW,
    }
}
