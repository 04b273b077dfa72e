// Seat map read model and the translation of seat events into row mutations.
//
// Rows are keyed by stream id, which already carries the tenant.
// `last_event_id` is "stream_id:version" so replays can be recognised.

use crate::modules::event_seats::core::events::EventSeatEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRow {
    pub stream_id: String,
    pub tenant_id: String,
    pub event_id: String,
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub status: String,
    pub owner_id: Option<String>,
    pub until: Option<i64>,
    pub block_reason: Option<String>,
    pub updated_at: i64,
    pub last_event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatStatusPatch {
    pub status: String,
    pub owner_id: Option<String>,
    pub until: Option<i64>,
    pub block_reason: Option<String>,
    pub updated_at: i64,
    pub last_event_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Upsert(SeatRow),
    PatchStatus {
        stream_id: String,
        patch: SeatStatusPatch,
    },
}

pub fn apply(stream_id: &str, version: i64, event: &EventSeatEvent) -> Vec<Mutation> {
    let last_event_id = format!("{stream_id}:{version}");
    let patch = |status: &str, owner_id: Option<&str>, until: Option<i64>, block_reason: Option<&str>| {
        Mutation::PatchStatus {
            stream_id: stream_id.to_string(),
            patch: SeatStatusPatch {
                status: status.to_string(),
                owner_id: owner_id.map(str::to_string),
                until,
                block_reason: block_reason.map(str::to_string),
                updated_at: event.occurred_at(),
                last_event_id: last_event_id.clone(),
            },
        }
    };
    match event {
        EventSeatEvent::SeatOpenedV1(e) => vec![Mutation::Upsert(SeatRow {
            stream_id: stream_id.to_string(),
            tenant_id: e.tenant_id.clone(),
            event_id: e.event_id.clone(),
            event_seat_id: e.event_seat_id.clone(),
            section: e.section.clone(),
            row_label: e.row_label.clone(),
            seat_number: e.seat_number.clone(),
            price_cents: e.price_cents,
            status: "available".to_string(),
            owner_id: None,
            until: None,
            block_reason: None,
            updated_at: e.opened_at,
            last_event_id: Some(last_event_id.clone()),
        })],
        EventSeatEvent::SeatHeldV1(e) => {
            vec![patch("held", Some(e.holder_id.as_str()), Some(e.held_until), None)]
        }
        EventSeatEvent::SeatReservedV1(e) => {
            vec![patch("reserved", Some(e.booking_id.as_str()), Some(e.reserved_until), None)]
        }
        EventSeatEvent::SeatSoldV1(e) => vec![patch("sold", Some(e.booking_id.as_str()), None, None)],
        EventSeatEvent::SeatReleasedV1(_) | EventSeatEvent::SeatUnblockedV1(_) => {
            vec![patch("available", None, None, None)]
        }
        EventSeatEvent::SeatBlockedV1(e) => vec![patch("blocked", None, None, Some(e.reason.as_str()))],
    }
}

#[cfg(test)]
mod seat_map_projection_apply_tests {
    use super::*;
    use crate::modules::event_seats::core::events::v1::SeatReservedV1;
    use crate::tests::fixtures::events::seat_opened_v1::make_seat_opened_v1_event;
    use rstest::rstest;

    #[rstest]
    fn it_should_upsert_a_row_for_an_opened_seat() {
        let event = make_seat_opened_v1_event();
        let mutations = apply("EventSeat-t-s", 1, &EventSeatEvent::SeatOpenedV1(event.clone()));
        assert_eq!(mutations.len(), 1);
        match &mutations[0] {
            Mutation::Upsert(row) => {
                assert_eq!(row.event_seat_id, event.event_seat_id);
                assert_eq!(row.status, "available");
                assert_eq!(row.last_event_id.as_deref(), Some("EventSeat-t-s:1"));
            }
            other => panic!("expected Upsert, got {other:?}"),
        }
    }

    #[rstest]
    fn it_should_patch_the_status_for_a_reservation() {
        let event = EventSeatEvent::SeatReservedV1(SeatReservedV1 {
            event_seat_id: "seat-0001".into(),
            booking_id: "booking-0001".into(),
            customer_id: "customer-0001".into(),
            reserved_until: 9_000,
            reserved_at: 1_000,
        });
        let mutations = apply("EventSeat-t-s", 2, &event);
        assert_eq!(
            mutations,
            vec![Mutation::PatchStatus {
                stream_id: "EventSeat-t-s".into(),
                patch: SeatStatusPatch {
                    status: "reserved".into(),
                    owner_id: Some("booking-0001".into()),
                    until: Some(9_000),
                    block_reason: None,
                    updated_at: 1_000,
                    last_event_id: "EventSeat-t-s:2".into(),
                }
            }]
        );
    }
}
