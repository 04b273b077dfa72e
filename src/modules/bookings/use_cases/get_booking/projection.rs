// Booking read model, with the tickets of the booking and their statuses.
//
// Ticket statuses are rewritten on every booking status change so that a
// ticket always mirrors the booking, and through it the seat.

use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::core::state::{BookingStatus, TicketStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRow {
    pub ticket_id: String,
    pub event_seat_id: String,
    pub price_cents: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRow {
    pub stream_id: String,
    pub tenant_id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub tickets: Vec<TicketRow>,
    pub total_cents: i64,
    pub status: String,
    pub reserved_until: Option<i64>,
    pub payment_reference: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPatch {
    pub status: String,
    pub ticket_status: Option<String>,
    pub tickets: Option<Vec<TicketRow>>,
    pub total_cents: Option<i64>,
    pub reserved_until: Option<i64>,
    pub payment_reference: Option<String>,
    pub cancel_reason: Option<String>,
    pub updated_at: i64,
    pub last_event_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert(BookingRow),
    Patch {
        stream_id: String,
        patch: BookingPatch,
    },
}

fn ticket_status(status: BookingStatus) -> Option<String> {
    TicketStatus::for_booking(status).map(|s| s.label().to_string())
}

pub fn apply(stream_id: &str, version: i64, event: &BookingEvent) -> Vec<Mutation> {
    let last_event_id = format!("{stream_id}:{version}");
    let patch = |status: BookingStatus| BookingPatch {
        status: status.label().to_string(),
        ticket_status: ticket_status(status),
        tickets: None,
        total_cents: None,
        reserved_until: None,
        payment_reference: None,
        cancel_reason: None,
        updated_at: event.occurred_at(),
        last_event_id: last_event_id.clone(),
    };
    let mutation = match event {
        BookingEvent::BookingCreatedV1(e) => Mutation::Insert(BookingRow {
            stream_id: stream_id.to_string(),
            tenant_id: e.tenant_id.clone(),
            booking_id: e.booking_id.clone(),
            customer_id: e.customer_id.clone(),
            event_id: e.event_id.clone(),
            event_seat_ids: e.event_seat_ids.clone(),
            tickets: Vec::new(),
            total_cents: 0,
            status: BookingStatus::Pending.label().to_string(),
            reserved_until: None,
            payment_reference: None,
            cancel_reason: None,
            created_at: e.created_at,
            updated_at: e.created_at,
            last_event_id: Some(last_event_id.clone()),
        }),
        BookingEvent::BookingReservedV1(e) => {
            let status = ticket_status(BookingStatus::Reserved).unwrap_or_default();
            Mutation::Patch {
                stream_id: stream_id.to_string(),
                patch: BookingPatch {
                    tickets: Some(
                        e.tickets
                            .iter()
                            .map(|t| TicketRow {
                                ticket_id: t.ticket_id.clone(),
                                event_seat_id: t.event_seat_id.clone(),
                                price_cents: t.price_cents,
                                status: status.clone(),
                            })
                            .collect(),
                    ),
                    total_cents: Some(e.total_cents),
                    reserved_until: Some(e.reserved_until),
                    ..patch(BookingStatus::Reserved)
                },
            }
        }
        BookingEvent::BookingConfirmedV1(_) => Mutation::Patch {
            stream_id: stream_id.to_string(),
            patch: patch(BookingStatus::Confirmed),
        },
        BookingEvent::BookingPaidV1(e) => Mutation::Patch {
            stream_id: stream_id.to_string(),
            patch: BookingPatch {
                payment_reference: Some(e.payment_reference.clone()),
                ..patch(BookingStatus::Paid)
            },
        },
        BookingEvent::BookingCancelledV1(e) => Mutation::Patch {
            stream_id: stream_id.to_string(),
            patch: BookingPatch {
                cancel_reason: Some(e.reason.label().to_string()),
                ..patch(BookingStatus::Cancelled)
            },
        },
        BookingEvent::BookingRefundedV1(_) => Mutation::Patch {
            stream_id: stream_id.to_string(),
            patch: patch(BookingStatus::Refunded),
        },
    };
    vec![mutation]
}
