use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::bookings::core::state::{Booking, TicketStatus};
use crate::modules::bookings::use_cases::reserve_seats::command::ReserveSeats;
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ReserveSeatsBody {
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct TicketResponse {
    pub ticket_id: String,
    pub event_seat_id: String,
    pub price_cents: i64,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub status: &'static str,
    pub tickets: Vec<TicketResponse>,
    pub total_cents: i64,
    pub reserved_until: Option<i64>,
    pub payment_reference: Option<String>,
    pub cancel_reason: Option<&'static str>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let ticket_status = TicketStatus::for_booking(booking.status)
            .map(|s| s.label())
            .unwrap_or("pending");
        Self {
            tickets: booking
                .tickets
                .into_iter()
                .map(|t| TicketResponse {
                    ticket_id: t.ticket_id,
                    event_seat_id: t.event_seat_id,
                    price_cents: t.price_cents,
                    status: ticket_status,
                })
                .collect(),
            status: booking.status.label(),
            cancel_reason: booking.cancel_reason.map(|r| r.label()),
            booking_id: booking.booking_id,
            customer_id: booking.customer_id,
            event_id: booking.event_id,
            total_cents: booking.total_cents,
            reserved_until: booking.reserved_until,
            payment_reference: booking.payment_reference,
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    body: Result<Json<ReserveSeatsBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ReserveSeats {
        tenant_id,
        customer_id: body.customer_id,
        event_id: body.event_id,
        event_seat_ids: body.event_seat_ids,
        now: now_millis(),
    };

    match state.coordinator.reserve_seats(command).await {
        Ok(booking) => (StatusCode::CREATED, Json(BookingResponse::from(booking))).into_response(),
        Err(error) => error_response(error),
    }
}
