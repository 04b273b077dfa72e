use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::event_seats::use_cases::open_event_seats::command::{OpenEventSeats, SeatSpec};
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SeatSpecBody {
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
}

#[derive(Deserialize)]
pub struct OpenEventSeatsBody {
    pub seats: Vec<SeatSpecBody>,
}

#[derive(Serialize)]
pub struct OpenEventSeatsResponse {
    pub event_seat_ids: Vec<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path((tenant_id, event_id)): Path<(String, String)>,
    body: Result<Json<OpenEventSeatsBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = OpenEventSeats {
        tenant_id,
        event_id,
        seats: body
            .seats
            .into_iter()
            .map(|s| SeatSpec {
                event_seat_id: s.event_seat_id,
                section: s.section,
                row_label: s.row_label,
                seat_number: s.seat_number,
                price_cents: s.price_cents,
            })
            .collect(),
        opened_at: now_millis(),
    };

    match state.open_seats.handle(command).await {
        Ok(event_seat_ids) => (
            StatusCode::CREATED,
            Json(OpenEventSeatsResponse { event_seat_ids }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
