use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::bookings::core::state::Booking;
use crate::modules::bookings::use_cases::reserve_seats::inbound::http::BookingResponse;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RecordPaymentBody {
    pub amount_cents: i64,
    pub payment_reference: String,
}

fn respond(result: Result<Booking, ApplicationError>) -> Response {
    match result {
        Ok(booking) => Json(BookingResponse::from(booking)).into_response(),
        Err(error) => error_response(error),
    }
}

pub async fn confirm(
    State(state): State<AppState>,
    Path((tenant_id, booking_id)): Path<(String, String)>,
) -> Response {
    respond(
        state
            .coordinator
            .confirm_booking(&tenant_id, &booking_id, now_millis())
            .await,
    )
}

pub async fn record_payment(
    State(state): State<AppState>,
    Path((tenant_id, booking_id)): Path<(String, String)>,
    body: Result<Json<RecordPaymentBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    if body.amount_cents <= 0 {
        return error_response(ApplicationError::Validation(
            "amount_cents must be positive".into(),
        ));
    }
    respond(
        state
            .coordinator
            .record_payment(
                &tenant_id,
                &booking_id,
                body.amount_cents,
                &body.payment_reference,
                now_millis(),
            )
            .await,
    )
}

pub async fn cancel(
    State(state): State<AppState>,
    Path((tenant_id, booking_id)): Path<(String, String)>,
) -> Response {
    respond(
        state
            .coordinator
            .cancel_booking(&tenant_id, &booking_id, now_millis())
            .await,
    )
}

pub async fn refund(
    State(state): State<AppState>,
    Path((tenant_id, booking_id)): Path<(String, String)>,
) -> Response {
    respond(
        state
            .coordinator
            .refund_booking(&tenant_id, &booking_id, now_millis())
            .await,
    )
}
