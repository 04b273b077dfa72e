use axum::{
    Json,
    extract::rejection::QueryRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListBookingsParams {
    pub customer_id: String,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

async fn catch_up(state: &AppState) {
    if let Err(error) = state.booking_projector.catch_up().await {
        tracing::warn!(%error, "booking read model is behind, serving the last projected state");
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path((tenant_id, booking_id)): Path<(String, String)>,
) -> Response {
    catch_up(&state).await;
    match state
        .booking_queries
        .get(&tenant_id, &booking_id, now_millis())
        .await
    {
        Ok(Some(booking)) => Json(booking).into_response(),
        Ok(None) => error_response(ApplicationError::NotFound(format!("booking {booking_id}"))),
        Err(error) => error_response(ApplicationError::from(error)),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    params: Result<Query<ListBookingsParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    catch_up(&state).await;
    match state
        .booking_queries
        .list_by_customer(
            &tenant_id,
            &params.customer_id,
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(20).min(100),
            now_millis(),
        )
        .await
    {
        Ok(bookings) => Json(bookings).into_response(),
        Err(error) => error_response(ApplicationError::from(error)),
    }
}
