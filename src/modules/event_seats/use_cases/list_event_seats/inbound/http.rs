use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListEventSeatsParams {
    pub status: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path((tenant_id, event_id)): Path<(String, String)>,
    Query(params): Query<ListEventSeatsParams>,
) -> Response {
    if let Err(error) = state.seat_projector.catch_up().await {
        tracing::warn!(%error, "seat map is behind, serving the last projected state");
    }
    match state
        .seat_queries
        .list_by_event(&tenant_id, &event_id, params.status.as_deref(), now_millis())
        .await
    {
        Ok(seats) => Json(seats).into_response(),
        Err(error) => error_response(ApplicationError::from(error)),
    }
}
