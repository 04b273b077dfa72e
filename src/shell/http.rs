use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::bookings::use_cases::get_booking::inbound::http as get_booking_http;
use crate::modules::bookings::use_cases::reserve_seats::inbound::http as reserve_http;
use crate::modules::bookings::use_cases::settle_booking::inbound::http as settle_http;
use crate::modules::event_seats::use_cases::change_seat_status::inbound::http as seat_status_http;
use crate::modules::event_seats::use_cases::list_event_seats::inbound::http as list_seats_http;
use crate::modules::event_seats::use_cases::open_event_seats::inbound::http as open_seats_http;
use crate::shared::application::errors::ApplicationError;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route("/health", get(health))
        .route("/graphql", get(graphiql).post(graphql))
        .route(
            "/tenants/{tenant_id}/events/{event_id}/seats",
            post(open_seats_http::handle).get(list_seats_http::handle),
        )
        .route(
            "/tenants/{tenant_id}/seats/{event_seat_id}/hold",
            post(seat_status_http::hold).delete(seat_status_http::release_hold),
        )
        .route(
            "/tenants/{tenant_id}/seats/{event_seat_id}/block",
            post(seat_status_http::block).delete(seat_status_http::unblock),
        )
        .route(
            "/tenants/{tenant_id}/bookings",
            post(reserve_http::handle).get(get_booking_http::list),
        )
        .route(
            "/tenants/{tenant_id}/bookings/{booking_id}",
            get(get_booking_http::get),
        )
        .route(
            "/tenants/{tenant_id}/bookings/{booking_id}/confirm",
            post(settle_http::confirm),
        )
        .route(
            "/tenants/{tenant_id}/bookings/{booking_id}/payment",
            post(settle_http::record_payment),
        )
        .route(
            "/tenants/{tenant_id}/bookings/{booking_id}/cancel",
            post(settle_http::cancel),
        )
        .route(
            "/tenants/{tenant_id}/bookings/{booking_id}/refund",
            post(settle_http::refund),
        )
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Maps an application error onto a status code and a `{"error": ...}` body.
pub fn error_response(error: ApplicationError) -> Response {
    let status = match &error {
        ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Domain(_) => StatusCode::CONFLICT,
        e if e.is_version_mismatch() => StatusCode::CONFLICT,
        ApplicationError::Outbox(e) if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(%error, "request failed");
    } else {
        tracing::debug!(%error, %status, "request rejected");
    }
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
