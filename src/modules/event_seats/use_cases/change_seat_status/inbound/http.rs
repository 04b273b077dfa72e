use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::event_seats::core::commands::EventSeatCommand;
use crate::modules::event_seats::core::events::v1::ReleaseReason;
use crate::modules::event_seats::core::state::EventSeat;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::now_millis;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct HoldSeatBody {
    pub customer_id: String,
}

#[derive(Deserialize)]
pub struct ReleaseHoldParams {
    pub customer_id: String,
}

#[derive(Deserialize)]
pub struct BlockSeatBody {
    pub reason: String,
}

#[derive(Serialize)]
pub struct SeatResponse {
    pub event_seat_id: String,
    pub event_id: String,
    pub status: String,
    pub until: Option<i64>,
    pub price_cents: i64,
}

impl From<EventSeat> for SeatResponse {
    fn from(seat: EventSeat) -> Self {
        Self {
            status: seat.status.label().to_string(),
            until: seat.status.until(),
            event_seat_id: seat.event_seat_id,
            event_id: seat.event_id,
            price_cents: seat.price_cents,
        }
    }
}

async fn run(
    state: &AppState,
    tenant_id: &str,
    event_seat_id: &str,
    command: EventSeatCommand,
    success: StatusCode,
) -> Response {
    match state.seats.execute(tenant_id, event_seat_id, command).await {
        Ok(_) if success == StatusCode::NO_CONTENT => StatusCode::NO_CONTENT.into_response(),
        Ok(seat) => (success, Json(SeatResponse::from(seat))).into_response(),
        Err(error) => error_response(error),
    }
}

fn required(field: &str, value: &str) -> Result<(), Response> {
    if value.trim().is_empty() {
        return Err(error_response(ApplicationError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}

pub async fn hold(
    State(state): State<AppState>,
    Path((tenant_id, event_seat_id)): Path<(String, String)>,
    body: Result<Json<HoldSeatBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    if let Err(response) = required("customer_id", &body.customer_id) {
        return response;
    }
    let command = EventSeatCommand::Hold {
        holder_id: body.customer_id,
        now: now_millis(),
        ttl_ms: state.settings.hold_ttl_ms,
    };
    run(&state, &tenant_id, &event_seat_id, command, StatusCode::OK).await
}

pub async fn release_hold(
    State(state): State<AppState>,
    Path((tenant_id, event_seat_id)): Path<(String, String)>,
    params: Result<Query<ReleaseHoldParams>, QueryRejection>,
) -> Response {
    let Ok(Query(params)) = params else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    if let Err(response) = required("customer_id", &params.customer_id) {
        return response;
    }
    let command = EventSeatCommand::Release {
        owner_id: params.customer_id,
        reason: ReleaseReason::HoldReleased,
        now: now_millis(),
    };
    run(&state, &tenant_id, &event_seat_id, command, StatusCode::NO_CONTENT).await
}

pub async fn block(
    State(state): State<AppState>,
    Path((tenant_id, event_seat_id)): Path<(String, String)>,
    body: Result<Json<BlockSeatBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    if let Err(response) = required("reason", &body.reason) {
        return response;
    }
    let command = EventSeatCommand::Block {
        reason: body.reason,
        now: now_millis(),
    };
    run(&state, &tenant_id, &event_seat_id, command, StatusCode::OK).await
}

pub async fn unblock(
    State(state): State<AppState>,
    Path((tenant_id, event_seat_id)): Path<(String, String)>,
) -> Response {
    let command = EventSeatCommand::Unblock { now: now_millis() };
    run(&state, &tenant_id, &event_seat_id, command, StatusCode::OK).await
}

#[cfg(test)]
mod change_seat_status_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::{block, hold, release_hold, unblock};
    use crate::shell::state::AppState;
    use crate::shared::core::primitives::now_millis;
    use crate::tests::fixtures::app_state::{TENANT, make_test_state_with_seats, reserve_command};

    fn app(state: AppState) -> Router {
        Router::new()
            .route(
                "/tenants/{tenant_id}/seats/{event_seat_id}/hold",
                post(hold).delete(release_hold),
            )
            .route(
                "/tenants/{tenant_id}/seats/{event_seat_id}/block",
                post(block).delete(unblock),
            )
            .with_state(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn it_should_return_200_with_the_held_seat() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let response = app(state)
            .oneshot(post_json(
                &format!("/tenants/{TENANT}/seats/s-1/hold"),
                r#"{"customer_id":"c-1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "held");
        assert!(json["until"].is_i64());
    }

    #[tokio::test]
    async fn it_should_return_409_when_another_customer_holds_the_seat() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let uri = format!("/tenants/{TENANT}/seats/s-1/hold");
        let first = app(state.clone())
            .oneshot(post_json(&uri, r#"{"customer_id":"c-1"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app(state)
            .oneshot(post_json(&uri, r#"{"customer_id":"c-2"}"#))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn it_should_return_204_when_the_holder_releases_the_hold() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let uri = format!("/tenants/{TENANT}/seats/s-1/hold");
        app(state.clone())
            .oneshot(post_json(&uri, r#"{"customer_id":"c-1"}"#))
            .await
            .unwrap();

        let response = app(state.clone())
            .oneshot(
                Request::delete(format!("{uri}?customer_id=c-1"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let seat = state.seats.load(TENANT, "s-1").await.unwrap();
        assert_eq!(seat.status.label(), "available");
    }

    #[tokio::test]
    async fn it_should_return_409_when_releasing_a_reserved_seat_as_a_hold() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let mut command = reserve_command("c-1", &["s-1"]);
        command.now = now_millis();
        let booking = state.coordinator.reserve_seats(command).await.unwrap();

        for owner in [booking.booking_id.as_str(), "c-1"] {
            let response = app(state.clone())
                .oneshot(
                    Request::delete(format!(
                        "/tenants/{TENANT}/seats/s-1/hold?customer_id={owner}"
                    ))
                    .body(Body::empty())
                    .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }
        let seat = state.seats.load(TENANT, "s-1").await.unwrap();
        assert_eq!(seat.status.owner(), Some(booking.booking_id.as_str()));
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_seat() {
        let state = make_test_state_with_seats(&[]).await;
        let response = app(state)
            .oneshot(post_json(
                &format!("/tenants/{TENANT}/seats/nope/hold"),
                r#"{"customer_id":"c-1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json_or_blank_fields() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let uri = format!("/tenants/{TENANT}/seats/s-1/hold");
        let invalid = app(state.clone())
            .oneshot(post_json(&uri, "not-json"))
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let blank = app(state)
            .oneshot(post_json(&uri, r#"{"customer_id":"  "}"#))
            .await
            .unwrap();
        assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_block_and_unblock_a_seat() {
        let state = make_test_state_with_seats(&["s-1"]).await;
        let uri = format!("/tenants/{TENANT}/seats/s-1/block");
        let blocked = app(state.clone())
            .oneshot(post_json(&uri, r#"{"reason":"broken"}"#))
            .await
            .unwrap();
        assert_eq!(blocked.status(), StatusCode::OK);

        let hold = app(state.clone())
            .oneshot(post_json(
                &format!("/tenants/{TENANT}/seats/s-1/hold"),
                r#"{"customer_id":"c-1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(hold.status(), StatusCode::CONFLICT);

        let unblocked = app(state)
            .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(unblocked.status(), StatusCode::OK);
    }
}
