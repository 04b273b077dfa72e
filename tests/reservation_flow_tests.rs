// Full booking lifecycle driven through the HTTP router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rstest::{fixture, rstest};
use seat_reservations::modules::bookings::use_cases::reserve_seats::handler::ReservationSettings;
use seat_reservations::shell::http::router;
use seat_reservations::shell::state::{AppState, BOOKING_TOPIC, SEAT_TOPIC};
use serde_json::{Value, json};
use tower::ServiceExt;

const SEATS: &str = "/tenants/tenant-0001/events/event-0001/seats";
const BOOKINGS: &str = "/tenants/tenant-0001/bookings";

struct App {
    state: AppState,
    router: Router,
}

impl App {
    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn seat_statuses(&self) -> Vec<String> {
        let (status, body) = self.send("GET", SEATS, None).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .unwrap()
            .iter()
            .map(|s| s["status"].as_str().unwrap().to_string())
            .collect()
    }
}

#[fixture]
async fn app() -> App {
    let state = AppState::in_memory(ReservationSettings::default(), 5);
    let app = App {
        router: router(state.clone()),
        state,
    };
    let seats: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "event_seat_id": format!("s-{n}"),
                "section": "A",
                "row_label": "1",
                "seat_number": n.to_string(),
                "price_cents": 2_500 * n,
            })
        })
        .collect();
    let (status, _) = app.send("POST", SEATS, Some(json!({ "seats": seats }))).await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

#[rstest]
#[tokio::test]
async fn it_should_reserve_confirm_pay_and_refund_a_booking(#[future] app: App) {
    let app = app.await;

    let (status, booking) = app
        .send(
            "POST",
            BOOKINGS,
            Some(json!({
                "customer_id": "c-1",
                "event_id": "event-0001",
                "event_seat_ids": ["s-1", "s-2"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "reserved");
    assert_eq!(booking["total_cents"], 7_500);
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();
    assert_eq!(app.seat_statuses().await, ["reserved", "reserved", "available"]);

    let (status, confirmed) = app
        .send("POST", &format!("{BOOKINGS}/{booking_id}/confirm"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(app.seat_statuses().await, ["sold", "sold", "available"]);

    let (status, _) = app
        .send(
            "POST",
            &format!("{BOOKINGS}/{booking_id}/payment"),
            Some(json!({ "amount_cents": 7_000, "payment_reference": "pay-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "partial payments are rejected");

    let (status, paid) = app
        .send(
            "POST",
            &format!("{BOOKINGS}/{booking_id}/payment"),
            Some(json!({ "amount_cents": 7_500, "payment_reference": "pay-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_reference"], "pay-1");

    let (status, read) = app
        .send("GET", &format!("{BOOKINGS}/{booking_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["status"], "paid");
    assert!(read["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["status"] == "sold"));

    let (status, refunded) = app
        .send("POST", &format!("{BOOKINGS}/{booking_id}/refund"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refunded["status"], "refunded");
    assert_eq!(app.seat_statuses().await, ["available", "available", "available"]);

    let seat_rows = app.state.outbox.rows_for_topic(SEAT_TOPIC).await;
    let booking_rows = app.state.outbox.rows_for_topic(BOOKING_TOPIC).await;
    assert!(!seat_rows.is_empty());
    assert_eq!(booking_rows.len(), 5, "created, reserved, confirmed, paid, refunded");
}

#[rstest]
#[tokio::test]
async fn it_should_free_the_seats_of_a_cancelled_booking(#[future] app: App) {
    let app = app.await;
    let (_, booking) = app
        .send(
            "POST",
            BOOKINGS,
            Some(json!({
                "customer_id": "c-1",
                "event_id": "event-0001",
                "event_seat_ids": ["s-3"],
            })),
        )
        .await;
    let booking_id = booking["booking_id"].as_str().unwrap().to_string();

    let (status, cancelled) = app
        .send("POST", &format!("{BOOKINGS}/{booking_id}/cancel"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancel_reason"], "customer");
    assert_eq!(app.seat_statuses().await, ["available", "available", "available"]);

    let (status, _) = app
        .send("POST", &format!("{BOOKINGS}/{booking_id}/confirm"), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[rstest]
#[tokio::test]
async fn it_should_hide_other_tenants_data(#[future] app: App) {
    let app = app.await;
    let (status, body) = app
        .send("GET", "/tenants/tenant-other/events/event-0001/seats", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app
        .send(
            "POST",
            "/tenants/tenant-other/bookings",
            Some(json!({
                "customer_id": "c-1",
                "event_id": "event-0001",
                "event_seat_ids": ["s-1"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn it_should_list_a_customers_bookings(#[future] app: App) {
    let app = app.await;
    for seat in ["s-1", "s-2"] {
        let (status, _) = app
            .send(
                "POST",
                BOOKINGS,
                Some(json!({
                    "customer_id": "c-1",
                    "event_id": "event-0001",
                    "event_seat_ids": [seat],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = app
        .send("GET", &format!("{BOOKINGS}?customer_id=c-1"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}
