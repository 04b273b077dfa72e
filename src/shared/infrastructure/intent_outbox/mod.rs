// The outbox is where decided intents wait to be published.
//
// Purpose
// - Record one row per intent, keyed by the stream version that produced it,
//   on the topic of its aggregate (`event-seats.v1`, `bookings.v1`).
//
// Responsibilities
// - Refuse rows that could never be published or deduplicated.
// - Refuse a second row for the same stream version.
//
// Boundaries
// - Publishing to a broker is someone else's job; adapters only enqueue.

use async_trait::async_trait;
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct OutboxRow {
    pub topic: String,
    pub event_type: String,
    pub event_version: i32,
    pub stream_id: String,
    pub stream_version: i64,
    pub occurred_at: i64,
    pub payload: Json,
}

impl OutboxRow {
    pub fn validate(&self) -> Result<(), OutboxError> {
        for (field, value) in [
            ("topic", &self.topic),
            ("event_type", &self.event_type),
            ("stream_id", &self.stream_id),
        ] {
            if value.trim().is_empty() {
                return Err(OutboxError::Validation(format!("{field} must not be empty")));
            }
        }
        if self.stream_version < 1 {
            return Err(OutboxError::Validation(format!(
                "stream_version must be positive, got {}",
                self.stream_version
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("duplicate outbox row for stream {stream_id} v{stream_version}")]
    Duplicate {
        stream_id: String,
        stream_version: i64,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("transient backend error: {0}")]
    Transient(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl OutboxError {
    /// Whether enqueueing the same row again later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, OutboxError::Transient(_))
    }
}

#[async_trait]
pub trait DomainOutbox: Send + Sync {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError>;
}

pub mod in_memory;

#[cfg(test)]
mod outbox_row_tests {
    use super::*;
    use rstest::rstest;

    fn row() -> OutboxRow {
        OutboxRow {
            topic: "bookings.v1".to_string(),
            event_type: "BookingStatusChanged".to_string(),
            event_version: 1,
            stream_id: "Booking-t-1-b-1".to_string(),
            stream_version: 1,
            occurred_at: 0,
            payload: serde_json::json!({ "status": "reserved" }),
        }
    }

    #[rstest]
    fn it_should_accept_a_complete_row() {
        assert!(row().validate().is_ok());
    }

    #[rstest]
    #[case::topic(OutboxRow { topic: " ".into(), ..row() }, "topic")]
    #[case::event_type(OutboxRow { event_type: String::new(), ..row() }, "event_type")]
    #[case::stream_id(OutboxRow { stream_id: String::new(), ..row() }, "stream_id")]
    #[case::stream_version(OutboxRow { stream_version: 0, ..row() }, "stream_version")]
    fn it_should_reject_a_row_that_cannot_be_published(#[case] row: OutboxRow, #[case] field: &str) {
        match row.validate() {
            Err(OutboxError::Validation(message)) => assert!(message.contains(field)),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[rstest]
    #[case(OutboxError::Transient("timeout".into()), true)]
    #[case(OutboxError::Backend("gone".into()), false)]
    #[case(OutboxError::Validation("bad".into()), false)]
    fn it_should_tell_transient_failures_apart(#[case] error: OutboxError, #[case] expected: bool) {
        assert_eq!(error.is_transient(), expected);
    }
}
