use crate::modules::bookings::core::intents::BookingIntent;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

/// Translate booking intents into outbox rows and enqueue them.
/// Each intent corresponds to one new version: starting_version + index + 1.
pub async fn dispatch_intents(
    outbox: &impl DomainOutbox,
    stream_id: &str,
    starting_version: i64,
    topic: &str,
    intents: Vec<BookingIntent>,
) -> Result<(), OutboxError> {
    for (i, intent) in intents.into_iter().enumerate() {
        let stream_version = starting_version + i as i64 + 1;
        match intent {
            BookingIntent::PublishBookingStatusChanged { payload } => {
                outbox
                    .enqueue(OutboxRow {
                        topic: topic.to_string(),
                        event_type: "BookingStatusChanged".to_string(),
                        event_version: 1,
                        stream_id: stream_id.to_string(),
                        stream_version,
                        occurred_at: payload.occurred_at,
                        payload: serde_json::to_value(payload)
                            .map_err(|e| OutboxError::Validation(e.to_string()))?,
                    })
                    .await?;
            }
        }
    }
    Ok(())
}
