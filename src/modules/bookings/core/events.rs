pub mod v1;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum BookingEvent {
    BookingCreatedV1(v1::BookingCreatedV1),
    BookingReservedV1(v1::BookingReservedV1),
    BookingConfirmedV1(v1::BookingConfirmedV1),
    BookingPaidV1(v1::BookingPaidV1),
    BookingCancelledV1(v1::BookingCancelledV1),
    BookingRefundedV1(v1::BookingRefundedV1),
}

impl BookingEvent {
    pub fn occurred_at(&self) -> i64 {
        match self {
            BookingEvent::BookingCreatedV1(e) => e.created_at,
            BookingEvent::BookingReservedV1(e) => e.reserved_at,
            BookingEvent::BookingConfirmedV1(e) => e.confirmed_at,
            BookingEvent::BookingPaidV1(e) => e.paid_at,
            BookingEvent::BookingCancelledV1(e) => e.cancelled_at,
            BookingEvent::BookingRefundedV1(e) => e.refunded_at,
        }
    }
}

#[cfg(test)]
mod booking_event_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_serialize_with_a_type_tag_and_snake_case_reasons() {
        let event = BookingEvent::BookingCancelledV1(v1::BookingCancelledV1 {
            booking_id: "booking-0001".into(),
            reason: v1::CancelReason::SeatUnavailable,
            cancelled_at: 7,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "BookingCancelledV1");
        assert_eq!(json["reason"], "seat_unavailable");
        let back: BookingEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
