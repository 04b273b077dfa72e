use crate::modules::bookings::core::events::v1::BookingCreatedV1;
use crate::tests::fixtures::commands::create_booking::CreateBookingBuilder;

pub fn make_booking_created_v1_event() -> BookingCreatedV1 {
    let command = CreateBookingBuilder::new().build();
    BookingCreatedV1 {
        tenant_id: command.tenant_id,
        booking_id: command.booking_id,
        customer_id: command.customer_id,
        event_id: command.event_id,
        event_seat_ids: command.event_seat_ids,
        created_at: command.created_at,
    }
}
