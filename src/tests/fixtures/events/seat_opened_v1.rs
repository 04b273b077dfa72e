use crate::modules::event_seats::core::events::v1::SeatOpenedV1;
use crate::tests::fixtures::commands::open_event_seat::OpenEventSeatBuilder;

/// Canonical opened seat, derived from the default open command.
pub fn make_seat_opened_v1_event() -> SeatOpenedV1 {
    let command = OpenEventSeatBuilder::new().build();
    SeatOpenedV1 {
        tenant_id: command.tenant_id,
        event_id: command.event_id,
        event_seat_id: command.event_seat_id,
        section: command.section,
        row_label: command.row_label,
        seat_number: command.seat_number,
        price_cents: command.price_cents,
        opened_at: command.opened_at,
    }
}
