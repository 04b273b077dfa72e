// Put the seats of one event occurrence on sale.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSpec {
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEventSeats {
    pub tenant_id: String,
    pub event_id: String,
    pub seats: Vec<SeatSpec>,
    pub opened_at: i64,
}
