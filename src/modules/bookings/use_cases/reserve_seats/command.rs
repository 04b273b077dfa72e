// Reserve a set of seats of one event for a customer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveSeats {
    pub tenant_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub event_seat_ids: Vec<String>,
    pub now: i64,
}
