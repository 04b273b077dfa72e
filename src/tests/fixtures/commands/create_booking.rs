use crate::modules::bookings::core::commands::CreateBooking;

pub struct CreateBookingBuilder {
    inner: CreateBooking,
}

impl Default for CreateBookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl CreateBookingBuilder {
    pub fn new() -> Self {
        Self {
            inner: CreateBooking {
                tenant_id: "tenant-0001".to_string(),
                booking_id: "booking-0001".to_string(),
                customer_id: "customer-0001".to_string(),
                event_id: "event-0001".to_string(),
                event_seat_ids: vec!["seat-0001".to_string(), "seat-0002".to_string()],
                max_seats: 10,
                created_at: 1_700_000_000_000,
            },
        }
    }

    pub fn booking_id(mut self, v: impl Into<String>) -> Self {
        self.inner.booking_id = v.into();
        self
    }

    pub fn customer_id(mut self, v: impl Into<String>) -> Self {
        self.inner.customer_id = v.into();
        self
    }

    pub fn event_seat_ids(mut self, v: &[&str]) -> Self {
        self.inner.event_seat_ids = v.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn max_seats(mut self, v: usize) -> Self {
        self.inner.max_seats = v;
        self
    }

    pub fn created_at(mut self, v: i64) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn build(self) -> CreateBooking {
        self.inner
    }
}
