use crate::modules::event_seats::core::commands::OpenEventSeat;

pub struct OpenEventSeatBuilder {
    inner: OpenEventSeat,
}

impl Default for OpenEventSeatBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl OpenEventSeatBuilder {
    pub fn new() -> Self {
        Self {
            inner: OpenEventSeat {
                tenant_id: "tenant-0001".to_string(),
                event_id: "event-0001".to_string(),
                event_seat_id: "seat-0001".to_string(),
                section: "A".to_string(),
                row_label: "1".to_string(),
                seat_number: "1".to_string(),
                price_cents: 5_000,
                opened_at: 1_700_000_000_000,
            },
        }
    }

    pub fn tenant_id(mut self, v: impl Into<String>) -> Self {
        self.inner.tenant_id = v.into();
        self
    }

    pub fn event_id(mut self, v: impl Into<String>) -> Self {
        self.inner.event_id = v.into();
        self
    }

    pub fn event_seat_id(mut self, v: impl Into<String>) -> Self {
        self.inner.event_seat_id = v.into();
        self
    }

    pub fn section(mut self, v: impl Into<String>) -> Self {
        self.inner.section = v.into();
        self
    }

    pub fn seat_number(mut self, v: impl Into<String>) -> Self {
        self.inner.seat_number = v.into();
        self
    }

    pub fn price_cents(mut self, v: i64) -> Self {
        self.inner.price_cents = v;
        self
    }

    pub fn opened_at(mut self, v: i64) -> Self {
        self.inner.opened_at = v;
        self
    }

    pub fn build(self) -> OpenEventSeat {
        self.inner
    }
}

#[cfg(test)]
mod open_event_seat_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_override_the_defaults() {
        let command = OpenEventSeatBuilder::default()
            .event_seat_id("seat-0042")
            .section("B")
            .price_cents(7_500)
            .build();
        assert_eq!(command.event_seat_id, "seat-0042");
        assert_eq!(command.section, "B");
        assert_eq!(command.price_cents, 7_500);
        assert_eq!(command.tenant_id, "tenant-0001");
    }
}
