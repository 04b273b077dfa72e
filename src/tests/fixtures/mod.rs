// Shared test fixtures, compiled into the crate only under cfg(test).

pub mod app_state;

pub mod commands {
    pub mod create_booking;
    pub mod open_event_seat;
}

pub mod events {
    pub mod booking_created_v1;
    pub mod seat_opened_v1;
}
