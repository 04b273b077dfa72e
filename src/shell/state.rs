use crate::modules::bookings::adapters::outbound::projections_in_memory::InMemoryBookingProjections;
use crate::modules::bookings::core::events::BookingEvent;
use crate::modules::bookings::use_cases::change_booking_status::handler::BookingHandler;
use crate::modules::bookings::use_cases::expire_reservations::handler::ReservationSweeper;
use crate::modules::bookings::use_cases::get_booking::handler::{
    BOOKINGS_PROJECTOR, BookingProjection,
};
use crate::modules::bookings::use_cases::get_booking::queries_port::BookingQueries;
use crate::modules::bookings::use_cases::reserve_seats::handler::{
    ReservationCoordinator, ReservationSettings,
};
use crate::modules::event_seats::adapters::outbound::projections_in_memory::InMemoryEventSeatProjections;
use crate::modules::event_seats::core::events::EventSeatEvent;
use crate::modules::event_seats::use_cases::change_seat_status::handler::EventSeatHandler;
use crate::modules::event_seats::use_cases::list_event_seats::handler::{
    SEAT_MAP_PROJECTOR, SeatMapProjection,
};
use crate::modules::event_seats::use_cases::list_event_seats::queries_port::EventSeatQueries;
use crate::modules::event_seats::use_cases::open_event_seats::handler::OpenEventSeatsHandler;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shared::infrastructure::projector::Projector;
use crate::shared::infrastructure::watermark::in_memory::InMemoryWatermarks;
use std::sync::Arc;

pub const SEAT_TOPIC: &str = "event-seats.v1";
pub const BOOKING_TOPIC: &str = "bookings.v1";

pub type SeatStore = InMemoryEventStore<EventSeatEvent>;
pub type BookingStore = InMemoryEventStore<BookingEvent>;
pub type Seats = EventSeatHandler<SeatStore, InMemoryDomainOutbox>;
pub type OpenSeats = OpenEventSeatsHandler<SeatStore, InMemoryDomainOutbox>;
pub type Bookings = BookingHandler<BookingStore, InMemoryDomainOutbox>;
pub type Coordinator = ReservationCoordinator<SeatStore, BookingStore, InMemoryDomainOutbox>;
pub type Sweeper = ReservationSweeper<SeatStore, BookingStore, InMemoryDomainOutbox>;
pub type SeatMapProjector = Projector<
    EventSeatEvent,
    SeatStore,
    SeatMapProjection<InMemoryEventSeatProjections>,
    InMemoryWatermarks,
>;
pub type BookingProjector = Projector<
    BookingEvent,
    BookingStore,
    BookingProjection<InMemoryBookingProjections>,
    InMemoryWatermarks,
>;

#[derive(Clone)]
pub struct AppState {
    pub settings: ReservationSettings,
    pub seats: Arc<Seats>,
    pub open_seats: Arc<OpenSeats>,
    pub coordinator: Arc<Coordinator>,
    pub seat_queries: Arc<dyn EventSeatQueries>,
    pub booking_queries: Arc<dyn BookingQueries>,
    pub seat_projector: Arc<SeatMapProjector>,
    pub booking_projector: Arc<BookingProjector>,
    pub sweeper: Arc<Sweeper>,
    pub outbox: Arc<InMemoryDomainOutbox>,
}

impl AppState {
    pub fn in_memory(settings: ReservationSettings, max_append_attempts: u32) -> Self {
        Self::with_stores(
            InMemoryEventStore::new(),
            InMemoryEventStore::new(),
            settings,
            max_append_attempts,
        )
    }

    /// Wires every handler, projector and the sweeper around the given stores.
    pub fn with_stores(
        seat_store: SeatStore,
        booking_store: BookingStore,
        settings: ReservationSettings,
        max_append_attempts: u32,
    ) -> Self {
        let seat_store = Arc::new(seat_store);
        let booking_store = Arc::new(booking_store);
        let outbox = Arc::new(InMemoryDomainOutbox::new());
        let watermarks = Arc::new(InMemoryWatermarks::new());

        let seats = Arc::new(EventSeatHandler::new(
            SEAT_TOPIC,
            seat_store.clone(),
            outbox.clone(),
            max_append_attempts,
        ));
        let bookings = Arc::new(BookingHandler::new(
            BOOKING_TOPIC,
            booking_store.clone(),
            outbox.clone(),
            max_append_attempts,
        ));
        let coordinator = Arc::new(ReservationCoordinator::new(
            seats.clone(),
            bookings,
            settings,
        ));

        let seat_map = Arc::new(InMemoryEventSeatProjections::new());
        let booking_rows = Arc::new(InMemoryBookingProjections::new());
        let seat_projector = Arc::new(Projector::new(
            SEAT_MAP_PROJECTOR,
            seat_store,
            Arc::new(SeatMapProjection::new(seat_map.clone())),
            watermarks.clone(),
        ));
        let booking_projector = Arc::new(Projector::new(
            BOOKINGS_PROJECTOR,
            booking_store,
            Arc::new(BookingProjection::new(booking_rows.clone())),
            watermarks,
        ));

        let seat_queries: Arc<dyn EventSeatQueries> = seat_map;
        let booking_queries: Arc<dyn BookingQueries> = booking_rows;
        let sweeper = Arc::new(ReservationSweeper::new(
            coordinator.clone(),
            seat_queries.clone(),
            booking_queries.clone(),
        ));

        Self {
            settings,
            open_seats: Arc::new(OpenEventSeatsHandler::new(seats.clone())),
            seats,
            coordinator,
            seat_queries,
            booking_queries,
            seat_projector,
            booking_projector,
            sweeper,
            outbox,
        }
    }
}
