// Crate entry point. Declares the module tree; no business logic here.

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod application {
        pub mod errors;
        pub mod retry;
    }
    pub mod infrastructure {
        pub mod event_store;
        pub mod intent_outbox;
        pub mod projector;
        pub mod watermark;
    }
}

pub mod modules {
    pub mod event_seats {
        pub mod core {
            pub mod commands;
            pub mod decide;
            pub mod decision;
            pub mod events;
            pub mod evolve;
            pub mod intents;
            pub mod state;
        }
        pub mod use_cases {
            pub mod open_event_seats {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod change_seat_status {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_event_seats {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod intent_outbox;
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
    }

    pub mod bookings {
        pub mod core {
            pub mod commands;
            pub mod decide;
            pub mod decision;
            pub mod events;
            pub mod evolve;
            pub mod intents;
            pub mod state;
        }
        pub mod use_cases {
            pub mod change_booking_status {
                pub mod handler;
            }
            pub mod reserve_seats {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod settle_booking {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod expire_reservations {
                pub mod handler;
            }
            pub mod get_booking {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod projection;
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod intent_outbox;
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
    }
}

pub mod shell;
