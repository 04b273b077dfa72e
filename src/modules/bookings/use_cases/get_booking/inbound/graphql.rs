use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::bookings::use_cases::get_booking::queries_port::{BookingView, TicketView};
use crate::shared::core::primitives::now_millis;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTicket {
    pub ticket_id: String,
    pub event_seat_id: String,
    pub price_cents: i64,
    pub status: String,
}

impl From<TicketView> for GqlTicket {
    fn from(v: TicketView) -> Self {
        Self {
            ticket_id: v.ticket_id,
            event_seat_id: v.event_seat_id,
            price_cents: v.price_cents,
            status: v.status,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlBooking {
    pub booking_id: String,
    pub customer_id: String,
    pub event_id: String,
    pub status: String,
    pub tickets: Vec<GqlTicket>,
    pub total_cents: i64,
    pub reserved_until: Option<i64>,
    pub cancel_reason: Option<String>,
}

impl From<BookingView> for GqlBooking {
    fn from(v: BookingView) -> Self {
        Self {
            booking_id: v.booking_id,
            customer_id: v.customer_id,
            event_id: v.event_id,
            status: v.status,
            tickets: v.tickets.into_iter().map(Into::into).collect(),
            total_cents: v.total_cents,
            reserved_until: v.reserved_until,
            cancel_reason: v.cancel_reason,
        }
    }
}

#[derive(Default)]
pub struct BookingsQuery;

#[Object]
impl BookingsQuery {
    async fn booking(
        &self,
        context: &Context<'_>,
        tenant_id: String,
        booking_id: String,
    ) -> GqlResult<Option<GqlBooking>> {
        let state = context.data_unchecked::<AppState>();
        state.booking_projector.catch_up().await?;
        let booking = state
            .booking_queries
            .get(&tenant_id, &booking_id, now_millis())
            .await?;
        Ok(booking.map(Into::into))
    }
}
