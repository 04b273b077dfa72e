use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::event_seats::use_cases::list_event_seats::queries_port::EventSeatView;
use crate::shared::core::primitives::now_millis;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlEventSeat {
    pub event_seat_id: String,
    pub event_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub status: String,
    pub until: Option<i64>,
}

impl From<EventSeatView> for GqlEventSeat {
    fn from(v: EventSeatView) -> Self {
        Self {
            event_seat_id: v.event_seat_id,
            event_id: v.event_id,
            section: v.section,
            row_label: v.row_label,
            seat_number: v.seat_number,
            price_cents: v.price_cents,
            status: v.status,
            until: v.until,
        }
    }
}

#[derive(Default)]
pub struct EventSeatsQuery;

#[Object]
impl EventSeatsQuery {
    async fn event_seats(
        &self,
        context: &Context<'_>,
        tenant_id: String,
        event_id: String,
        status: Option<String>,
    ) -> GqlResult<Vec<GqlEventSeat>> {
        let state = context.data_unchecked::<AppState>();
        state.seat_projector.catch_up().await?;
        let seats = state
            .seat_queries
            .list_by_event(&tenant_id, &event_id, status.as_deref(), now_millis())
            .await?;
        Ok(seats.into_iter().map(Into::into).collect())
    }
}
