use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::bookings::use_cases::get_booking::inbound::graphql::GqlBooking;
use crate::modules::bookings::use_cases::reserve_seats::command::ReserveSeats;
use crate::shared::core::primitives::now_millis;
use crate::shell::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn reserve_seats(
        &self,
        context: &Context<'_>,
        tenant_id: String,
        customer_id: String,
        event_id: String,
        event_seat_ids: Vec<String>,
    ) -> GqlResult<GqlBooking> {
        let state = context.data_unchecked::<AppState>();
        let booking = state
            .coordinator
            .reserve_seats(ReserveSeats {
                tenant_id: tenant_id.clone(),
                customer_id,
                event_id,
                event_seat_ids,
                now: now_millis(),
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        read_back(state, &tenant_id, &booking.booking_id).await
    }

    async fn cancel_booking(
        &self,
        context: &Context<'_>,
        tenant_id: String,
        booking_id: String,
    ) -> GqlResult<GqlBooking> {
        let state = context.data_unchecked::<AppState>();
        state
            .coordinator
            .cancel_booking(&tenant_id, &booking_id, now_millis())
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        read_back(state, &tenant_id, &booking_id).await
    }
}

// Project inline so the answer reflects the write.
async fn read_back(state: &AppState, tenant_id: &str, booking_id: &str) -> GqlResult<GqlBooking> {
    state.booking_projector.catch_up().await?;
    state
        .booking_queries
        .get(tenant_id, booking_id, now_millis())
        .await?
        .map(Into::into)
        .ok_or_else(|| async_graphql::Error::new(format!("booking {booking_id} not found")))
}
