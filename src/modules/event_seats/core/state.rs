use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeatStatus {
    Available,
    Held {
        holder_id: String,
        until: i64,
    },
    Reserved {
        booking_id: String,
        customer_id: String,
        until: i64,
    },
    Sold {
        booking_id: String,
        customer_id: String,
    },
    Blocked {
        reason: String,
    },
}

impl SeatStatus {
    /// The status as seen at `now`: a hold or reservation that ran out is available again,
    /// whether or not a release has been recorded yet.
    pub fn effective(&self, now: i64) -> SeatStatus {
        match self {
            SeatStatus::Held { until, .. } | SeatStatus::Reserved { until, .. } if *until <= now => {
                SeatStatus::Available
            }
            other => other.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Held { .. } => "held",
            SeatStatus::Reserved { .. } => "reserved",
            SeatStatus::Sold { .. } => "sold",
            SeatStatus::Blocked { .. } => "blocked",
        }
    }

    /// Holder id for holds, booking id for reservations and sales.
    pub fn owner(&self) -> Option<&str> {
        match self {
            SeatStatus::Held { holder_id, .. } => Some(holder_id),
            SeatStatus::Reserved { booking_id, .. } | SeatStatus::Sold { booking_id, .. } => {
                Some(booking_id)
            }
            SeatStatus::Available | SeatStatus::Blocked { .. } => None,
        }
    }

    pub fn until(&self) -> Option<i64> {
        match self {
            SeatStatus::Held { until, .. } | SeatStatus::Reserved { until, .. } => Some(*until),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSeat {
    pub tenant_id: String,
    pub event_id: String,
    pub event_seat_id: String,
    pub section: String,
    pub row_label: String,
    pub seat_number: String,
    pub price_cents: i64,
    pub status: SeatStatus,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSeatState {
    None,
    Listed(EventSeat),
}
