pub mod v1;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum EventSeatEvent {
    SeatOpenedV1(v1::SeatOpenedV1),
    SeatHeldV1(v1::SeatHeldV1),
    SeatReservedV1(v1::SeatReservedV1),
    SeatSoldV1(v1::SeatSoldV1),
    SeatReleasedV1(v1::SeatReleasedV1),
    SeatBlockedV1(v1::SeatBlockedV1),
    SeatUnblockedV1(v1::SeatUnblockedV1),
}

impl EventSeatEvent {
    pub fn occurred_at(&self) -> i64 {
        match self {
            EventSeatEvent::SeatOpenedV1(e) => e.opened_at,
            EventSeatEvent::SeatHeldV1(e) => e.held_at,
            EventSeatEvent::SeatReservedV1(e) => e.reserved_at,
            EventSeatEvent::SeatSoldV1(e) => e.sold_at,
            EventSeatEvent::SeatReleasedV1(e) => e.released_at,
            EventSeatEvent::SeatBlockedV1(e) => e.blocked_at,
            EventSeatEvent::SeatUnblockedV1(e) => e.unblocked_at,
        }
    }
}
