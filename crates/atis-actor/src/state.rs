//! Trip lifecycle.

/// Where an actor is in its trip.
///
/// ```text
/// NotStarted ──start_trip──▶ InTransit ──finalize──▶ Arrived
///                                │
///                                └──────truncate────▶ Truncated
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripState {
    #[default]
    NotStarted,
    InTransit,
    Arrived,
    /// Still travelling (or never departed) when the horizon was reached.
    Truncated,
}

impl TripState {
    /// `Arrived` or `Truncated`.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, TripState::Arrived | TripState::Truncated)
    }
}
