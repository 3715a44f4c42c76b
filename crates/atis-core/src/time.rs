//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous and measured in **simulated hours** from the start of
//! the run (hour 0 is midnight of the first day).  Events carry a `SimTime`
//! and the scheduler orders them by it, so `SimTime` must be totally
//! ordered: comparisons go through [`f64::total_cmp`], which also gives NaN a
//! fixed place instead of poisoning the queue.

use std::cmp::Ordering;
use std::fmt;

/// Hours in one simulated day.  Departure times are drawn inside `(0, DAY)`.
pub const HOURS_PER_DAY: f64 = 24.0;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in hours.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn hours(h: f64) -> SimTime {
        SimTime(h)
    }

    #[inline]
    pub fn as_hours(self) -> f64 {
        self.0
    }

    /// Hours elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<f64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}h", self.0)
    }
}
