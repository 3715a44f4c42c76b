//! US Bureau of Public Roads (BPR) link performance function.
//!
//! ```text
//! t(v) = t_free * (1 + α * (v / c)^β)      α = 0.15, β = 4
//! ```
//!
//! Convex and non-decreasing in `v`; exactly `t_free` at `v = 0`, `1.15 ×`
//! at capacity, `3.4 ×` at twice capacity.

pub const BPR_ALPHA: f64 = 0.15;
pub const BPR_BETA: i32 = 4;

/// Travel time over a link with the given free-flow time and capacity when
/// `volume` vehicles share it.
#[inline]
pub fn bpr_travel_time(free_flow: f64, capacity: f64, volume: f64) -> f64 {
    free_flow * (1.0 + BPR_ALPHA * (volume / capacity).powi(BPR_BETA))
}
