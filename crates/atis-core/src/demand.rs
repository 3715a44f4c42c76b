//! Time-of-day travel demand.
//!
//! Commuter departures cluster around rush hours.  `MultimodalDistribution`
//! models this as an equally weighted set of normal peaks:
//!
//! ```text
//! pdf(t)  = Σ_k  N(t; mean_k, std_k)
//! sample  = draw from N(mean_k, std_k) for a uniformly chosen k
//! ```
//!
//! The pdf is intentionally the plain *sum* of component densities (not the
//! mean): the distribution-extrapolated predictor multiplies it by the total
//! population to obtain an expected edge volume.

use rand_distr::Normal;

use crate::time::HOURS_PER_DAY;
use crate::{CoreError, CoreResult, SimRng};

/// Rejection-sampling budget for [`MultimodalDistribution::sample_within`].
const MAX_DRAWS: u32 = 10_000;

/// One rush-hour peak: a normal distribution over the hour of day.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandPeak {
    pub mean: f64,
    pub std:  f64,
}

impl DemandPeak {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Normal probability density at `x`.
    #[inline]
    pub fn pdf(&self, x: f64) -> f64 {
        let var = self.std * self.std;
        (-(x - self.mean).powi(2) / (2.0 * var)).exp() / (2.0 * std::f64::consts::PI * var).sqrt()
    }

    fn validate(&self) -> CoreResult<()> {
        if !self.mean.is_finite() || !self.std.is_finite() || self.std <= 0.0 {
            return Err(CoreError::InvalidPeak {
                mean:   self.mean,
                std:    self.std,
                reason: "mean must be finite and std strictly positive".into(),
            });
        }
        Ok(())
    }
}

/// A mixture of normal peaks describing when commuters leave home.
///
/// Serialized as its list of peaks; deserializing runs the same checks as
/// [`new`](Self::new).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<DemandPeak>", into = "Vec<DemandPeak>"))]
pub struct MultimodalDistribution {
    peaks: Vec<DemandPeak>,
}

impl MultimodalDistribution {
    /// Build from a non-empty list of valid peaks.
    pub fn new(peaks: Vec<DemandPeak>) -> CoreResult<Self> {
        if peaks.is_empty() {
            return Err(CoreError::Config("demand distribution needs at least one peak".into()));
        }
        for p in &peaks {
            p.validate()?;
        }
        Ok(Self { peaks })
    }

    /// Morning (08:00 ± 3 h) and evening (18:00 ± 3 h) rush hours.
    pub fn commuter() -> Self {
        Self {
            peaks: vec![DemandPeak::new(8.0, 3.0), DemandPeak::new(18.0, 3.0)],
        }
    }

    pub fn peaks(&self) -> &[DemandPeak] {
        &self.peaks
    }

    /// Sum of the component densities at hour `t`.
    pub fn pdf(&self, t: f64) -> f64 {
        self.peaks.iter().map(|p| p.pdf(t)).sum()
    }

    /// Draw one value: choose a peak uniformly, then sample it.
    pub fn sample(&self, rng: &mut SimRng) -> CoreResult<f64> {
        let peak = *rng
            .choose(&self.peaks)
            .ok_or_else(|| CoreError::Config("demand distribution has no peaks".into()))?;
        let normal = Normal::new(peak.mean, peak.std).map_err(|e| CoreError::InvalidPeak {
            mean:   peak.mean,
            std:    peak.std,
            reason: e.to_string(),
        })?;
        Ok(rng.draw(&normal))
    }

    /// Draw until the value falls strictly inside `(lo, hi)`.
    ///
    /// # Errors
    /// [`CoreError::DepartureWindow`] if no draw lands inside the window
    /// within a fixed budget (peaks placed far outside the window).
    pub fn sample_within(&self, rng: &mut SimRng, lo: f64, hi: f64) -> CoreResult<f64> {
        for _ in 0..MAX_DRAWS {
            let t = self.sample(rng)?;
            if lo < t && t < hi {
                return Ok(t);
            }
        }
        Err(CoreError::DepartureWindow { lo, hi, attempts: MAX_DRAWS })
    }

    /// Departure hour inside the first simulated day.
    #[inline]
    pub fn sample_departure(&self, rng: &mut SimRng) -> CoreResult<f64> {
        self.sample_within(rng, 0.0, HOURS_PER_DAY)
    }
}

impl TryFrom<Vec<DemandPeak>> for MultimodalDistribution {
    type Error = CoreError;

    fn try_from(peaks: Vec<DemandPeak>) -> CoreResult<Self> {
        Self::new(peaks)
    }
}

impl From<MultimodalDistribution> for Vec<DemandPeak> {
    fn from(d: MultimodalDistribution) -> Self {
        d.peaks
    }
}

impl Default for MultimodalDistribution {
    fn default() -> Self {
        Self::commuter()
    }
}
