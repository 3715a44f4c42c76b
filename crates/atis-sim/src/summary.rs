//! Travel-time summaries over finished actors.

use atis_actor::{Actor, TripState};

/// Mean and population standard deviation of a set of travel times.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimeStats {
    pub count: usize,
    pub mean:  f64,
    pub std:   f64,
}

impl TravelTimeStats {
    /// `None` for an empty input.
    pub fn from_times(times: impl IntoIterator<Item = f64>) -> Option<Self> {
        let times: Vec<f64> = times.into_iter().collect();
        if times.is_empty() {
            return None;
        }
        let n = times.len() as f64;
        let mean = times.iter().sum::<f64>() / n;
        let var = times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
        Some(Self { count: times.len(), mean, std: var.sqrt() })
    }
}

/// Guided vs. unguided travel times plus completion counts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSummary {
    pub guided:    Option<TravelTimeStats>,
    pub unguided:  Option<TravelTimeStats>,
    pub arrived:   usize,
    pub truncated: usize,
}

impl ActorSummary {
    /// Summarize any collection of actors, e.g. one run's or the
    /// concatenation of several replicates'.  Actors without a total travel
    /// time are skipped.
    pub fn from_actors<'a>(actors: impl IntoIterator<Item = &'a Actor>) -> Self {
        let mut guided = Vec::new();
        let mut unguided = Vec::new();
        let mut arrived = 0;
        let mut truncated = 0;

        for a in actors {
            match a.state() {
                TripState::Arrived   => arrived += 1,
                TripState::Truncated => truncated += 1,
                _ => {}
            }
            let Some(t) = a.total_travel_time() else { continue };
            if a.is_guided() {
                guided.push(t);
            } else {
                unguided.push(t);
            }
        }

        Self {
            guided:   TravelTimeStats::from_times(guided),
            unguided: TravelTimeStats::from_times(unguided),
            arrived,
            truncated,
        }
    }
}
