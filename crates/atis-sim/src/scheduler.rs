//! Time-ordered event queue.
//!
//! # Ordering
//!
//! Events pop in ascending `at`; events with equal `at` pop in the order they
//! were scheduled.  Each accepted event gets a sequence number from a
//! monotonic counter and the heap orders on `(at, seq)`, so the result does
//! not depend on heap internals.
//!
//! # Horizon
//!
//! Events that handlers produce at or after the horizon are refused by
//! [`EventScheduler::schedule`] and only counted.  Events placed before the
//! run starts go through [`EventScheduler::seed`], which accepts any time: a
//! commuter departing after the horizon is still created, and is truncated
//! once its first edge entry is refused.
//!
//! # Pending guided edge exits
//!
//! A per-edge counter tracks queued `EdgeEnd` events of guided actors: it is
//! bumped when one is accepted and lowered when one is popped.  This backs
//! the [`PendingEdgeQuery`] view handed to predictors.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use atis_core::{EdgeId, SimTime};
use atis_predict::PendingEdgeQuery;

use crate::event::{Event, EventKind};

struct Queued {
    at:    SimTime,
    seq:   u64,
    event: Event,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

/// Min-queue of [`Event`]s bounded by a horizon.
pub struct EventScheduler {
    heap:           BinaryHeap<Reverse<Queued>>,
    next_seq:       u64,
    horizon:        SimTime,
    dropped:        u64,
    pending_guided: FxHashMap<EdgeId, usize>,
}

impl EventScheduler {
    pub fn new(horizon: SimTime) -> Self {
        Self {
            heap:           BinaryHeap::new(),
            next_seq:       0,
            horizon,
            dropped:        0,
            pending_guided: FxHashMap::default(),
        }
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Enqueue `event` if it happens strictly before the horizon.
    ///
    /// Returns `false` (and counts the event as dropped) otherwise.
    pub fn schedule(&mut self, event: Event) -> bool {
        if event.at >= self.horizon {
            log::trace!("{}: dropping {} beyond horizon {}", event.at, event.label(), self.horizon);
            self.dropped += 1;
            return false;
        }
        self.push(event);
        true
    }

    /// Enqueue `event` regardless of the horizon.  Used for the creation and
    /// accident events placed before the run.
    pub fn seed(&mut self, event: Event) {
        self.push(event);
    }

    fn push(&mut self, event: Event) {
        if let EventKind::EdgeEnd { edge, guided: true, .. } = event.kind {
            *self.pending_guided.entry(edge).or_insert(0) += 1;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Queued { at: event.at, seq, event }));
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        let Reverse(queued) = self.heap.pop()?;
        if let EventKind::EdgeEnd { edge, guided: true, .. } = queued.event.kind {
            if let Some(n) = self.pending_guided.get_mut(&edge) {
                *n -= 1;
                if *n == 0 {
                    self.pending_guided.remove(&edge);
                }
            }
        }
        Some(queued.event)
    }

    /// Time of the next event without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(q)| q.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Events refused because they fell on or after the horizon.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl PendingEdgeQuery for EventScheduler {
    fn count_pending_users_on_edge(&self, edge: EdgeId) -> usize {
        self.pending_guided.get(&edge).copied().unwrap_or(0)
    }
}
