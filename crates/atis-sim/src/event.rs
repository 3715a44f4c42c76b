//! Simulation events.

use atis_core::{ActorId, EdgeId, SimTime};

/// Something that happens at a point in simulated time.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub at:   SimTime,
    pub kind: EventKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// A new actor departs.
    CreateActor,
    /// `actor` enters `edge`.
    EdgeStart { actor: ActorId, edge: EdgeId },
    /// `actor` reaches the end of `edge`.  `guided` is copied from the actor
    /// so the queue can answer pending-user queries without it.
    EdgeEnd { actor: ActorId, edge: EdgeId, guided: bool },
    /// The capacity of `edge` is multiplied by `factor`.
    Accident { edge: EdgeId, factor: f64 },
}

impl Event {
    pub fn create_actor(at: SimTime) -> Self {
        Event { at, kind: EventKind::CreateActor }
    }

    pub fn edge_start(at: SimTime, actor: ActorId, edge: EdgeId) -> Self {
        Event { at, kind: EventKind::EdgeStart { actor, edge } }
    }

    pub fn edge_end(at: SimTime, actor: ActorId, edge: EdgeId, guided: bool) -> Self {
        Event { at, kind: EventKind::EdgeEnd { actor, edge, guided } }
    }

    pub fn accident(at: SimTime, edge: EdgeId, factor: f64) -> Self {
        Event { at, kind: EventKind::Accident { edge, factor } }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self.kind {
            EventKind::CreateActor       => "create-actor",
            EventKind::EdgeStart { .. }  => "edge-start",
            EventKind::EdgeEnd { .. }    => "edge-end",
            EventKind::Accident { .. }   => "accident",
        }
    }
}
