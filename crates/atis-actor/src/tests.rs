//! Unit tests for atis-actor.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use atis_core::{ActorId, NodeId};
    use atis_network::presets::{deliverable, PresetNetwork};
    use atis_network::Route;
    use atis_predict::{CurrentAtis, RoutePredictor};

    use crate::Actor;

    pub fn net() -> PresetNetwork {
        deliverable().unwrap()
    }

    pub fn route(p: &PresetNetwork, ids: &[u32]) -> Route {
        Route::from_nodes(&p.network, ids.iter().map(|&i| NodeId(i)).collect()).unwrap()
    }

    pub fn unguided(p: &PresetNetwork, ids: &[u32]) -> Actor {
        Actor::new(ActorId(0), route(p, ids), None)
    }

    pub fn guided(p: &PresetNetwork, ids: &[u32]) -> Actor {
        let predictor: Arc<dyn RoutePredictor> = Arc::new(CurrentAtis);
        Actor::new(ActorId(1), route(p, ids), Some(predictor))
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use atis_core::{NodeId, SimTime};
    use atis_predict::PredictContext;

    use super::helpers::*;
    use crate::{ActorError, TripState};

    #[test]
    fn unguided_follows_base_route_to_arrival() {
        let p = net();
        let ctx = PredictContext::network_only(&p.network);
        let mut a = unguided(&p, &[0, 2, 1, 3]);
        assert_eq!(a.state(), TripState::NotStarted);
        assert_eq!(a.current_node(), None);

        a.start_trip(SimTime::hours(7.0)).unwrap();
        assert_eq!(a.state(), TripState::InTransit);
        assert_eq!(a.departure(), Some(SimTime::hours(7.0)));

        let mut now = SimTime::hours(7.0);
        let expected = [(0, 2), (2, 1), (1, 3)];
        for (i, &(from, to)) in expected.iter().enumerate() {
            let e = a.next_edge(now, &ctx).unwrap();
            assert_eq!(p.network.endpoints(e).unwrap(), (NodeId(from), NodeId(to)));
            a.begin_edge(e, 0.5 + i as f64).unwrap();
            assert_eq!(a.in_flight_edge(), Some(e));
            now += 0.5 + i as f64;
            a.traverse(now, e, &p.network).unwrap();
            assert_eq!(a.in_flight_edge(), None);
        }

        assert!(a.has_arrived());
        let total = a.finalize_travel_time().unwrap();
        assert!((total - 4.5).abs() < 1e-12);
        assert_eq!(a.total_travel_time(), Some(total));
        assert_eq!(a.state(), TripState::Arrived);

        let nodes: Vec<NodeId> = a.traveled_nodes().iter().map(|&(_, n)| n).collect();
        assert_eq!(nodes, vec![NodeId(0), NodeId(2), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn guided_asks_predictor() {
        let mut p = net();
        // Congest 0 -> 1 so the predictor prefers leaving via node 2.
        let e01 = p.network.edge_between(NodeId(0), NodeId(1)).unwrap();
        for _ in 0..60 {
            p.network.increment_volume(e01).unwrap();
        }
        let ctx = PredictContext::network_only(&p.network);
        let mut a = guided(&p, &[0, 1, 3]);
        assert!(a.is_guided());
        a.start_trip(SimTime::ZERO).unwrap();
        let e = a.next_edge(SimTime::ZERO, &ctx).unwrap();
        assert_eq!(p.network.endpoints(e).unwrap(), (NodeId(0), NodeId(2)));
    }

    #[test]
    fn discontinuous_traverse_is_rejected() {
        let p = net();
        let mut a = unguided(&p, &[0, 1, 3]);
        a.start_trip(SimTime::ZERO).unwrap();
        let e13 = p.network.edge_between(NodeId(1), NodeId(3)).unwrap();
        assert!(matches!(
            a.traverse(SimTime::hours(1.0), e13, &p.network),
            Err(ActorError::DiscontinuousRoute { .. })
        ));
        assert_eq!(a.traveled_nodes().len(), 1);
    }

    #[test]
    fn operations_require_the_right_state() {
        let p = net();
        let ctx = PredictContext::network_only(&p.network);
        let mut a = unguided(&p, &[0, 1, 3]);
        assert!(matches!(a.next_edge(SimTime::ZERO, &ctx), Err(ActorError::InvalidState { .. })));
        a.start_trip(SimTime::ZERO).unwrap();
        assert!(matches!(a.start_trip(SimTime::ZERO), Err(ActorError::InvalidState { .. })));
        assert!(matches!(a.finalize_travel_time(), Err(ActorError::InvalidState { .. })));
    }

    #[test]
    fn unguided_at_destination_has_no_next_edge() {
        let p = net();
        let ctx = PredictContext::network_only(&p.network);
        let mut a = unguided(&p, &[0, 1, 3]);
        a.start_trip(SimTime::ZERO).unwrap();
        for (from, to) in [(0, 1), (1, 3)] {
            let e = p.network.edge_between(NodeId(from), NodeId(to)).unwrap();
            a.traverse(SimTime::ZERO, e, &p.network).unwrap();
        }
        assert!(matches!(a.next_edge(SimTime::ZERO, &ctx), Err(ActorError::RouteExhausted { .. })));
    }

    #[test]
    fn revisited_edge_time_is_overwritten() {
        let p = net();
        let mut a = unguided(&p, &[0, 1, 3]);
        a.start_trip(SimTime::ZERO).unwrap();
        let e = p.network.edge_between(NodeId(0), NodeId(1)).unwrap();
        a.begin_edge(e, 2.0).unwrap();
        a.begin_edge(e, 3.0).unwrap();
        assert_eq!(a.edge_travel_times().len(), 1);
        assert_eq!(a.edge_travel_times()[&e], 3.0);
    }
}

// ── Truncation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod truncation {
    use atis_core::{NodeId, SimTime};

    use super::helpers::*;
    use crate::TripState;

    #[test]
    fn mid_edge_truncation_returns_edge() {
        let p = net();
        let mut a = unguided(&p, &[0, 1, 3]);
        a.start_trip(SimTime::hours(47.5)).unwrap();
        let e = p.network.edge_between(NodeId(0), NodeId(1)).unwrap();
        a.begin_edge(e, 1.0).unwrap();

        assert_eq!(a.truncate(SimTime::hours(48.0)), Some(e));
        assert_eq!(a.state(), TripState::Truncated);
        assert_eq!(a.total_travel_time(), Some(48.0));
        assert_eq!(a.in_flight_edge(), None);
    }

    #[test]
    fn never_started_actor_is_truncated() {
        let p = net();
        let mut a = unguided(&p, &[0, 2, 3]);
        assert_eq!(a.truncate(SimTime::hours(10.0)), None);
        assert_eq!(a.state(), TripState::Truncated);
        assert_eq!(a.total_travel_time(), Some(10.0));
    }

    #[test]
    fn arrived_actor_is_left_alone() {
        let p = net();
        let mut a = unguided(&p, &[0, 2, 3]);
        a.start_trip(SimTime::ZERO).unwrap();
        for (from, to) in [(0, 2), (2, 3)] {
            let e = p.network.edge_between(NodeId(from), NodeId(to)).unwrap();
            a.begin_edge(e, 1.0).unwrap();
            a.traverse(SimTime::ZERO, e, &p.network).unwrap();
        }
        a.finalize_travel_time().unwrap();
        assert_eq!(a.truncate(SimTime::hours(48.0)), None);
        assert_eq!(a.state(), TripState::Arrived);
        assert_eq!(a.total_travel_time(), Some(2.0));
    }
}

// ── Factories ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factories {
    use std::sync::Arc;

    use atis_core::{ActorId, NodeId, SimRng};
    use atis_network::presets::{commuter, diamond};
    use atis_predict::{CurrentAtis, RoutePredictor};

    use super::helpers::*;
    use crate::{softmax_travel_times, ActorError, ActorFactory, CreateContext, FixedRouteFactory, SoftmaxRouteFactory};

    #[test]
    fn softmax_prefers_fast_routes() {
        let p = softmax_travel_times(&[1.0, 2.0, 3.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1] && p[1] > p[2]);
        // scores 2, 1, 0
        let z = 1.0 + (-1.0f64).exp() + (-2.0f64).exp();
        assert!((p[0] - 1.0 / z).abs() < 1e-12);
    }

    #[test]
    fn softmax_equal_times_is_uniform() {
        let p = softmax_travel_times(&[2.0, 2.0, 2.0, 2.0]);
        for x in p {
            assert!((x - 0.25).abs() < 1e-12);
        }
        assert!(softmax_travel_times(&[]).is_empty());
    }

    #[test]
    fn softmax_factory_enumerates_routes() {
        let p = commuter().unwrap();
        let f = SoftmaxRouteFactory::new(&p.network, p.origin, p.destination, 0.5).unwrap();
        assert_eq!(f.routes().len(), 6);
        assert_eq!(f.probabilities().len(), 6);
        // the all-0.85 corridor is fastest
        let best = f
            .probabilities()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(f.routes()[best].nodes(), &[NodeId(0), NodeId(1), NodeId(3), NodeId(6), NodeId(8)]);
    }

    #[test]
    fn softmax_factory_errors() {
        let p = diamond([1.0, 1.0, 1.0, 1.0], 10.0).unwrap();
        assert!(matches!(
            SoftmaxRouteFactory::new(&p.network, NodeId(3), NodeId(0), 0.0),
            Err(ActorError::NoRoutes { .. })
        ));
        assert!(matches!(
            SoftmaxRouteFactory::new(&p.network, p.origin, p.destination, 1.2),
            Err(ActorError::Config(_))
        ));
    }

    #[test]
    fn adoption_controls_guidance() {
        let p = commuter().unwrap();
        let predictor: Arc<dyn RoutePredictor> = Arc::new(CurrentAtis);
        let ctx = CreateContext { network: &p.network, predictor: Some(&predictor) };
        let mut rng = SimRng::new(7);

        let all = SoftmaxRouteFactory::new(&p.network, p.origin, p.destination, 1.0).unwrap();
        let none = SoftmaxRouteFactory::new(&p.network, p.origin, p.destination, 0.0).unwrap();
        for i in 0..50 {
            assert!(all.create(ActorId(i), &ctx, &mut rng).unwrap().is_guided());
            assert!(!none.create(ActorId(i), &ctx, &mut rng).unwrap().is_guided());
        }

        // no predictor in the run: nobody is guided
        let bare = CreateContext { network: &p.network, predictor: None };
        assert!(!all.create(ActorId(99), &bare, &mut rng).unwrap().is_guided());
    }

    #[test]
    fn same_seed_same_routes() {
        let p = commuter().unwrap();
        let f = SoftmaxRouteFactory::new(&p.network, p.origin, p.destination, 0.3).unwrap();
        let ctx = CreateContext { network: &p.network, predictor: None };
        let draw = |seed| {
            let mut rng = SimRng::new(seed);
            (0..20)
                .map(|i| f.create(ActorId(i), &ctx, &mut rng).unwrap().base_route().clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(11), draw(11));
    }

    #[test]
    fn fixed_factory() {
        let p = net();
        let predictor: Arc<dyn RoutePredictor> = Arc::new(CurrentAtis);
        let ctx = CreateContext { network: &p.network, predictor: Some(&predictor) };
        let mut rng = SimRng::new(1);
        let r = route(&p, &[0, 2, 3]);

        let a = FixedRouteFactory::unguided(r.clone()).create(ActorId(3), &ctx, &mut rng).unwrap();
        assert_eq!(a.id(), ActorId(3));
        assert_eq!(a.base_route(), &r);
        assert!(!a.is_guided());

        let g = FixedRouteFactory::guided(r).create(ActorId(4), &ctx, &mut rng).unwrap();
        assert!(g.is_guided());
        assert_eq!(g.predictor().map(|p| p.name()), Some("current"));
    }
}
