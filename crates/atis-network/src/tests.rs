//! Unit tests for atis-network.
//!
//! Networks are built by hand or taken from `presets`, so no files are
//! needed except in the loader tests.

#[cfg(test)]
mod helpers {
    use atis_core::NodeId;

    pub fn nodes(ids: &[u32]) -> Vec<NodeId> {
        ids.iter().map(|&i| NodeId(i)).collect()
    }
}

// ── BPR ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use crate::bpr_travel_time;

    #[test]
    fn free_flow_at_zero_volume() {
        assert_eq!(bpr_travel_time(1.0, 20.0, 0.0), 1.0);
        assert_eq!(bpr_travel_time(0.85, 50.0, 0.0), 0.85);
    }

    #[test]
    fn at_capacity_is_one_fifteen() {
        let t = bpr_travel_time(1.0, 20.0, 20.0);
        assert!((t - 1.15).abs() < 1e-12);
    }

    #[test]
    fn at_twice_capacity_is_three_point_four() {
        let t = bpr_travel_time(1.0, 20.0, 40.0);
        assert!((t - 3.4).abs() < 1e-12);
    }

    #[test]
    fn non_decreasing_in_volume() {
        let mut prev = 0.0;
        for v in 0..200 {
            let t = bpr_travel_time(0.92, 50.0, v as f64);
            assert!(t >= prev, "v={v}: {t} < {prev}");
            prev = t;
        }
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use atis_core::{EdgeId, NodeId};
    use crate::{NetworkError, RoadNetworkBuilder};

    #[test]
    fn nodes_grow_with_edges() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(4), 1.0, 10.0);
        let net = b.build().unwrap();
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_degree(NodeId(0)), 1);
        assert_eq!(net.out_degree(NodeId(3)), 0);
        assert_eq!(net.out_edges(NodeId(99)).count(), 0);
    }

    #[test]
    fn out_edges_keep_insertion_order() {
        let mut b = RoadNetworkBuilder::with_nodes(4);
        b.add_edge(NodeId(2), NodeId(3), 1.0, 10.0);
        b.add_edge(NodeId(0), NodeId(2), 1.0, 10.0);
        b.add_edge(NodeId(0), NodeId(1), 1.0, 10.0);
        let net = b.build().unwrap();

        let targets: Vec<NodeId> = net.out_edges(NodeId(0)).map(|e| net.endpoints(e).unwrap().1).collect();
        assert_eq!(targets, vec![NodeId(2), NodeId(1)]);
    }

    #[test]
    fn edge_between_resolves_and_rejects() {
        let mut b = RoadNetworkBuilder::with_nodes(3);
        b.add_edge(NodeId(0), NodeId(1), 1.0, 10.0);
        b.add_edge(NodeId(1), NodeId(2), 2.0, 10.0);
        let net = b.build().unwrap();

        let e = net.edge_between(NodeId(1), NodeId(2)).unwrap();
        assert_eq!(net.endpoints(e).unwrap(), (NodeId(1), NodeId(2)));
        assert_eq!(net.edge_data(e).unwrap().free_flow_time, 2.0);

        assert!(matches!(
            net.edge_between(NodeId(2), NodeId(1)),
            Err(NetworkError::NoEdgeBetween { .. })
        ));
    }

    #[test]
    fn rejects_self_loop() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(1), NodeId(1), 1.0, 10.0);
        assert!(matches!(b.build(), Err(NetworkError::InvalidEdge { .. })));
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), 0.0, 10.0);
        assert!(matches!(b.build(), Err(NetworkError::InvalidEdge { .. })));

        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), 1.0, -5.0);
        assert!(matches!(b.build(), Err(NetworkError::InvalidEdge { .. })));

        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), f64::NAN, 5.0);
        assert!(matches!(b.build(), Err(NetworkError::InvalidEdge { .. })));
    }

    #[test]
    fn rejects_duplicate_edge() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), 1.0, 10.0);
        b.add_edge(NodeId(0), NodeId(1), 2.0, 10.0);
        assert!(matches!(b.build(), Err(NetworkError::InvalidEdge { .. })));
    }

    #[test]
    fn unknown_edge_is_an_error() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), 1.0, 10.0);
        let net = b.build().unwrap();
        assert!(matches!(net.volume(EdgeId(7)), Err(NetworkError::UnknownEdge(EdgeId(7)))));
        assert!(matches!(net.real_travel_time(EdgeId(1)), Err(NetworkError::UnknownEdge(_))));
    }
}

// ── Volume & capacity ─────────────────────────────────────────────────────────

#[cfg(test)]
mod live_state {
    use crate::presets::two_node;
    use crate::NetworkError;

    #[test]
    fn volume_round_trip() {
        let mut p = two_node(1.0, 20.0).unwrap();
        let e = p.network.edge_between(p.origin, p.destination).unwrap();

        assert!(p.network.is_idle());
        p.network.increment_volume(e).unwrap();
        p.network.increment_volume(e).unwrap();
        assert_eq!(p.network.volume(e).unwrap(), 2);
        assert!(!p.network.is_idle());

        p.network.decrement_volume(e).unwrap();
        p.network.decrement_volume(e).unwrap();
        assert_eq!(p.network.volume(e).unwrap(), 0);
        assert!(p.network.is_idle());
    }

    #[test]
    fn decrement_below_zero_is_an_error() {
        let mut p = two_node(1.0, 20.0).unwrap();
        let e = p.network.edge_between(p.origin, p.destination).unwrap();
        assert!(matches!(p.network.decrement_volume(e), Err(NetworkError::NegativeVolume(_))));
        assert_eq!(p.network.volume(e).unwrap(), 0);
    }

    #[test]
    fn real_travel_time_follows_volume() {
        let mut p = two_node(1.0, 20.0).unwrap();
        let e = p.network.edge_between(p.origin, p.destination).unwrap();
        assert_eq!(p.network.real_travel_time(e).unwrap(), 1.0);

        for _ in 0..20 {
            p.network.increment_volume(e).unwrap();
        }
        assert!((p.network.real_travel_time(e).unwrap() - 1.15).abs() < 1e-12);
    }

    #[test]
    fn scale_capacity_slows_the_edge() {
        let mut p = two_node(1.0, 20.0).unwrap();
        let e = p.network.edge_between(p.origin, p.destination).unwrap();
        for _ in 0..4 {
            p.network.increment_volume(e).unwrap();
        }
        let before = p.network.real_travel_time(e).unwrap();

        p.network.scale_capacity(e, 0.2).unwrap();
        assert!((p.network.edge_data(e).unwrap().capacity - 4.0).abs() < 1e-12);
        let after = p.network.real_travel_time(e).unwrap();
        assert!((after - 1.15).abs() < 1e-12);
        assert!(after > before);
    }

    #[test]
    fn scale_capacity_rejects_bad_factor() {
        let mut p = two_node(1.0, 20.0).unwrap();
        let e = p.network.edge_between(p.origin, p.destination).unwrap();
        assert!(matches!(p.network.scale_capacity(e, 0.0), Err(NetworkError::InvalidScale { .. })));
        assert!(matches!(p.network.scale_capacity(e, f64::INFINITY), Err(NetworkError::InvalidScale { .. })));
        assert_eq!(p.network.edge_data(e).unwrap().capacity, 20.0);
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod paths {
    use atis_core::NodeId;
    use super::helpers::nodes;
    use crate::presets::{commuter, deliverable, diamond, two_node};
    use crate::{NetworkError, Route};

    #[test]
    fn deliverable_has_three_routes_in_dfs_order() {
        let p = deliverable().unwrap();
        let routes = p.network.all_simple_paths(p.origin, p.destination).unwrap();
        let got: Vec<Vec<NodeId>> = routes.iter().map(|r| r.nodes().to_vec()).collect();
        assert_eq!(got, vec![nodes(&[0, 1, 3]), nodes(&[0, 2, 1, 3]), nodes(&[0, 2, 3])]);
    }

    #[test]
    fn route_edges_match_nodes() {
        let p = deliverable().unwrap();
        for r in p.network.all_simple_paths(p.origin, p.destination).unwrap() {
            assert_eq!(r.edges().len(), r.nodes().len() - 1);
            for (i, &e) in r.edges().iter().enumerate() {
                assert_eq!(p.network.endpoints(e).unwrap(), (r.nodes()[i], r.nodes()[i + 1]));
            }
            assert_eq!(r.origin(), p.origin);
            assert_eq!(r.destination(), p.destination);
        }
    }

    #[test]
    fn commuter_has_six_routes() {
        let p = commuter().unwrap();
        let routes = p.network.all_simple_paths(p.origin, p.destination).unwrap();
        assert_eq!(routes.len(), 6);
        assert_eq!(routes[0].nodes(), nodes(&[0, 1, 3, 6, 8]).as_slice());
    }

    #[test]
    fn diamond_has_two_routes() {
        let p = diamond([1.0, 2.0, 1.0, 1.0], 20.0).unwrap();
        let routes = p.network.all_simple_paths(p.origin, p.destination).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(p.network.free_flow_time(&routes[0]).unwrap(), 2.0);
        assert_eq!(p.network.free_flow_time(&routes[1]).unwrap(), 3.0);
    }

    #[test]
    fn same_endpoint_or_unreachable_gives_nothing() {
        let p = deliverable().unwrap();
        assert!(p.network.all_simple_paths(NodeId(0), NodeId(0)).unwrap().is_empty());
        assert!(p.network.all_simple_paths(NodeId(3), NodeId(0)).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_node_is_an_error() {
        let p = two_node(1.0, 20.0).unwrap();
        assert!(matches!(
            p.network.all_simple_paths(NodeId(0), NodeId(9)),
            Err(NetworkError::NodeNotFound(NodeId(9)))
        ));
    }

    #[test]
    fn from_nodes_validates() {
        let p = deliverable().unwrap();
        let r = Route::from_nodes(&p.network, nodes(&[0, 2, 3])).unwrap();
        assert_eq!(r.first_edge(), p.network.edge_between(NodeId(0), NodeId(2)).unwrap());
        assert_eq!(r.to_string(), "[0 -> 2 -> 3]");

        assert!(matches!(Route::from_nodes(&p.network, nodes(&[0])), Err(NetworkError::InvalidRoute(_))));
        assert!(matches!(
            Route::from_nodes(&p.network, nodes(&[0, 2, 1, 2])),
            Err(NetworkError::InvalidRoute(_))
        ));
        assert!(matches!(
            Route::from_nodes(&p.network, nodes(&[0, 3])),
            Err(NetworkError::NoEdgeBetween { .. })
        ));
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod presets {
    use crate::NetworkPreset;

    #[test]
    fn parse_and_build_every_preset() {
        for name in ["two_node", "diamond", "deliverable", "commuter"] {
            let preset: NetworkPreset = name.parse().unwrap();
            assert_eq!(preset.to_string(), name);
            let p = preset.build().unwrap();
            assert!(p.network.is_idle());
            assert!(!p.network.all_simple_paths(p.origin, p.destination).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_preset_name() {
        assert!("grid".parse::<NetworkPreset>().is_err());
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use atis_core::NodeId;
    use crate::{load_network_csv, load_network_reader, NetworkError};

    const CSV: &str = "\
from,to,free_flow_time,capacity
0,1,1.0,20
0,2,1.0,20
2,1,1.0,20
1,3,1.0,20
2,3,1.0,20
";

    #[test]
    fn reads_edge_list() {
        let net = load_network_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 5);
        assert_eq!(net.all_simple_paths(NodeId(0), NodeId(3)).unwrap().len(), 3);
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let net = load_network_csv(file.path()).unwrap();
        assert_eq!(net.edge_count(), 5);
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let bad = "from,to,free_flow_time,capacity\n0,1,fast,20\n";
        assert!(matches!(load_network_reader(Cursor::new(bad)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn empty_list_is_parse_error() {
        let empty = "from,to,free_flow_time,capacity\n";
        assert!(matches!(load_network_reader(Cursor::new(empty)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::path::Path::new("/definitely/not/here.csv");
        assert!(matches!(load_network_csv(path), Err(NetworkError::Io(_))));
    }
}
