//! Unit tests for the demo's cross-replicate aggregation.

#[cfg(test)]
mod report {
    use std::collections::BTreeMap;

    use atis_core::EdgeId;

    use crate::report::{Spread, edge_spreads};

    #[test]
    fn spread_of_empty_is_zero() {
        let s = Spread::of(&[]);
        assert_eq!((s.mean, s.std), (0.0, 0.0));
    }

    #[test]
    fn edges_average_only_over_runs_that_used_them() {
        let run_a = BTreeMap::from([(EdgeId(0), 2.0), (EdgeId(1), 4.0)]);
        let run_b = BTreeMap::from([(EdgeId(0), 4.0)]);
        let spreads = edge_spreads(&[run_a, run_b]);

        assert_eq!(spreads.len(), 2);
        let e0 = spreads[&EdgeId(0)];
        assert!((e0.mean - 3.0).abs() < 1e-12);
        assert!((e0.std - 1.0).abs() < 1e-12);

        // only run_a used edge 1, so run_b does not pull it toward zero
        let e1 = spreads[&EdgeId(1)];
        assert!((e1.mean - 4.0).abs() < 1e-12);
        assert_eq!(e1.std, 0.0);
    }

    #[test]
    fn no_runs_no_edges() {
        assert!(edge_spreads(&[]).is_empty());
    }
}
