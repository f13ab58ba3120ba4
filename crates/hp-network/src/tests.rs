//! Unit tests for hp-network.
//!
//! Routing tests use hand-built networks so outcomes are exact; generator
//! tests use fixed seeds and `proptest` for the structural invariants.

#[cfg(test)]
mod helpers {
    use hp_core::{NodeId, Point, Viewport};
    use crate::{Network, NetworkBuilder};

    /// A line of three routers with one exit past the east end.
    ///
    /// ```text
    ///   0 ──── 1 ──── 2      X(exit at 390,100)
    ///  (100)  (200)  (300)
    /// ```
    pub fn line3() -> (Network, [NodeId; 3]) {
        let mut b = NetworkBuilder::new(Viewport::new(400.0, 200.0));
        let n0 = b.add_node(Point::new(100.0, 100.0));
        let n1 = b.add_node(Point::new(200.0, 100.0));
        let n2 = b.add_node(Point::new(300.0, 100.0));
        b.add_exit(Point::new(390.0, 100.0));
        b.add_link(n0, n1).unwrap();
        b.add_link(n1, n2).unwrap();
        (b.build(), [n0, n1, n2])
    }

    /// A hub with three spokes and one exit due north.
    ///
    /// ```text
    ///          X (200,0)
    ///
    ///        1,2 (200,100)   two spokes on the same spot, tied on distance
    ///          |
    ///         hub (200,200)
    ///          |
    ///          3 (200,300)
    /// ```
    ///
    /// Links are added hub-3, hub-1, hub-2, so the hub sees [3, 1, 2].
    pub fn hub() -> (Network, [NodeId; 4]) {
        let mut b = NetworkBuilder::new(Viewport::new(400.0, 400.0));
        let hub = b.add_node(Point::new(200.0, 200.0));
        // 1 and 2 are both 100 from the exit at (200, 0).
        let s1 = b.add_node(Point::new(200.0, 100.0));
        let s2 = b.add_node(Point::new(200.0, 100.0));
        // 3 is further from the exit than the hub.
        let s3 = b.add_node(Point::new(200.0, 300.0));
        b.add_exit(Point::new(200.0, 0.0));
        b.add_link(hub, s3).unwrap();
        b.add_link(hub, s1).unwrap();
        b.add_link(hub, s2).unwrap();
        (b.build(), [hub, s1, s2, s3])
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use hp_core::{NodeId, Point, Viewport};
    use crate::{NetworkBuilder, NetworkError};

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new(Viewport::default()).build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.degree(NodeId(0)), 0);
        assert_eq!(net.neighbors(NodeId(3)).count(), 0);
    }

    #[test]
    fn duplicate_pair_is_ignored() {
        let mut b = NetworkBuilder::new(Viewport::default());
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(1.0, 0.0));
        assert!(b.add_link(a, c).unwrap());
        assert!(!b.add_link(a, c).unwrap());
        assert!(!b.add_link(c, a).unwrap());
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert!(net.has_link(a, c));
        assert!(net.has_link(c, a));
    }

    #[test]
    fn bad_links_rejected() {
        let mut b = NetworkBuilder::new(Viewport::default());
        let a = b.add_node(Point::new(0.0, 0.0));
        assert!(matches!(b.add_link(a, a), Err(NetworkError::SelfLoop(_))));
        assert!(matches!(
            b.add_link(a, NodeId(9)),
            Err(NetworkError::NodeNotFound(NodeId(9)))
        ));
    }

    #[test]
    fn neighbors_follow_link_order() {
        let (net, [hub, s1, s2, s3]) = super::helpers::hub();
        let ns: Vec<_> = net.neighbors(hub).collect();
        assert_eq!(ns, vec![s3, s1, s2]);
        assert_eq!(net.degree(hub), 3);
        assert_eq!(net.neighbors(s1).collect::<Vec<_>>(), vec![hub]);
    }

    #[test]
    fn edge_key_is_canonical() {
        let (net, _) = super::helpers::line3();
        for e in &net.edges {
            let (lo, hi) = e.key();
            assert!(lo < hi);
            assert_eq!(e.other(e.a), Some(e.b));
            assert_eq!(e.other(e.b), Some(e.a));
        }
    }
}

// ── Exit locator ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod exits {
    use hp_core::{ExitId, NodeId, Point};
    use crate::{distance_to_nearest_exit, nearest_exit};

    #[test]
    fn picks_minimum() {
        let exits = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(4.0, 0.0)];
        let hit = nearest_exit(Point::new(5.0, 0.0), &exits).unwrap();
        assert_eq!(hit.exit, ExitId(2));
        assert_eq!(hit.distance, 1.0);
    }

    #[test]
    fn first_minimum_wins_ties() {
        let exits = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let hit = nearest_exit(Point::new(5.0, 0.0), &exits).unwrap();
        assert_eq!(hit.exit, ExitId(0));
    }

    #[test]
    fn empty_exits_are_infinitely_far() {
        assert!(nearest_exit(Point::new(1.0, 1.0), &[]).is_none());
        assert_eq!(distance_to_nearest_exit(Point::new(1.0, 1.0), &[]), f64::INFINITY);
    }

    #[test]
    fn network_exit_distance() {
        let (net, [n0, _, n2]) = super::helpers::line3();
        assert_eq!(net.exit_distance(n2), 90.0);
        assert_eq!(net.exit_distance(n0), 290.0);
        assert_eq!(net.exit_distance(NodeId(99)), f64::INFINITY);
        assert_eq!(net.nearest_exit(n2).unwrap().exit, ExitId(0));
    }
}

// ── Next-hop selector ─────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use hp_core::{NodeId, Point, Viewport};
    use crate::{GreedyExitSelector, HopSelector, NetworkBuilder};

    #[test]
    fn moves_towards_exit() {
        let (net, [n0, n1, n2]) = super::helpers::line3();
        let sel = GreedyExitSelector;
        assert_eq!(sel.next_hop(&net, n0, None), Some(n1));
        assert_eq!(sel.next_hop(&net, n1, Some(n0)), Some(n2));
    }

    #[test]
    fn lone_backtrack_neighbor_is_stuck() {
        let (net, [_, n1, n2]) = super::helpers::line3();
        assert_eq!(GreedyExitSelector.next_hop(&net, n2, Some(n1)), None);
    }

    #[test]
    fn isolated_or_unknown_node_is_stuck() {
        let mut b = NetworkBuilder::new(Viewport::default());
        let lone = b.add_node(Point::new(100.0, 100.0));
        b.add_exit(Point::new(0.0, 0.0));
        let net = b.build();
        assert_eq!(GreedyExitSelector.next_hop(&net, lone, None), None);
        assert_eq!(GreedyExitSelector.next_hop(&net, NodeId(5), None), None);
    }

    #[test]
    fn arriving_from_exit_side_deflects_away() {
        // From the middle with no history both directions are eligible; the
        // east neighbour is closer to the exit.
        let (net, [n0, n1, n2]) = super::helpers::line3();
        assert_eq!(GreedyExitSelector.next_hop(&net, n1, None), Some(n2));
        // Coming from the east, the only option is west, even though it
        // increases the distance to the exit.
        assert_eq!(GreedyExitSelector.next_hop(&net, n1, Some(n2)), Some(n0));
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let (net, [hub, s1, _s2, _s3]) = super::helpers::hub();
        assert_eq!(GreedyExitSelector.next_hop(&net, hub, None), Some(s1));
    }

    #[test]
    fn excluded_previous_falls_to_next_best() {
        let (net, [hub, s1, s2, _]) = super::helpers::hub();
        assert_eq!(GreedyExitSelector.next_hop(&net, hub, Some(s1)), Some(s2));
    }

    #[test]
    fn accepts_negative_gain() {
        let (net, [hub, s1, _, _]) = super::helpers::hub();
        // The hub is farther from the exit than s1, yet it is s1's only
        // neighbour and is still chosen.
        assert_eq!(GreedyExitSelector.next_hop(&net, s1, None), Some(hub));
    }

    #[test]
    fn no_exits_takes_first_eligible() {
        let mut b = NetworkBuilder::new(Viewport::default());
        let a = b.add_node(Point::new(0.0, 0.0));
        let c = b.add_node(Point::new(1.0, 0.0));
        let d = b.add_node(Point::new(2.0, 0.0));
        b.add_link(a, c).unwrap();
        b.add_link(a, d).unwrap();
        let net = b.build();
        assert_eq!(GreedyExitSelector.next_hop(&net, a, None), Some(c));
        assert_eq!(GreedyExitSelector.next_hop(&net, a, Some(c)), Some(d));
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use std::collections::HashSet;

    use hp_core::{NodeId, SimRng, Viewport};
    use crate::{generate, GenParams};

    #[test]
    fn default_counts() {
        let mut rng = SimRng::new(42);
        let net = generate(Viewport::new(800.0, 500.0), &GenParams::default(), &mut rng);
        assert_eq!(net.node_count(), 12);
        assert_eq!(net.exit_count(), 3);
        // Every node requested 3 links; at most every request is unique, at
        // least half of them are (each pair can be requested twice).
        assert!(net.edge_count() <= 36);
        assert!(net.edge_count() >= 18);
        for i in 0..12 {
            assert!(net.degree(NodeId(i)) >= 3);
        }
    }

    #[test]
    fn same_seed_same_network() {
        let vp = Viewport::new(640.0, 480.0);
        let a = generate(vp, &GenParams::default(), &mut SimRng::new(7));
        let b = generate(vp, &GenParams::default(), &mut SimRng::new(7));
        assert_eq!(a.node_pos, b.node_pos);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.exits, b.exits);
    }

    #[test]
    fn links_are_the_k_nearest() {
        let mut rng = SimRng::new(3);
        let params = GenParams::default();
        let net = generate(Viewport::new(800.0, 500.0), &params, &mut rng);
        for i in 0..net.node_count() {
            let me = NodeId(i as u32);
            let p = net.node_pos[i];
            let mut others: Vec<(f64, NodeId)> = (0..net.node_count())
                .filter(|&j| j != i)
                .map(|j| (p.distance(net.node_pos[j]), NodeId(j as u32)))
                .collect();
            others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            for &(_, n) in others.iter().take(params.neighbor_count) {
                assert!(net.has_link(me, n), "{me} should link to {n}");
            }
        }
    }

    #[test]
    fn single_node_has_no_links() {
        let params = GenParams { node_count: 1, ..GenParams::default() };
        let net = generate(Viewport::default(), &params, &mut SimRng::new(1));
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let net = generate(Viewport::new(20.0, 20.0), &GenParams::default(), &mut SimRng::new(1));
        assert_eq!(net.node_count(), 12);
        // All nodes collapse onto the padding corner; links still form.
        assert!(net.edge_count() > 0);
        let unique: HashSet<_> = net.edges.iter().map(|e| e.key()).collect();
        assert_eq!(unique.len(), net.edge_count());
    }

    #[test]
    fn zero_neighbor_count_yields_no_links() {
        let params = GenParams { neighbor_count: 0, ..GenParams::default() };
        let net = generate(Viewport::default(), &params, &mut SimRng::new(1));
        assert_eq!(net.edge_count(), 0);
    }
}

#[cfg(test)]
mod generator_props {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use hp_core::{NodeId, SimRng, Viewport};
    use crate::{generate, GenParams, GreedyExitSelector, HopSelector};

    fn params_strategy() -> impl Strategy<Value = (u64, f64, f64, usize, usize)> {
        (any::<u64>(), 100.0..1600.0f64, 100.0..1000.0f64, 2usize..40, 1usize..6)
    }

    proptest! {
        #[test]
        fn edges_valid_and_unique((seed, w, h, nodes, exits) in params_strategy()) {
            let params = GenParams { node_count: nodes, exit_count: exits, ..GenParams::default() };
            let net = generate(Viewport::new(w, h), &params, &mut SimRng::new(seed));
            let mut seen = HashSet::new();
            for e in &net.edges {
                prop_assert!(e.a.index() < net.node_count());
                prop_assert!(e.b.index() < net.node_count());
                prop_assert_ne!(e.a, e.b);
                prop_assert!(seen.insert(e.key()), "duplicate pair {:?}", e.key());
            }
        }

        #[test]
        fn every_node_has_a_link((seed, w, h, nodes, exits) in params_strategy()) {
            let params = GenParams { node_count: nodes, exit_count: exits, ..GenParams::default() };
            let net = generate(Viewport::new(w, h), &params, &mut SimRng::new(seed));
            for i in 0..net.node_count() {
                prop_assert!(net.degree(NodeId(i as u32)) >= 1);
            }
        }

        #[test]
        fn nodes_inside_padding((seed, w, h, nodes, exits) in params_strategy()) {
            let params = GenParams { node_count: nodes, exit_count: exits, ..GenParams::default() };
            let vp = Viewport::new(w, h);
            let net = generate(vp, &params, &mut SimRng::new(seed));
            for &p in &net.node_pos {
                prop_assert!(vp.contains_inset(p, params.padding), "{p} outside padding");
            }
        }

        #[test]
        fn exits_on_a_border((seed, w, h, nodes, exits) in params_strategy()) {
            let params = GenParams { node_count: nodes, exit_count: exits, ..GenParams::default() };
            let net = generate(Viewport::new(w, h), &params, &mut SimRng::new(seed));
            let inset = params.padding * params.exit_inset;
            prop_assert_eq!(net.exit_count(), exits);
            for &e in &net.exits {
                let on_border = e.y == inset
                    || e.y == h - inset
                    || e.x == inset
                    || e.x == w - inset;
                prop_assert!(on_border, "{} not on a border", e);
                prop_assert!((0.0..=w).contains(&e.x) && (0.0..=h).contains(&e.y));
            }
        }

        #[test]
        fn never_backtracks_when_alternative_exists(
            (seed, w, h, nodes, exits) in params_strategy()
        ) {
            let params = GenParams { node_count: nodes, exit_count: exits, ..GenParams::default() };
            let net = generate(Viewport::new(w, h), &params, &mut SimRng::new(seed));
            for e in &net.edges {
                for (cur, prev) in [(e.a, e.b), (e.b, e.a)] {
                    let hop = GreedyExitSelector.next_hop(&net, cur, Some(prev));
                    if net.degree(cur) > 1 {
                        prop_assert!(hop.is_some());
                        prop_assert_ne!(hop, Some(prev));
                        prop_assert!(net.has_link(cur, hop.unwrap()));
                    } else {
                        prop_assert_eq!(hop, None);
                    }
                }
            }
        }
    }
}
