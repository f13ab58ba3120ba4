//! Random network generation.
//!
//! # Layout
//!
//! 1. `node_count` routers are dropped uniformly inside the viewport, inset
//!    by `padding` on every side.
//! 2. Every router links to its `neighbor_count` nearest other routers.
//!    "Nearest k" is not symmetric, so many routers end up with more than k
//!    links; degrees of 3–6 are typical for k = 3.
//! 3. `exit_count` exits each pick one of the four borders uniformly and a
//!    uniform position along it, `exit_inset * padding` in from the edge.
//!
//! Connectivity is not enforced.  A router can sit in a component from which
//! no exit is reachable; packets spawned there eventually get stuck and are
//! dropped, which the simulation treats as normal.
//!
//! # Nearest-neighbour search
//!
//! Candidates come from an R-tree (`rstar`) in ascending distance.  Every
//! candidate tied with the k-th distance is collected before the list is
//! ordered by `(distance, NodeId)`, so ties always go to the lower index no
//! matter how the tree orders equal distances.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use hp_core::{NodeId, Point, SimConfig, SimRng, Viewport};

use crate::network::{Network, NetworkBuilder};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── GenParams ─────────────────────────────────────────────────────────────────

/// The subset of [`SimConfig`] that shapes a generated network.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenParams {
    pub node_count:     usize,
    pub exit_count:     usize,
    pub padding:        f64,
    pub exit_inset:     f64,
    pub neighbor_count: usize,
}

impl From<&SimConfig> for GenParams {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            node_count:     cfg.node_count,
            exit_count:     cfg.exit_count,
            padding:        cfg.padding,
            exit_inset:     cfg.exit_inset,
            neighbor_count: cfg.neighbor_count,
        }
    }
}

impl Default for GenParams {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Generate a fresh random network for `viewport`.
///
/// Never fails: a viewport too small for the padding collapses node
/// coordinates onto the padding line, and zero counts yield an empty
/// network.
pub fn generate(viewport: Viewport, params: &GenParams, rng: &mut SimRng) -> Network {
    let k = params.neighbor_count;
    let mut b = NetworkBuilder::with_capacity(
        viewport,
        params.node_count,
        params.node_count * k,
        params.exit_count,
    );

    // ── Nodes ─────────────────────────────────────────────────────────────
    let pad = params.padding;
    for _ in 0..params.node_count {
        let x = rng.uniform(pad, viewport.width - pad);
        let y = rng.uniform(pad, viewport.height - pad);
        b.add_node(Point::new(x, y));
    }

    // ── Links ─────────────────────────────────────────────────────────────
    let entries: Vec<NodeEntry> = (0..b.node_count())
        .filter_map(|i| {
            let id = NodeId(i as u32);
            b.node_pos(id).map(|p| NodeEntry { point: [p.x, p.y], id })
        })
        .collect();
    let tree = RTree::bulk_load(entries);

    for i in 0..b.node_count() {
        let me = NodeId(i as u32);
        let Some(pos) = b.node_pos(me) else { continue };
        for other in nearest_others(&tree, me, pos, k) {
            // Both endpoints exist and differ, so the only possible outcome
            // besides insertion is a duplicate pair.
            let _ = b.add_link(me, other);
        }
    }

    // ── Exits ─────────────────────────────────────────────────────────────
    let inset = pad * params.exit_inset;
    for _ in 0..params.exit_count {
        let exit = match rng.gen_range(0..4u8) {
            0 => Point::new(rng.uniform(0.0, viewport.width), inset),
            1 => Point::new(viewport.width - inset, rng.uniform(0.0, viewport.height)),
            2 => Point::new(rng.uniform(0.0, viewport.width), viewport.height - inset),
            _ => Point::new(inset, rng.uniform(0.0, viewport.height)),
        };
        b.add_exit(exit);
    }

    let net = b.build();
    debug!(
        viewport = %viewport,
        nodes = net.node_count(),
        links = net.edge_count(),
        exits = net.exit_count(),
        "generated network"
    );
    net
}

/// The `k` nodes nearest to `pos`, excluding `me`, ordered by
/// `(distance, NodeId)`.
fn nearest_others(tree: &RTree<NodeEntry>, me: NodeId, pos: Point, k: usize) -> Vec<NodeId> {
    if k == 0 {
        return Vec::new();
    }
    let mut picked: Vec<(f64, NodeId)> = Vec::with_capacity(k + 1);
    for (entry, d2) in tree.nearest_neighbor_iter_with_distance_2(&[pos.x, pos.y]) {
        if entry.id == me {
            continue;
        }
        // The iterator is ascending, so picked[k - 1] is the k-th distance.
        if picked.len() >= k && d2 > picked[k - 1].0 {
            break;
        }
        picked.push((d2, entry.id));
    }
    picked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    picked.truncate(k);
    picked.into_iter().map(|(_, id)| id).collect()
}
