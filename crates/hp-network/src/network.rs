//! Router network representation and builder.
//!
//! # Data layout
//!
//! Links are undirected and stored once each in `edges`, in insertion order.
//! For fast neighbour scans the builder also derives a **Compressed Sparse
//! Row (CSR)** adjacency index.  Given a `NodeId n`, its neighbours occupy
//!
//! ```text
//! adj[ node_adj_start[n] .. node_adj_start[n+1] ]
//! ```
//!
//! and appear in the order their links were added.  The greedy selector's
//! tie-breaking ("first encountered wins") depends on that order, so the CSR
//! fill is stable by construction.
//!
//! # De-duplication
//!
//! Each unordered pair `{a, b}` is keyed by the canonical tuple
//! `(min(a, b), max(a, b))` in a hash set while building; a second link
//! between the same nodes is ignored.

use hp_core::{ExitId, NodeId, Point, Viewport};

use crate::exit::{self, ExitHit};
use crate::{NetworkError, NetworkResult};

#[cfg(feature = "fx-hash")]
type KeySet = rustc_hash::FxHashSet<(NodeId, NodeId)>;
#[cfg(not(feature = "fx-hash"))]
type KeySet = std::collections::HashSet<(NodeId, NodeId)>;

// ── Edge ──────────────────────────────────────────────────────────────────────

/// An undirected link.  `a` is the node that requested the link during
/// generation, `b` the neighbour it picked; the orientation carries no
/// routing meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
}

impl Edge {
    /// Canonical `(min, max)` key identifying the unordered pair.
    #[inline]
    pub fn key(self) -> (NodeId, NodeId) {
        if self.a <= self.b { (self.a, self.b) } else { (self.b, self.a) }
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other(self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Undirected router graph plus the exits packets race towards.
///
/// Immutable once built; the controller replaces it wholesale on resize.
/// Do not construct directly; use [`NetworkBuilder`] or
/// [`generate`](crate::generate).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Network {
    /// Surface the network was laid out for.
    pub viewport: Viewport,

    /// Position of each router node.  Indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// Unique undirected links in insertion order.
    pub edges: Vec<Edge>,

    /// Exit positions.  Indexed by `ExitId`.  Not part of the topology.
    pub exits: Vec<Point>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    #[cfg_attr(feature = "serde", serde(skip))]
    node_adj_start: Vec<u32>,

    #[cfg_attr(feature = "serde", serde(skip))]
    adj: Vec<NodeId>,
}

impl Network {
    /// A network with no nodes, links or exits.
    ///
    /// Stands in before the first generation; adding or stepping packets
    /// against it is a no-op.
    pub fn empty(viewport: Viewport) -> Self {
        NetworkBuilder::new(viewport).build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    #[inline]
    pub fn node(&self, node: NodeId) -> Option<Point> {
        self.node_pos.get(node.index()).copied()
    }

    #[inline]
    pub fn exit(&self, exit: ExitId) -> Option<Point> {
        self.exits.get(exit.index()).copied()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Neighbours of `node` in link insertion order.
    ///
    /// Empty for an isolated or unknown node.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj_slice(node).iter().copied()
    }

    /// Number of links touching `node`.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adj_slice(node).len()
    }

    /// `true` if an undirected link joins `a` and `b`.
    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.adj_slice(a).contains(&b)
    }

    fn adj_slice(&self, node: NodeId) -> &[NodeId] {
        if !self.contains_node(node) {
            return &[];
        }
        let start = self.node_adj_start[node.index()] as usize;
        let end   = self.node_adj_start[node.index() + 1] as usize;
        &self.adj[start..end]
    }

    // ── Exit queries ──────────────────────────────────────────────────────

    /// Nearest exit to `node`, or `None` for an unknown node or no exits.
    pub fn nearest_exit(&self, node: NodeId) -> Option<ExitHit> {
        exit::nearest_exit(self.node(node)?, &self.exits)
    }

    /// Distance from `node` to its nearest exit.
    ///
    /// `f64::INFINITY` when there are no exits or the node is unknown, so
    /// such a node is never within delivery range.
    pub fn exit_distance(&self, node: NodeId) -> f64 {
        match self.node(node) {
            Some(p) => exit::distance_to_nearest_exit(p, &self.exits),
            None    => f64::INFINITY,
        }
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use hp_core::{Point, Viewport};
/// use hp_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new(Viewport::new(200.0, 100.0));
/// let a = b.add_node(Point::new(50.0, 50.0));
/// let c = b.add_node(Point::new(150.0, 50.0));
/// b.add_exit(Point::new(190.0, 50.0));
/// assert!(b.add_link(a, c).unwrap());
/// assert!(!b.add_link(c, a).unwrap()); // same unordered pair
/// let net = b.build();
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.degree(a), 1);
/// ```
pub struct NetworkBuilder {
    viewport: Viewport,
    nodes:    Vec<Point>,
    edges:    Vec<Edge>,
    exits:    Vec<Point>,
    seen:     KeySet,
}

impl NetworkBuilder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
            edges: Vec::new(),
            exits: Vec::new(),
            seen:  KeySet::default(),
        }
    }

    /// Pre-allocate for the expected number of nodes, links and exits.
    pub fn with_capacity(viewport: Viewport, nodes: usize, edges: usize, exits: usize) -> Self {
        let mut seen = KeySet::default();
        seen.reserve(edges);
        Self {
            viewport,
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            exits: Vec::with_capacity(exits),
            seen,
        }
    }

    /// Add a router node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add an exit point and return its `ExitId` (sequential from 0).
    pub fn add_exit(&mut self, pos: Point) -> ExitId {
        let id = ExitId(self.exits.len() as u32);
        self.exits.push(pos);
        id
    }

    /// Link `a` and `b`.
    ///
    /// Returns `Ok(false)` if the unordered pair is already linked.
    ///
    /// # Errors
    ///
    /// [`NetworkError::NodeNotFound`] for an endpoint not added yet, and
    /// [`NetworkError::SelfLoop`] when `a == b`.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> NetworkResult<bool> {
        for n in [a, b] {
            if n.index() >= self.nodes.len() {
                return Err(NetworkError::NodeNotFound(n));
            }
        }
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        let edge = Edge { a, b };
        if !self.seen.insert(edge.key()) {
            return Ok(false);
        }
        self.edges.push(edge);
        Ok(true)
    }

    /// Position of a node added earlier (used by the generator).
    pub fn node_pos(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`Network`].
    ///
    /// O(N + E): one counting pass, one prefix sum, one stable fill.
    pub fn build(self) -> Network {
        let node_count = self.nodes.len();

        let mut node_adj_start = vec![0u32; node_count + 1];
        for e in &self.edges {
            node_adj_start[e.a.index() + 1] += 1;
            node_adj_start[e.b.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_adj_start[i] += node_adj_start[i - 1];
        }
        debug_assert_eq!(node_adj_start[node_count] as usize, self.edges.len() * 2);

        // Fill each node's slot range in edge order; every slot is written.
        let mut cursor: Vec<u32> = node_adj_start[..node_count].to_vec();
        let mut adj = vec![NodeId(0); self.edges.len() * 2];
        for e in &self.edges {
            adj[cursor[e.a.index()] as usize] = e.b;
            cursor[e.a.index()] += 1;
            adj[cursor[e.b.index()] as usize] = e.a;
            cursor[e.b.index()] += 1;
        }

        Network {
            viewport: self.viewport,
            node_pos: self.nodes,
            edges:    self.edges,
            exits:    self.exits,
            node_adj_start,
            adj,
        }
    }
}
