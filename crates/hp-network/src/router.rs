//! Next-hop selection trait and the default greedy deflection rule.
//!
//! # Pluggability
//!
//! `hp-sim` asks for hops through the [`HopSelector`] trait, so applications
//! can swap in other per-hop policies (randomised deflection, load-aware
//! choices) without touching the stepper.  [`GreedyExitSelector`] is the
//! hot-potato rule the playground demonstrates.
//!
//! # The greedy rule
//!
//! A router never holds a packet.  On arrival it forwards the packet to the
//! neighbour whose nearest-exit distance is smallest, i.e. whose gain
//! `d(current) - d(neighbour)` is largest, with two twists:
//!
//! - the neighbour the packet just came from is excluded (no U-turns);
//! - the best gain may be negative.  With no improving neighbour the packet
//!   is still deflected somewhere, and it may bounce between routers.  That
//!   oscillation is part of what the playground shows.

use hp_core::NodeId;

use crate::network::Network;

// ── HopSelector trait ─────────────────────────────────────────────────────────

/// Pluggable per-hop forwarding policy.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so hop decisions can be computed on
/// Rayon's pool when `hp-sim` is built with the `parallel` feature.
pub trait HopSelector: Send + Sync {
    /// Choose where a packet sitting at `current` goes next.
    ///
    /// `previous` is the node the packet arrived from (`None` right after
    /// spawning).  Returns `None` when the packet is stuck; the caller drops
    /// it.  Must never return `previous` while another neighbour exists.
    fn next_hop(
        &self,
        network:  &Network,
        current:  NodeId,
        previous: Option<NodeId>,
    ) -> Option<NodeId>;
}

// ── GreedyExitSelector ────────────────────────────────────────────────────────

/// Forward to the non-backtracking neighbour closest to any exit.
///
/// Ties go to the neighbour met first in link order.  When the network has
/// no exits every distance is infinite and gains are undefined; all
/// candidates then count as equal, so the first eligible neighbour wins.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyExitSelector;

impl HopSelector for GreedyExitSelector {
    fn next_hop(
        &self,
        network:  &Network,
        current:  NodeId,
        previous: Option<NodeId>,
    ) -> Option<NodeId> {
        if !network.contains_node(current) {
            return None;
        }
        let here = network.exit_distance(current);

        let mut best: Option<NodeId> = None;
        let mut best_gain = f64::NEG_INFINITY;
        for n in network.neighbors(current) {
            if Some(n) == previous {
                continue;
            }
            let gain = here - network.exit_distance(n);
            // inf - inf is NaN; treat it as "no information".
            let gain = if gain.is_nan() { 0.0 } else { gain };
            if best.is_none() || gain > best_gain {
                best = Some(n);
                best_gain = gain;
            }
        }
        best
    }
}
