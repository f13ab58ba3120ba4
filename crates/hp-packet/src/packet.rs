//! Per-packet hop state.

use hp_core::{NodeId, PacketId};

/// Progress within this distance of 1.0 counts as a completed hop.
///
/// Summing a step like `0.01 * 0.25` four hundred times lands a few ulps
/// short of 1.0; snapping keeps the hop from costing an extra tick.
pub const PROGRESS_EPSILON: f64 = 1e-9;

/// Where a packet is in its current hop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PacketPhase {
    /// On a link, `progress < 1`.
    Traveling,
    /// At the far end of the link, waiting for the next forwarding decision.
    Arrived,
}

/// A packet in flight.
///
/// The packet is anchored at `at` and animates along the link toward the
/// hop the selector would choose next; `progress` is the fraction of that
/// link already covered.  When `progress` reaches 1 the stepper forwards it:
/// `prev` becomes `at`, `at` becomes the chosen neighbour, `progress` resets.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    pub id: PacketId,

    /// Current router.
    pub at: NodeId,

    /// Router the packet arrived from; `None` right after spawning.
    pub prev: Option<NodeId>,

    /// Fraction of the current hop completed, always in `[0, 1]`.
    pub progress: f64,
}

impl Packet {
    /// A freshly spawned packet: no history, no progress.
    #[inline]
    pub fn spawn(id: PacketId, at: NodeId) -> Self {
        Self { id, at, prev: None, progress: 0.0 }
    }

    #[inline]
    pub fn phase(&self) -> PacketPhase {
        if self.progress >= 1.0 { PacketPhase::Arrived } else { PacketPhase::Traveling }
    }

    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.phase() == PacketPhase::Arrived
    }

    /// Add `delta` to the hop progress, clamped to 1.
    pub fn advance(&mut self, delta: f64) {
        let p = self.progress + delta;
        self.progress = if p >= 1.0 - PROGRESS_EPSILON { 1.0 } else { p.max(0.0) };
    }

    /// Complete the hop onto `next`.
    pub fn hop_to(&mut self, next: NodeId) {
        self.prev = Some(self.at);
        self.at = next;
        self.progress = 0.0;
    }
}
