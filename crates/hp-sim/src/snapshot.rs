//! Read-only packet views handed to renderers.

use hp_core::{NodeId, PacketId, Point};
use hp_network::{HopSelector, Network};
use hp_packet::PacketStore;

/// Everything a renderer needs to draw one packet.
///
/// `target` is the position of the hop the selector would pick right now;
/// renderers highlight the link from `position` to `target` as the packet's
/// active edge and place the packet at [`draw_position`](Self::draw_position).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PacketView {
    pub id:       PacketId,
    pub node:     NodeId,
    pub position: Point,
    pub next:     Option<NodeId>,
    pub target:   Option<Point>,
    pub progress: f64,
}

impl PacketView {
    /// Interpolated position along the active edge; the anchor node when
    /// there is nowhere to go.
    pub fn draw_position(&self) -> Point {
        match self.target {
            Some(t) => self.position.lerp(t, self.progress),
            None    => self.position,
        }
    }
}

/// Build views for every packet in `store`.
///
/// Packets anchored at a node `network` does not know are skipped; that
/// cannot happen while the controller clears packets on regeneration.
pub fn packet_views<S: HopSelector + ?Sized>(
    store:    &PacketStore,
    network:  &Network,
    selector: &S,
) -> Vec<PacketView> {
    store
        .iter()
        .filter_map(|p| {
            let position = network.node(p.at)?;
            let next = selector.next_hop(network, p.at, p.prev);
            Some(PacketView {
                id: p.id,
                node: p.at,
                position,
                next,
                target: next.and_then(|n| network.node(n)),
                progress: p.progress,
            })
        })
        .collect()
}
