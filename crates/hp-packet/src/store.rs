//! The `PacketStore`: the live set of in-flight packets.

use tracing::debug;

use hp_core::{NodeId, PacketId, SimRng};
use hp_network::Network;

use crate::{Packet, PacketError, PacketResult};

/// Holds every in-flight packet in spawn order.
///
/// Ids are allocated as `1 + max(live ids)`, or 0 for an empty store, so an
/// id can be reused once every packet above it has left the network.  Ids are
/// always unique within the live set.
///
/// The store never notifies anyone itself; mutating methods return what
/// changed and the controller reports the new count to its observer.
#[derive(Clone, Debug, Default)]
pub struct PacketStore {
    packets: Vec<Packet>,
}

impl PacketStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Packet> + '_ {
        self.packets.iter()
    }

    pub fn as_slice(&self) -> &[Packet] {
        &self.packets
    }

    pub fn get(&self, id: PacketId) -> Option<&Packet> {
        self.packets.iter().find(|p| p.id == id)
    }

    /// The id the next spawned packet will receive.
    pub fn next_id(&self) -> PacketId {
        self.packets
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(PacketId(0), PacketId::next)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Spawn a packet at a uniformly random router.
    ///
    /// Returns `None` without touching the store when `network` has no
    /// nodes.
    pub fn add(&mut self, network: &Network, rng: &mut SimRng) -> Option<Packet> {
        let at = NodeId(rng.index(network.node_count())? as u32);
        let packet = Packet::spawn(self.next_id(), at);
        self.packets.push(packet);
        debug!(packet = %packet.id, node = %at, live = self.packets.len(), "packet added");
        Some(packet)
    }

    /// Spawn a packet at a chosen router.
    ///
    /// # Errors
    ///
    /// [`PacketError::NodeNotFound`] if `at` is not a node of `network`.
    pub fn spawn_at(&mut self, network: &Network, at: NodeId) -> PacketResult<Packet> {
        if !network.contains_node(at) {
            return Err(PacketError::NodeNotFound(at));
        }
        let packet = Packet::spawn(self.next_id(), at);
        self.packets.push(packet);
        debug!(packet = %packet.id, node = %at, live = self.packets.len(), "packet spawned");
        Ok(packet)
    }

    /// Drop every packet.  Returns how many were removed.
    pub fn reset(&mut self) -> usize {
        let n = self.packets.len();
        self.packets.clear();
        n
    }

    /// Remove the packets with the given ids.  Returns how many were removed.
    pub fn remove(&mut self, ids: &[PacketId]) -> usize {
        self.retain_mut(|p| !ids.contains(&p.id))
    }

    /// Keep only the packets for which `f` returns `true`, letting `f`
    /// update them in place.  Order is preserved.  Returns how many were
    /// removed.
    pub fn retain_mut<F>(&mut self, f: F) -> usize
    where
        F: FnMut(&mut Packet) -> bool,
    {
        let before = self.packets.len();
        self.packets.retain_mut(f);
        before - self.packets.len()
    }
}
