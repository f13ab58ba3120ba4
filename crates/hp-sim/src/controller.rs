//! The `Controller`, sole owner of all mutable simulation state.

use tracing::{debug, info, warn};

use hp_core::{PacketId, SimConfig, SimRng, SpeedFactor, Tick, Viewport};
use hp_network::{generate, GenParams, GreedyExitSelector, HopSelector, Network};
use hp_packet::PacketStore;

use crate::snapshot::packet_views;
use crate::stepper::{advance, StepParams, StepReport};
use crate::{NoopObserver, PacketView, SimError, SimObserver, SimResult};

/// Running totals since the controller was built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub spawned:     u64,
    pub delivered:   u64,
    pub stuck:       u64,
    pub networks:    u64,
}

/// Holds the network, the live packets, and the playback settings, and
/// applies user actions and ticks to them in the order they arrive.
///
/// Every mutation goes through a method here; the observer `O` is told about
/// each change and never sees mutable state.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Controller<S: HopSelector = GreedyExitSelector, O: SimObserver = NoopObserver> {
    pub(crate) config:   SimConfig,
    pub(crate) params:   StepParams,
    pub(crate) network:  Network,
    pub(crate) packets:  PacketStore,
    pub(crate) selector: S,
    pub(crate) observer: O,
    pub(crate) rng:      SimRng,
    pub(crate) speed:    SpeedFactor,
    pub(crate) playing:  bool,
    pub(crate) tick:     Tick,
    pub(crate) stats:    Stats,
}

impl<S: HopSelector, O: SimObserver> Controller<S, O> {
    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn packets(&self) -> &PacketStore {
        &self.packets
    }

    pub fn packet_count(&self) -> usize {
        self.packets.len()
    }

    pub fn speed(&self) -> SpeedFactor {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of effective ticks so far.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Current packet views, including each packet's active edge.
    pub fn snapshot(&self) -> Vec<PacketView> {
        packet_views(&self.packets, &self.network, &self.selector)
    }

    // ── User actions ──────────────────────────────────────────────────────

    /// Spawn a packet at a random router.
    ///
    /// Returns `None` (and notifies nobody) while the network is empty.
    pub fn add_packet(&mut self) -> Option<PacketId> {
        let packet = self.packets.add(&self.network, &mut self.rng)?;
        self.stats.spawned += 1;
        self.publish_packets();
        Some(packet.id)
    }

    /// Drop every packet.  The network is kept.
    pub fn reset(&mut self) {
        let cleared = self.packets.reset();
        debug!(cleared, "reset");
        self.publish_packets();
    }

    /// Set the playback speed multiplier.
    ///
    /// Any value is stored; a factor `<= 0` freezes the simulation until a
    /// positive one is set.
    pub fn set_speed(&mut self, factor: f64) {
        let speed = SpeedFactor(factor);
        if speed != speed.clamped() {
            warn!(%speed, min = %SpeedFactor::MIN, max = %SpeedFactor::MAX, "speed outside UI range");
        }
        debug!(%speed, "speed set");
        self.speed = speed;
    }

    /// One `SpeedFactor::STEP` faster, capped at `SpeedFactor::MAX`.
    pub fn speed_up(&mut self) -> SpeedFactor {
        self.set_speed(self.speed.faster().value());
        self.speed
    }

    /// One `SpeedFactor::STEP` slower, floored at `SpeedFactor::MIN`.
    pub fn slow_down(&mut self) -> SpeedFactor {
        self.set_speed(self.speed.slower().value());
        self.speed
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            debug!(playing, "playback toggled");
        }
        self.playing = playing;
    }

    /// Flip play/pause; returns the new state.
    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    /// The host surface changed size: lay out a new network for it.
    ///
    /// Packets are cleared in the same call, before any later tick can see
    /// the new network, and observers get the new network and a count of 0.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for a non-finite or non-positive size; the
    /// current network is kept.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> SimResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(width) || !ok(height) {
            return Err(SimError::Config(format!(
                "viewport must have positive finite size, got {width}x{height}"
            )));
        }
        self.config.viewport = Viewport::new(width, height);
        self.regenerate();
        Ok(())
    }

    /// Replace the network with a fresh random layout for the current
    /// viewport and clear all packets.
    pub fn regenerate(&mut self) {
        let params = GenParams::from(&self.config);
        let network = generate(self.config.viewport, &params, &mut self.rng);
        self.install_network(network);
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance the simulation by one animation frame.
    ///
    /// Returns `None` without touching anything while paused, at a
    /// non-positive speed, or with no packets in flight.
    pub fn tick(&mut self) -> Option<StepReport> {
        if !self.playing || !self.speed.is_active() || self.packets.is_empty() {
            return None;
        }
        let report = advance(
            &mut self.packets,
            &self.network,
            &self.selector,
            self.speed,
            &self.params,
        );
        self.tick = self.tick + 1;
        self.stats.delivered += report.delivered.len() as u64;
        self.stats.stuck += report.stuck.len() as u64;

        self.observer.on_step(self.tick, &report);
        let views = self.snapshot();
        self.observer.on_packets(self.tick, &views);
        if report.count_changed() {
            self.observer.on_count_changed(report.after);
        }
        Some(report)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    pub(crate) fn install_network(&mut self, network: Network) {
        let cleared = self.packets.reset();
        self.network = network;
        self.stats.networks += 1;
        info!(
            viewport = %self.config.viewport,
            nodes = self.network.node_count(),
            links = self.network.edge_count(),
            exits = self.network.exit_count(),
            cleared,
            "network installed"
        );
        self.observer.on_network(&self.network);
        self.publish_packets();
    }

    /// Tell the observer about the current packet set and its size.
    pub(crate) fn publish_packets(&mut self) {
        let views = self.snapshot();
        self.observer.on_packets(self.tick, &views);
        self.observer.on_count_changed(self.packets.len());
    }
}
