//! Fluent builder for constructing a [`Controller`].

use tracing::warn;

use hp_core::{NodeId, SimConfig, SimRng, Tick};
use hp_network::{generate, GenParams, GreedyExitSelector, HopSelector, Network};
use hp_packet::PacketStore;

use crate::controller::{Controller, Stats};
use crate::stepper::StepParams;
use crate::{NoopObserver, SimObserver, SimResult};

/// Fluent builder for [`Controller<S, O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                               |
/// |------------------|---------------------------------------|
/// | `.selector(s)`   | [`GreedyExitSelector`]                |
/// | `.observer(o)`   | [`NoopObserver`]                      |
/// | `.network(n)`    | generated from the config's viewport  |
///
/// # Example
///
/// ```rust,ignore
/// let mut ctl = SimBuilder::new(SimConfig { seed: Some(7), ..SimConfig::default() })
///     .observer(MyRenderer::new())
///     .build()?;
/// ctl.add_packet();
/// while ctl.tick().is_some() {}
/// ```
pub struct SimBuilder<S: HopSelector = GreedyExitSelector, O: SimObserver = NoopObserver> {
    config:   SimConfig,
    selector: S,
    observer: O,
    network:  Option<Network>,
}

impl SimBuilder {
    /// Start from `config` with the greedy selector and no observer.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            selector: GreedyExitSelector,
            observer: NoopObserver,
            network:  None,
        }
    }
}

impl<S: HopSelector, O: SimObserver> SimBuilder<S, O> {
    /// Replace the next-hop policy.
    pub fn selector<S2: HopSelector>(self, selector: S2) -> SimBuilder<S2, O> {
        SimBuilder {
            config:  self.config,
            selector,
            observer: self.observer,
            network: self.network,
        }
    }

    /// Attach the observer that receives networks, snapshots and counts.
    pub fn observer<O2: SimObserver>(self, observer: O2) -> SimBuilder<S, O2> {
        SimBuilder {
            config:   self.config,
            selector: self.selector,
            observer,
            network:  self.network,
        }
    }

    /// Use a hand-built network instead of generating one.
    ///
    /// Resizing or regenerating later still replaces it with a random one.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Validate the config, lay out the network, and return a ready
    /// [`Controller`] (playing, at the configured default speed).
    ///
    /// The observer receives the network, then the initial packet set.
    pub fn build(self) -> SimResult<Controller<S, O>> {
        self.config.validate()?;
        if self.config.default_speed != self.config.default_speed.clamped() {
            warn!(speed = %self.config.default_speed, "default speed outside UI range");
        }

        let mut rng = SimRng::from_seed_opt(self.config.seed);
        let network = match self.network {
            Some(n) => n,
            None    => generate(self.config.viewport, &GenParams::from(&self.config), &mut rng),
        };

        let mut ctl = Controller {
            params:   StepParams::from(&self.config),
            speed:    self.config.default_speed,
            config:   self.config,
            network:  Network::empty(network.viewport),
            packets:  PacketStore::new(),
            selector: self.selector,
            observer: self.observer,
            rng,
            playing:  true,
            tick:     Tick::ZERO,
            stats:    Stats::default(),
        };
        ctl.install_network(network);

        if ctl.config.spawn_initial_packet && !ctl.network.is_empty() {
            ctl.packets.spawn_at(&ctl.network, NodeId(0))?;
            ctl.stats.spawned += 1;
            ctl.publish_packets();
        }
        Ok(ctl)
    }
}
