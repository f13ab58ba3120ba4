//! Observer trait: the read-only side of the simulation.

use hp_core::Tick;
use hp_network::Network;

use crate::{PacketView, StepReport};

/// Callbacks invoked by the [`Controller`][crate::Controller] whenever its
/// state changes.  A renderer implements this; so do test recorders and
/// the playground's JSON emitter.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: count display
///
/// ```rust,ignore
/// struct InFlight(usize);
///
/// impl SimObserver for InFlight {
///     fn on_count_changed(&mut self, count: usize) {
///         self.0 = count;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A new network was generated (at build, resize, or regeneration).
    fn on_network(&mut self, _network: &Network) {}

    /// The packet set changed: after every effective tick, add, reset, or
    /// regeneration.  `tick` is the controller's frame counter.
    fn on_packets(&mut self, _tick: Tick, _packets: &[PacketView]) {}

    /// The number of live packets changed.  Fired at most once per tick,
    /// and once per add/reset/regeneration.
    fn on_count_changed(&mut self, _count: usize) {}

    /// An effective tick completed.
    fn on_step(&mut self, _tick: Tick, _report: &StepReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
