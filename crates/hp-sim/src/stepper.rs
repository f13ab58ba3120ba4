//! The per-tick state advance.
//!
//! # One tick
//!
//! ```text
//! ① Decide    for every arrived packet (progress == 1) ask the selector
//!              for the next hop (in parallel with the `parallel` feature).
//! ② Apply     in store order:
//!                arrived + hop   → hop_to(next), progress = 0   (rerouted)
//!                arrived + none  → drop                         (stuck)
//!                traveling       → progress += step * speed, capped at 1
//! ③ Deliver   drop every packet anchored within `delivery_threshold` of
//!              its nearest exit.
//! ```
//!
//! A packet that reaches progress 1 during ② waits for the next tick to be
//! forwarded, so a hop completes in `ceil(1 / (step * speed))` ticks plus
//! one forwarding tick.
//!
//! Speed is a multiplier on the progress step, not on the tick rate: the
//! scheduler fires at a fixed frame rate regardless.

use tracing::{debug, trace};

use hp_core::{NodeId, PacketId, SimConfig, SpeedFactor};
use hp_network::{HopSelector, Network};
use hp_packet::{Packet, PacketStore};

// ── StepParams ────────────────────────────────────────────────────────────────

/// Constants the stepper needs from [`SimConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepParams {
    /// Progress per tick at speed 1.0.
    pub progress_step: f64,
    /// Packets anchored at most this far from an exit are delivered.
    pub delivery_threshold: f64,
}

impl From<&SimConfig> for StepParams {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            progress_step:      cfg.progress_step,
            delivery_threshold: cfg.delivery_threshold,
        }
    }
}

impl Default for StepParams {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

// ── StepReport ────────────────────────────────────────────────────────────────

/// What one call to [`advance`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Live packets before the tick.
    pub before: usize,
    /// Live packets after the tick.
    pub after: usize,
    /// Packets forwarded onto a new link.
    pub rerouted: usize,
    /// Packets dropped for lack of an eligible next hop.
    pub stuck: Vec<PacketId>,
    /// Packets that left the network at an exit.
    pub delivered: Vec<PacketId>,
}

impl StepReport {
    /// Report for a tick that changed nothing.
    pub fn idle(live: usize) -> Self {
        Self { before: live, after: live, ..Self::default() }
    }

    /// `true` if the live packet count differs from before the tick.
    #[inline]
    pub fn count_changed(&self) -> bool {
        self.before != self.after
    }
}

// ── Hop decisions ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
enum Decision {
    Travel,
    Hop(NodeId),
    Stuck,
}

#[inline]
fn decide<S: HopSelector + ?Sized>(p: &Packet, network: &Network, selector: &S) -> Decision {
    if !p.is_arrived() {
        return Decision::Travel;
    }
    match selector.next_hop(network, p.at, p.prev) {
        Some(next) => Decision::Hop(next),
        None       => Decision::Stuck,
    }
}

#[cfg(not(feature = "parallel"))]
fn decide_all<S: HopSelector + ?Sized>(
    packets:  &[Packet],
    network:  &Network,
    selector: &S,
) -> Vec<Decision> {
    packets.iter().map(|p| decide(p, network, selector)).collect()
}

#[cfg(feature = "parallel")]
fn decide_all<S: HopSelector + ?Sized>(
    packets:  &[Packet],
    network:  &Network,
    selector: &S,
) -> Vec<Decision> {
    use rayon::prelude::*;

    // Decisions only read shared state; applying them stays sequential so
    // the outcome matches the serial path exactly.
    packets.par_iter().map(|p| decide(p, network, selector)).collect()
}

// ── advance ───────────────────────────────────────────────────────────────────

/// Advance every packet in `store` by one tick.
///
/// No-op (returns [`StepReport::idle`]) when `speed` is not positive or
/// finite, or when the store is empty.
pub fn advance<S: HopSelector + ?Sized>(
    store:    &mut PacketStore,
    network:  &Network,
    selector: &S,
    speed:    SpeedFactor,
    params:   &StepParams,
) -> StepReport {
    let before = store.len();
    if !speed.is_active() || before == 0 {
        return StepReport::idle(before);
    }
    let delta = params.progress_step * speed.value();

    // ── ① Decide ─────────────────────────────────────────────────────────
    let decisions = decide_all(store.as_slice(), network, selector);

    // ── ② Apply + ③ Deliver ──────────────────────────────────────────────
    let mut report = StepReport { before, ..StepReport::default() };
    let mut decisions = decisions.into_iter();
    store.retain_mut(|p| {
        match decisions.next().unwrap_or(Decision::Travel) {
            Decision::Travel => p.advance(delta),
            Decision::Hop(next) => {
                trace!(packet = %p.id, from = %p.at, to = %next, "rerouted");
                p.hop_to(next);
                report.rerouted += 1;
            }
            Decision::Stuck => {
                debug!(packet = %p.id, node = %p.at, "packet stuck, dropping");
                report.stuck.push(p.id);
                return false;
            }
        }
        if network.exit_distance(p.at) <= params.delivery_threshold {
            debug!(packet = %p.id, node = %p.at, "packet delivered");
            report.delivered.push(p.id);
            return false;
        }
        true
    });
    report.after = store.len();

    trace!(
        live = report.after,
        rerouted = report.rerouted,
        stuck = report.stuck.len(),
        delivered = report.delivered.len(),
        "tick advanced"
    );
    report
}
