//! Simulation configuration and the playback speed knob.

use std::fmt;
use std::time::Duration;

use crate::{HpError, HpResult, Viewport};

// ── SpeedFactor ───────────────────────────────────────────────────────────────

/// Playback speed multiplier applied to the per-tick progress step.
///
/// The UI offers `[MIN, MAX]` in increments of `STEP`; [`faster`](Self::faster)
/// and [`slower`](Self::slower) walk that ladder.  The wrapper itself does not
/// reject out-of-range values: a factor `<= 0` is legal and simply freezes
/// the simulation (see [`is_active`](Self::is_active)).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeedFactor(pub f64);

impl SpeedFactor {
    pub const MIN:     SpeedFactor = SpeedFactor(0.25);
    pub const MAX:     SpeedFactor = SpeedFactor(2.0);
    pub const STEP:    f64         = 0.25;
    pub const DEFAULT: SpeedFactor = SpeedFactor(1.0);

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `true` if ticks at this speed move packets at all.
    #[inline]
    pub fn is_active(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Clamp into `[MIN, MAX]`.  Non-finite values fall back to `DEFAULT`.
    pub fn clamped(self) -> SpeedFactor {
        if !self.0.is_finite() {
            return Self::DEFAULT;
        }
        SpeedFactor(self.0.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// One `STEP` up, capped at `MAX`.
    pub fn faster(self) -> SpeedFactor {
        SpeedFactor(self.clamped().0 + Self::STEP).clamped()
    }

    /// One `STEP` down, floored at `MIN`.
    pub fn slower(self) -> SpeedFactor {
        SpeedFactor(self.clamped().0 - Self::STEP).clamped()
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SpeedFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// The defaults reproduce the reference playground.  Applications typically
/// load overrides from JSON (with the `serde` feature; missing fields keep
/// their defaults) and pass the result to `hp_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Router nodes per generated network.
    pub node_count: usize,

    /// Exit points per generated network.  Must be at least 1.
    pub exit_count: usize,

    /// Inset from the viewport edge inside which nodes are placed.
    pub padding: f64,

    /// Exits sit `exit_inset * padding` in from their border.
    pub exit_inset: f64,

    /// How many nearest nodes each node links to during generation.
    pub neighbor_count: usize,

    /// A packet whose node is within this distance of an exit is delivered.
    pub delivery_threshold: f64,

    /// Hop progress added per tick at speed 1.0.
    pub progress_step: f64,

    /// Speed the controller starts with.
    pub default_speed: SpeedFactor,

    /// Viewport used until the host reports its real size.
    pub viewport: Viewport,

    /// Target animation frames per second.  Pacing only; the simulation
    /// itself is frame-count driven.
    pub tick_rate_hz: u32,

    /// Master RNG seed.  `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Spawn packet 0 at node 0 when the controller is built.
    pub spawn_initial_packet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            node_count:           12,
            exit_count:           3,
            padding:              40.0,
            exit_inset:           0.4,
            neighbor_count:       3,
            delivery_threshold:   30.0,
            progress_step:        0.01,
            default_speed:        SpeedFactor::DEFAULT,
            viewport:             Viewport::default(),
            tick_rate_hz:         60,
            seed:                 None,
            spawn_initial_packet: true,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot honour.
    ///
    /// A zero exit count is rejected here rather than at runtime: with no
    /// exits nothing can ever be delivered.
    pub fn validate(&self) -> HpResult<()> {
        if self.exit_count == 0 {
            return Err(HpError::Config("exit_count must be at least 1".into()));
        }
        let finite = [
            ("padding", self.padding),
            ("exit_inset", self.exit_inset),
            ("delivery_threshold", self.delivery_threshold),
            ("progress_step", self.progress_step),
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(HpError::Config(format!("{name} must be finite, got {v}")));
            }
        }
        if self.padding < 0.0 || self.delivery_threshold < 0.0 || self.exit_inset < 0.0 {
            return Err(HpError::Config(
                "padding, exit_inset and delivery_threshold must be non-negative".into(),
            ));
        }
        if self.progress_step <= 0.0 {
            return Err(HpError::Config(format!(
                "progress_step must be positive, got {}",
                self.progress_step
            )));
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(HpError::Config(format!(
                "viewport must have positive size, got {}",
                self.viewport
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(HpError::Config("tick_rate_hz must be at least 1".into()));
        }
        Ok(())
    }

    /// Wall-clock time between frames at `tick_rate_hz`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}
