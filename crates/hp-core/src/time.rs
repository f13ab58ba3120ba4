//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter, one per animation
//! frame.  Wall-clock pacing (~60 frames per second) is the scheduler's
//! business; nothing in the simulation reads a clock, so a run driven as
//! fast as possible behaves identically to one paced in real time.

use std::fmt;

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
