//! `hp-core`: foundational types for the `hot_potato` routing playground.
//!
//! This crate is a dependency of every other `hp-*` crate.  It intentionally
//! has no `hp-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `ExitId`, `PacketId`                        |
//! | [`geo`]         | `Point`, `Viewport`, Euclidean distance               |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `SimConfig`, `SpeedFactor`                            |
//! | [`error`]       | `HpError`, `HpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `SimConfig` from a file.                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, SpeedFactor};
pub use error::{HpError, HpResult};
pub use geo::{Point, Viewport};
pub use ids::{ExitId, NodeId, PacketId};
pub use rng::SimRng;
pub use time::Tick;
