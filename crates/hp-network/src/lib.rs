//! `hp-network`: router network, exit lookup, and next-hop selection.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `Network` (edge list + CSR adjacency), `NetworkBuilder`   |
//! | [`generator`] | `generate`, `GenParams`                                   |
//! | [`exit`]      | `nearest_exit`, `distance_to_nearest_exit`, `ExitHit`     |
//! | [`router`]    | `HopSelector` trait, `GreedyExitSelector`                 |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize` on `Network` and `Edge`.               |
//! | `fx-hash` | FxHash instead of SipHash for link de-duplication.         |

pub mod error;
pub mod exit;
pub mod generator;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use exit::{distance_to_nearest_exit, nearest_exit, ExitHit};
pub use generator::{generate, GenParams};
pub use network::{Edge, Network, NetworkBuilder};
pub use router::{GreedyExitSelector, HopSelector};
