//! `hp-packet`: in-flight packet state and the live packet set.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`packet`] | `Packet`, `PacketPhase`: per-packet hop state              |
//! | [`store`]  | `PacketStore`: spawn, remove, reset                        |
//! | [`error`]  | `PacketError`, `PacketResult<T>`                            |
//!
//! # Movement model
//!
//! A packet is always anchored at a router and animates along one link:
//!
//! 1. Spawned at a router with `prev = None`, `progress = 0` (traveling).
//! 2. Each tick `hp-sim` adds `step * speed` to `progress`, capped at 1.
//! 3. At 1 the packet has arrived; on the following tick the selector picks
//!    the next router and [`Packet::hop_to`] moves the anchor, or the packet
//!    is dropped as stuck.
//! 4. A packet anchored within the delivery threshold of an exit leaves the
//!    network (delivered).

pub mod error;
pub mod packet;
pub mod store;


pub use error::{PacketError, PacketResult};
pub use packet::{Packet, PacketPhase, PROGRESS_EPSILON};
pub use store::PacketStore;
