//! `hp-sim`: controller, tick stepper, and frame scheduler for the
//! `hot_potato` routing playground.
//!
//! # One frame
//!
//! ```text
//! Scheduler::run_frame()
//!   └─ Controller::tick()          (skipped while paused / speed <= 0 / empty)
//!        ├─ stepper::advance       decide hops, move, drop stuck, deliver
//!        ├─ observer.on_step
//!        ├─ observer.on_packets    views with the active edge per packet
//!        └─ observer.on_count_changed   only if the live count moved
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs hop decisions on Rayon's thread pool.             |
//! | `serde`    | `Serialize` for `PacketView` and everything below it.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::{cell::RefCell, rc::Rc};
//! use hp_core::SimConfig;
//! use hp_sim::{attach, Scheduler, SimBuilder};
//!
//! let ctl = Rc::new(RefCell::new(SimBuilder::new(SimConfig::default()).build()?));
//! let mut sched = Scheduler::new();
//! attach(&ctl, &mut sched);
//! while sched.request_frame().is_some() && sched.run_frame() {
//!     if ctl.borrow().packet_count() == 0 { break; }
//! }
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod snapshot;
pub mod stepper;


pub use builder::SimBuilder;
pub use controller::{Controller, Stats};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::{attach, Attachment, FrameRequest, Scheduler, Subscription};
pub use snapshot::{packet_views, PacketView};
pub use stepper::{advance, StepParams, StepReport};
