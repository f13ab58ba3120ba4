//! Frame scheduling and resize dispatch.
//!
//! The scheduler owns nothing from the simulation.  A host (browser shim,
//! headless driver, test) calls [`Scheduler::request_frame`] when it wants the
//! next frame, then [`Scheduler::run_frame`] when the frame is due, and
//! [`Scheduler::resize`] when its surface changes size.  Subscribers run in
//! subscription order, on the caller's thread.
//!
//! [`attach`] wires a shared [`Controller`] to both subscriptions through a
//! weak reference, so dropping the controller silently ends its callbacks.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use hp_core::{Tick, Viewport};
use hp_network::HopSelector;

use crate::{Controller, SimObserver};

type TickFn = Box<dyn FnMut(Tick)>;
type ResizeFn = Box<dyn FnMut(Viewport)>;

/// Token returned by [`Scheduler::on_tick`] / [`Scheduler::on_resize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Token for the single pending frame request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

#[derive(Default)]
pub struct Scheduler {
    tick_subs:   Vec<(Subscription, TickFn)>,
    resize_subs: Vec<(Subscription, ResizeFn)>,
    next_sub:    u64,
    next_frame:  u64,
    pending:     Option<FrameRequest>,
    frames:      Tick,
    torn_down:   bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` on every frame until cancelled.
    pub fn on_tick(&mut self, f: TickFn) -> Subscription {
        let sub = self.next_subscription();
        if !self.torn_down {
            self.tick_subs.push((sub, f));
        }
        sub
    }

    /// Run `f` on every resize until cancelled.
    pub fn on_resize(&mut self, f: ResizeFn) -> Subscription {
        let sub = self.next_subscription();
        if !self.torn_down {
            self.resize_subs.push((sub, f));
        }
        sub
    }

    /// Drop a subscription.  Returns `false` if it was already gone.
    pub fn cancel(&mut self, sub: Subscription) -> bool {
        let before = self.tick_subs.len() + self.resize_subs.len();
        self.tick_subs.retain(|(s, _)| *s != sub);
        self.resize_subs.retain(|(s, _)| *s != sub);
        before != self.tick_subs.len() + self.resize_subs.len()
    }

    /// Ask for the next frame.  At most one request is pending; asking again
    /// returns the existing one.  `None` after [`teardown`](Self::teardown).
    pub fn request_frame(&mut self) -> Option<FrameRequest> {
        if self.torn_down {
            return None;
        }
        if let Some(req) = self.pending {
            return Some(req);
        }
        let req = FrameRequest(self.next_frame);
        self.next_frame += 1;
        self.pending = Some(req);
        Some(req)
    }

    /// Withdraw `req` if it is still the pending request.
    pub fn cancel_frame(&mut self, req: FrameRequest) -> bool {
        if self.pending == Some(req) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames dispatched so far.
    pub fn frames(&self) -> Tick {
        self.frames
    }

    /// Dispatch the pending frame to every tick subscriber.
    ///
    /// Consumes the request; the host requests again for the next frame.
    /// Returns `false` (and runs nothing) if no frame was pending.
    pub fn run_frame(&mut self) -> bool {
        if self.torn_down || self.pending.take().is_none() {
            return false;
        }
        self.frames = self.frames + 1;
        let frame = self.frames;
        for (_, f) in &mut self.tick_subs {
            f(frame);
        }
        true
    }

    /// Dispatch a surface size change to every resize subscriber.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if self.torn_down {
            return false;
        }
        debug!(%viewport, subscribers = self.resize_subs.len(), "resize");
        for (_, f) in &mut self.resize_subs {
            f(viewport);
        }
        true
    }

    /// Drop all subscribers and the pending frame.  Nothing fires afterwards.
    pub fn teardown(&mut self) {
        debug!(
            ticks = self.tick_subs.len(),
            resizes = self.resize_subs.len(),
            pending = self.pending.is_some(),
            "scheduler teardown"
        );
        self.tick_subs.clear();
        self.resize_subs.clear();
        self.pending = None;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn next_subscription(&mut self) -> Subscription {
        let sub = Subscription(self.next_sub);
        self.next_sub += 1;
        sub
    }
}

/// The two subscriptions created by [`attach`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub tick:   Subscription,
    pub resize: Subscription,
}

impl Attachment {
    /// Cancel both subscriptions.
    pub fn detach(self, scheduler: &mut Scheduler) {
        scheduler.cancel(self.tick);
        scheduler.cancel(self.resize);
    }
}

/// Drive `controller` from `scheduler`: every frame ticks it, every resize
/// regenerates its network.
///
/// The scheduler holds only weak references.  A tick that finds the
/// controller already borrowed skips that frame with a warning.  A resize
/// that finds it borrowed is kept, latest size wins, and applied at the
/// start of the next frame before the tick.
pub fn attach<S, O>(controller: &Rc<RefCell<Controller<S, O>>>, scheduler: &mut Scheduler) -> Attachment
where
    S: HopSelector + 'static,
    O: SimObserver + 'static,
{
    let deferred: Rc<Cell<Option<Viewport>>> = Rc::new(Cell::new(None));

    let weak: Weak<RefCell<Controller<S, O>>> = Rc::downgrade(controller);
    let pending = Rc::clone(&deferred);
    let tick = scheduler.on_tick(Box::new(move |frame| {
        let Some(ctl) = weak.upgrade() else { return };
        match ctl.try_borrow_mut() {
            Ok(mut ctl) => {
                if let Some(viewport) = pending.take() {
                    debug!(%viewport, %frame, "applying deferred resize");
                    apply_resize(&mut ctl, viewport);
                }
                ctl.tick();
            }
            Err(_) => warn!(%frame, "controller busy, frame skipped"),
        }
    }));

    let weak: Weak<RefCell<Controller<S, O>>> = Rc::downgrade(controller);
    let pending = deferred;
    let resize = scheduler.on_resize(Box::new(move |viewport| {
        let Some(ctl) = weak.upgrade() else { return };
        match ctl.try_borrow_mut() {
            Ok(mut ctl) => {
                pending.set(None);
                apply_resize(&mut ctl, viewport);
            }
            Err(_) => {
                warn!(%viewport, "controller busy, resize deferred to next frame");
                pending.set(Some(viewport));
            }
        }
    }));

    Attachment { tick, resize }
}

fn apply_resize<S: HopSelector, O: SimObserver>(ctl: &mut Controller<S, O>, viewport: Viewport) {
    if let Err(err) = ctl.set_viewport_size(viewport.width, viewport.height) {
        warn!(%viewport, %err, "resize rejected");
    }
}
