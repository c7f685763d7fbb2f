//! Frame scheduling.
//!
//! The host's display refresh signal sits behind [`FrameScheduler`]; the
//! browser backs it with `requestAnimationFrame`, the native host and tests
//! with [`ManualScheduler`]. [`FrameLoop`] re-arms itself after each frame
//! and guarantees that nothing runs once it has been stopped.

use crate::error::FieldResult;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host handle for one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CancelToken(pub u64);

pub trait FrameScheduler {
    /// Queue `callback` for the next frame; it receives the host time in milliseconds.
    /// An error means the callback will never run.
    fn schedule(&self, callback: FrameCallback) -> FieldResult<CancelToken>;
    /// Drop a queued callback. Unknown or already-fired tokens are ignored.
    fn cancel(&self, token: CancelToken);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn schedule(&self, callback: FrameCallback) -> FieldResult<CancelToken> {
        (**self).schedule(callback)
    }

    fn cancel(&self, token: CancelToken) {
        (**self).cancel(token)
    }
}

/// Scheduler pumped explicitly by the owner via [`ManualScheduler::fire`].
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(CancelToken, FrameCallback)>>,
    fired: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call. Callbacks scheduled while
    /// firing wait for the next call. Returns how many ran.
    pub fn fire(&self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback(now_ms);
        }
        self.fired.set(self.fired.get() + count as u64);
        count
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Total callbacks run since creation.
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&self, callback: FrameCallback) -> FieldResult<CancelToken> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let token = CancelToken(id);
        self.queue.borrow_mut().push((token, callback));
        Ok(token)
    }

    fn cancel(&self, token: CancelToken) {
        self.queue.borrow_mut().retain(|(t, _)| *t != token);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

struct LoopInner<S> {
    scheduler: S,
    state: Cell<DriverState>,
    generation: Cell<u64>,
    pending: Cell<Option<CancelToken>>,
    on_frame: RefCell<Box<dyn FnMut(f64)>>,
}

impl<S> LoopInner<S> {
    fn is_current(&self, generation: u64) -> bool {
        self.state.get() == DriverState::Running && self.generation.get() == generation
    }
}

/// Continuously re-scheduled per-frame callback.
///
/// Stopping bumps a generation counter and cancels the pending token, so a
/// callback the host already dequeued still sees it is stale and returns.
pub struct FrameLoop<S: FrameScheduler + 'static> {
    inner: Rc<LoopInner<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn new(scheduler: S, on_frame: impl FnMut(f64) + 'static) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                scheduler,
                state: Cell::new(DriverState::Stopped),
                generation: Cell::new(0),
                pending: Cell::new(None),
                on_frame: RefCell::new(Box::new(on_frame)),
            }),
        }
    }

    /// Arm the first frame. If the host refuses it the loop stays stopped.
    pub fn start(&self) -> FieldResult<()> {
        if self.inner.state.get() == DriverState::Running {
            return Ok(());
        }
        self.inner.state.set(DriverState::Running);
        schedule_next(&self.inner).map_err(|e| {
            self.inner.state.set(DriverState::Stopped);
            e
        })
    }

    pub fn stop(&self) {
        if self.inner.state.get() == DriverState::Stopped {
            return;
        }
        self.inner.state.set(DriverState::Stopped);
        self.inner.generation.set(self.inner.generation.get() + 1);
        if let Some(token) = self.inner.pending.take() {
            self.inner.scheduler.cancel(token);
        }
    }

    pub fn state(&self) -> DriverState {
        self.inner.state.get()
    }
}

impl<S: FrameScheduler + 'static> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S: FrameScheduler + 'static>(inner: &Rc<LoopInner<S>>) -> FieldResult<()> {
    let generation = inner.generation.get();
    let weak: Weak<LoopInner<S>> = Rc::downgrade(inner);
    let token = inner.scheduler.schedule(Box::new(move |now_ms| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if !inner.is_current(generation) {
            return;
        }
        inner.pending.set(None);
        (inner.on_frame.borrow_mut())(now_ms);
        if inner.is_current(generation) {
            if let Err(e) = schedule_next(&inner) {
                log::error!("[frame] could not re-arm frame loop: {e}");
                inner.state.set(DriverState::Stopped);
            }
        }
    }))?;
    inner.pending.set(Some(token));
    Ok(())
}
