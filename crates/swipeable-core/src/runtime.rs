use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    /// Ids cancelled while a drain was running; those entries were already
    /// taken off the queue and must be skipped before they run.
    cancelled_in_drain: RefCell<SmallVec<[FrameCallbackId; 4]>>,
    draining: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            cancelled_in_drain: RefCell::new(SmallVec::new()),
            draining: Cell::new(false),
            last_frame_nanos: Cell::new(None),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "frame callback registered off the runtime thread",
        );
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        } else if self.draining.get() {
            self.cancelled_in_drain.borrow_mut().push(id);
        }
        let callbacks_empty = callbacks.is_empty();
        drop(callbacks);
        if callbacks_empty && !self.draining.get() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<(FrameCallbackId, FrameCallback)> =
            Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push((entry.id, callback));
            }
        }
        drop(callbacks);

        log::trace!(
            "draining {} frame callback(s) at {frame_time_nanos}ns",
            pending.len()
        );
        self.last_frame_nanos.set(Some(frame_time_nanos));
        self.draining.set(true);
        for (id, callback) in pending {
            let cancelled = {
                let mut cancelled = self.cancelled_in_drain.borrow_mut();
                match cancelled.iter().position(|candidate| *candidate == id) {
                    Some(index) => {
                        cancelled.swap_remove(index);
                        true
                    }
                    None => false,
                }
            };
            if !cancelled {
                callback(frame_time_nanos);
            }
        }
        self.draining.set(false);
        self.cancelled_in_drain.borrow_mut().clear();

        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

/// Owning side of the frame runtime.
///
/// Everything that animates holds a [`RuntimeHandle`] instead, so dropping the
/// `Runtime` quietly disables every pending frame callback.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Rc::new(DefaultScheduler))
    }
}

/// Scheduler for hosts that poll [`Runtime::needs_frame`] instead of being told.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Returns `None` once the owning [`Runtime`] has been dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs every callback registered before this call with the given frame time.
    ///
    /// Callbacks registered while draining are deferred to the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.has_frame_callbacks())
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.needs_frame.get())
    }

    /// Timestamp of the most recent drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
