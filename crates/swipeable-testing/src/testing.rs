use std::rc::Rc;

use swipeable_button::{ButtonState, SwipeController, SwipeableButtonOptions};
use swipeable_core::{Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};

use crate::recording::{RecordingSideEffects, StateLog};

/// Frames [`SwipeTestRule::pump_until_idle`] will run before giving up.
pub const MAX_SETTLE_FRAMES: usize = 1_000;

/// Headless harness for exercising a swipeable control in tests.
///
/// `SwipeTestRule` owns the frame runtime and a virtual clock, so animations
/// advance only when the test says so. Host callbacks, state changes and
/// haptic requests are recorded for assertions.
pub struct SwipeTestRule {
    runtime: Runtime,
    controller: SwipeController,
    side_effects: Rc<RecordingSideEffects>,
    log: Rc<StateLog>,
    frame_time_nanos: u64,
}

impl SwipeTestRule {
    /// Create a rule around a controller with default options.
    pub fn new() -> Self {
        Self::with_options(SwipeableButtonOptions::default())
    }

    pub fn with_options(options: SwipeableButtonOptions) -> Self {
        Self::with_side_effects(options, Rc::new(RecordingSideEffects::new()))
    }

    pub fn with_side_effects(
        options: SwipeableButtonOptions,
        side_effects: Rc<RecordingSideEffects>,
    ) -> Self {
        let runtime = Runtime::default();
        let log = StateLog::new();
        let controller = SwipeController::new(runtime.handle(), options)
            .with_side_effects(side_effects.clone())
            .with_on_success({
                let log = Rc::clone(&log);
                move || log.record_success()
            })
            .with_on_failure({
                let log = Rc::clone(&log);
                move || log.record_failure()
            })
            .with_on_state_change({
                let log = Rc::clone(&log);
                move |from, to| log.record_change(from, to)
            });
        Self {
            runtime,
            controller,
            side_effects,
            log,
            frame_time_nanos: 0,
        }
    }

    pub fn controller(&self) -> &SwipeController {
        &self.controller
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn side_effects(&self) -> &RecordingSideEffects {
        &self.side_effects
    }

    pub fn log(&self) -> &StateLog {
        &self.log
    }

    pub fn state(&self) -> ButtonState {
        self.controller.state()
    }

    pub fn successes(&self) -> u32 {
        self.log.successes()
    }

    pub fn failures(&self) -> u32 {
        self.log.failures()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Drain scheduled frame callbacks at the supplied timestamp.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) {
        self.frame_time_nanos = self.frame_time_nanos.max(frame_time_nanos);
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Advance the virtual clock by `count` frames, whether or not anything
    /// is scheduled.
    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            let next = self.frame_time_nanos + FRAME_INTERVAL_NANOS;
            self.advance_frame(next);
        }
    }

    /// Run frames until no callbacks remain. Returns how many frames ran.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            frames += 1;
            if frames > MAX_SETTLE_FRAMES {
                panic!(
                    "pump_until_idle ran {MAX_SETTLE_FRAMES} frames; controller stuck in {}",
                    self.controller.state()
                );
            }
            let next = self.frame_time_nanos + FRAME_INTERVAL_NANOS;
            self.advance_frame(next);
        }
        frames
    }

    /// Grab the handle and move it to `raw_delta_x` from the grab point.
    pub fn drag_to(&mut self, raw_delta_x: f32) {
        self.controller.pointer_down();
        self.controller.pointer_move(raw_delta_x);
    }

    /// Release and let any settle animation finish.
    pub fn release(&mut self) {
        self.controller.pointer_up();
        self.pump_until_idle();
    }

    /// Full swipe: grab, move, release, settle.
    pub fn swipe(&mut self, raw_delta_x: f32) {
        self.drag_to(raw_delta_x);
        self.release();
    }
}

impl Default for SwipeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `SwipeTestRule`.
pub fn run_swipe_test<R>(f: impl FnOnce(&mut SwipeTestRule) -> R) -> R {
    let mut rule = SwipeTestRule::new();
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
