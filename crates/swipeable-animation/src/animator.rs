//! The single animated scalar behind a swipeable handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use swipeable_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};

use crate::animation::{AnimationRequest, AnimationSpec, DurationPolicy, SpringSpec};

/// Integration step for spring physics, independent of the host frame rate.
const SPRING_TIMESTEP_SECONDS: f32 = 1.0 / 240.0;

type Completion = Box<dyn FnOnce() + 'static>;

/// Animated horizontal offset.
///
/// Only the most recent [`animate_to`](Self::animate_to) request may notify.
/// Starting a new request, calling [`set_immediate`](Self::set_immediate) or
/// [`stop`](Self::stop) drops the previous completion without running it.
pub struct PositionAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

struct AnimatorInner {
    clock: FrameClock,
    current: f32,
    start: f32,
    target: f32,
    /// Spring velocity in progress units per second.
    velocity: f32,
    policy: DurationPolicy,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_complete: Option<Completion>,
    generation: u64,
    running: bool,
}

impl AnimatorInner {
    /// Returns `true` when an animation was actually in flight.
    fn cancel_in_flight(&mut self) -> bool {
        let was_running = self.running;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.on_complete = None;
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        was_running
    }

    fn settle_at_target(&mut self) {
        self.current = self.target;
        self.start = self.target;
        self.velocity = 0.0;
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
    }

    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let duration_nanos = spec.duration_millis.saturating_mul(1_000_000).max(1);
        let linear_progress = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        let progress = spec.easing.transform(linear_progress);

        self.current = self.start + (self.target - self.start) * progress;
        linear_progress >= 1.0
    }

    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let distance = self.target - self.start;
        if distance.abs() < spec.position_threshold {
            return true;
        }

        let Some(last_frame) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return false;
        };
        let mut remaining = frame_time_nanos.saturating_sub(last_frame) as f32 / 1_000_000_000.0;

        // Semi-implicit Euler in progress space, target at 1.0.
        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut progress = (self.current - self.start) / distance;
        while remaining > 0.0 {
            let step = SPRING_TIMESTEP_SECONDS.min(remaining);
            let displacement = progress - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            progress += self.velocity * step;
            remaining -= step;
        }

        self.current = self.start + distance * progress.clamp(-1.0, 2.0);
        log::trace!(
            "spring at {:.3} (target {:.3}, velocity {:.4})",
            self.current,
            self.target,
            self.velocity
        );

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (self.current - self.target).abs() < spec.position_threshold;
        at_rest && near_target
    }
}

impl PositionAnimator {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        let inner = AnimatorInner {
            clock: runtime.frame_clock(),
            current: initial,
            start: initial,
            target: initial,
            velocity: 0.0,
            policy: DurationPolicy::Immediate,
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_complete: None,
            generation: 0,
            running: false,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current visual value.
    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    /// Value the animator is heading toward (equal to [`value`](Self::value) at rest).
    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Writes the value synchronously, cancelling any in-flight animation
    /// without notifying it.
    pub fn set_immediate(&self, value: f32) {
        let mut inner = self.inner.borrow_mut();
        if inner.cancel_in_flight() {
            log::trace!("animation #{} interrupted by direct write", inner.generation);
        }
        inner.generation += 1;
        inner.current = value;
        inner.start = value;
        inner.target = value;
        inner.velocity = 0.0;
        inner.policy = DurationPolicy::Immediate;
    }

    /// Freezes the value where it is and drops any pending completion.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.cancel_in_flight() {
            inner.generation += 1;
            inner.target = inner.current;
            inner.start = inner.current;
            inner.velocity = 0.0;
        }
    }

    /// Starts moving toward `target`, superseding any earlier request.
    ///
    /// `on_complete` runs exactly once, from a frame callback, unless this
    /// request is superseded or cancelled first.
    pub fn animate_to(
        &self,
        target: f32,
        policy: DurationPolicy,
        on_complete: impl FnOnce() + 'static,
    ) -> AnimationHandle {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            if inner.cancel_in_flight() {
                log::trace!("animation #{} superseded", inner.generation);
            }
            inner.generation += 1;
            inner.start = inner.current;
            inner.target = target;
            inner.policy = policy;
            inner.velocity = 0.0;
            if matches!(policy, DurationPolicy::Immediate | DurationPolicy::Instant) {
                inner.current = target;
            }
            inner.on_complete = Some(Box::new(on_complete));
            inner.running = true;
            log::trace!(
                "animation #{} from {:.3} to {target:.3} ({policy:?})",
                inner.generation,
                inner.start
            );
            inner.generation
        };

        Self::schedule_frame(&self.inner, generation);
        AnimationHandle {
            generation,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Carries out `request`. [`DurationPolicy::Immediate`] requests write the
    /// value directly, return `None` and never run `on_complete`.
    pub fn apply(
        &self,
        request: AnimationRequest,
        on_complete: impl FnOnce() + 'static,
    ) -> Option<AnimationHandle> {
        match request.policy {
            DurationPolicy::Immediate => {
                self.set_immediate(request.target);
                None
            }
            policy => Some(self.animate_to(request.target, policy, on_complete)),
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner>>, generation: u64) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });

        let mut inner = this.borrow_mut();
        if registration.is_active() {
            inner.registration = Some(registration);
        } else {
            log::warn!(
                "frame runtime is gone; animation #{generation} snaps to {:.3} without completing",
                inner.target
            );
            inner.on_complete = None;
            inner.settle_at_target();
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner>>, generation: u64, frame_time_nanos: u64) {
        let (completion, schedule_next) = {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            inner.registration = None;

            let finished = match inner.policy {
                DurationPolicy::Immediate | DurationPolicy::Instant => true,
                DurationPolicy::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                DurationPolicy::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };

            if finished {
                inner.settle_at_target();
                (inner.on_complete.take(), false)
            } else {
                (None, true)
            }
        };

        if schedule_next {
            Self::schedule_frame(this, generation);
        }
        if let Some(on_complete) = completion {
            on_complete();
        }
    }
}

impl Clone for PositionAnimator {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Handle to one [`PositionAnimator::animate_to`] request.
pub struct AnimationHandle {
    generation: u64,
    inner: Weak<RefCell<AnimatorInner>>,
}

impl AnimationHandle {
    /// `true` while this request is still the animator's current one and has
    /// not completed.
    pub fn is_active(&self) -> bool {
        self.inner.upgrade().is_some_and(|inner| {
            let inner = inner.borrow();
            inner.generation == self.generation && inner.running
        })
    }

    /// Cancels this request if it is still current. Its completion never runs.
    pub fn cancel(self) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let mut inner = inner.borrow_mut();
        if inner.generation != self.generation || !inner.cancel_in_flight() {
            return false;
        }
        inner.generation += 1;
        inner.target = inner.current;
        inner.start = inner.current;
        inner.velocity = 0.0;
        true
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
