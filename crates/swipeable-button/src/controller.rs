//! The gesture state machine of record.
//!
//! [`SwipeController`] owns the handle offset, feeds events through
//! [`transition`], and carries out the resulting effects. Work that reaches
//! outside the controller (host callbacks, haptics, state observers) runs
//! after the internal borrow is released, so hosts may call back into the
//! controller from any of them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::{smallvec, SmallVec};
use swipeable_animation::{AnimationHandle, AnimationRequest, PositionAnimator};
use swipeable_core::RuntimeHandle;

use crate::machine::{transition, ButtonState, Effect, GestureContext, GestureEvent};
use crate::options::SwipeableButtonOptions;
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::sampler::DragTracker;
use crate::side_effects::{dispatch_haptic, HapticKind, NoopSideEffects, SideEffectDispatcher};
use crate::travel::TravelRange;

pub type HostCallback = Rc<dyn Fn()>;
pub type StateListener = Rc<dyn Fn(ButtonState, ButtonState)>;

/// Render-facing snapshot of the handle.
///
/// Clamped to the track: a bouncy settle may carry [`SwipeController::position`]
/// past either end, but the handle is never drawn outside its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    /// Visual offset along the direction of travel, always in `[0, range]`.
    pub offset: f32,
    /// `offset / range`, 0 on a degenerate range.
    pub progress: f32,
    /// Horizontal translation of the handle from its resting edge; negative
    /// in mirrored layouts.
    pub translate_x: f32,
    /// Translation of a full-width fill that slides in behind the handle,
    /// `-range` at rest and 0 when fully travelled.
    pub fill_translate_x: f32,
}

enum HostAction {
    StateChanged(ButtonState, ButtonState),
    Haptic(HapticKind),
    Success,
    Failure,
}

type HostActions = SmallVec<[HostAction; 4]>;

struct ControllerInner {
    state: ButtonState,
    /// Logical offset. Written by the pointer while dragging, snapped to the
    /// settle target otherwise.
    offset: f32,
    range: TravelRange,
    options: SwipeableButtonOptions,
    animator: PositionAnimator,
    settle: Option<AnimationHandle>,
    tracker: DragTracker,
    side_effects: Rc<dyn SideEffectDispatcher>,
    on_success: Option<HostCallback>,
    on_failure: Option<HostCallback>,
    on_state_change: Option<StateListener>,
}

impl ControllerInner {
    fn context(&self) -> GestureContext {
        GestureContext {
            offset: self.offset,
            range: self.range,
            disabled: self.options.disabled,
            is_rtl: self.options.rtl,
            animation_in_flight: self
                .settle
                .as_ref()
                .is_some_and(AnimationHandle::is_active),
        }
    }

    fn cancel_settle(&mut self) {
        if let Some(settle) = self.settle.take() {
            settle.cancel();
        }
    }

    fn track_pointer(&mut self, offset: f32) {
        self.cancel_settle();
        self.offset = offset;
        self.animator.set_immediate(offset);
        log::trace!("handle tracks pointer at {offset:.2}");
    }

    fn settle_to(&mut self, target: f32, controller: Weak<RefCell<ControllerInner>>) {
        self.offset = target;
        let request = AnimationRequest::new(target, self.options.settle_policy());
        self.settle = self.animator.apply(request, move || {
            if let Some(inner) = controller.upgrade() {
                SwipeController { inner }.dispatch(GestureEvent::AnimationComplete);
            }
        });
    }

    /// Applies one event. Returns the host work to run afterwards, or `None`
    /// when the event is an identity transition in the current state.
    fn step(
        &mut self,
        event: GestureEvent,
        controller: &Weak<RefCell<ControllerInner>>,
    ) -> Option<HostActions> {
        let Some(transition) = transition(self.state, event, &self.context()) else {
            log::trace!("{event:?} ignored while {}", self.state);
            return None;
        };

        let mut actions: HostActions = SmallVec::new();
        if transition.changes_state() {
            log::debug!(
                "swipeable button {} -> {} on {event:?}",
                transition.from,
                transition.to
            );
            actions.push(HostAction::StateChanged(transition.from, transition.to));
        }
        if transition.from == ButtonState::Dragging && transition.to != ButtonState::Dragging {
            self.tracker.end();
        }

        self.state = transition.to;
        for effect in transition.effects {
            match effect {
                Effect::TrackPointer(offset) => self.track_pointer(offset),
                Effect::AnimateTo(target) => self.settle_to(target, controller.clone()),
                Effect::Haptic(kind) => actions.push(HostAction::Haptic(kind)),
                Effect::InvokeSuccess => actions.push(HostAction::Success),
                Effect::InvokeFailure => actions.push(HostAction::Failure),
            }
        }
        Some(actions)
    }
}

/// Slide-to-confirm controller.
///
/// Cloning yields another handle to the same control. Dropping the last
/// handle cancels any settle animation still in flight.
pub struct SwipeController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl SwipeController {
    pub fn new(runtime: RuntimeHandle, options: SwipeableButtonOptions) -> Self {
        let inner = ControllerInner {
            state: ButtonState::Idle,
            offset: 0.0,
            range: options.initial_range(),
            options,
            animator: PositionAnimator::new(0.0, runtime),
            settle: None,
            tracker: DragTracker::default(),
            side_effects: Rc::new(NoopSideEffects),
            on_success: None,
            on_failure: None,
            on_state_change: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn with_side_effects(self, side_effects: Rc<dyn SideEffectDispatcher>) -> Self {
        self.inner.borrow_mut().side_effects = side_effects;
        self
    }

    /// Called once each time the handle locks at the far end.
    pub fn with_on_success(self, callback: impl Fn() + 'static) -> Self {
        self.inner.borrow_mut().on_success = Some(Rc::new(callback));
        self
    }

    /// Called once each time a released handle is back at the origin.
    pub fn with_on_failure(self, callback: impl Fn() + 'static) -> Self {
        self.inner.borrow_mut().on_failure = Some(Rc::new(callback));
        self
    }

    pub fn with_on_state_change(self, listener: impl Fn(ButtonState, ButtonState) + 'static) -> Self {
        self.inner.borrow_mut().on_state_change = Some(Rc::new(listener));
        self
    }

    /// Feeds one event through the state machine, followed by the live
    /// threshold check when the event moved the handle. Returns `true` when
    /// any transition applied.
    pub fn dispatch(&self, event: GestureEvent) -> bool {
        let controller = Rc::downgrade(&self.inner);
        let mut pending: SmallVec<[GestureEvent; 2]> = smallvec![event];
        let mut handled = false;

        while let Some(event) = pending.pop() {
            let Some(actions) = self.inner.borrow_mut().step(event, &controller) else {
                continue;
            };
            handled = true;
            self.run_host_actions(actions);
            if matches!(event, GestureEvent::PointerMove { .. }) {
                pending.push(GestureEvent::LiveThresholdCross);
            }
        }
        handled
    }

    fn run_host_actions(&self, actions: HostActions) {
        if actions.is_empty() {
            return;
        }
        let (side_effects, on_success, on_failure, on_state_change) = {
            let inner = self.inner.borrow();
            (
                Rc::clone(&inner.side_effects),
                inner.on_success.clone(),
                inner.on_failure.clone(),
                inner.on_state_change.clone(),
            )
        };

        for action in actions {
            match action {
                HostAction::StateChanged(from, to) => {
                    if let Some(listener) = &on_state_change {
                        listener(from, to);
                    }
                }
                HostAction::Haptic(kind) => dispatch_haptic(side_effects.as_ref(), kind),
                HostAction::Success => {
                    if let Some(callback) = &on_success {
                        callback();
                    }
                }
                HostAction::Failure => {
                    if let Some(callback) = &on_failure {
                        callback();
                    }
                }
            }
        }
    }

    pub fn pointer_down(&self) -> bool {
        self.dispatch(GestureEvent::PointerDown)
    }

    /// `raw_delta_x` is the total displacement since pointer-down.
    pub fn pointer_move(&self, raw_delta_x: f32) -> bool {
        self.dispatch(GestureEvent::PointerMove { raw_delta_x })
    }

    pub fn pointer_up(&self) -> bool {
        self.dispatch(GestureEvent::PointerUp)
    }

    pub fn pointer_cancel(&self) -> bool {
        self.dispatch(GestureEvent::PointerCancel)
    }

    /// Adapter for hosts that deliver absolute positions. An `Up` carrying a
    /// position applies that final sample before releasing.
    pub fn handle_pointer_event(&self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                let grabbed = self.pointer_down();
                if grabbed {
                    self.inner.borrow_mut().tracker.start(event.x);
                }
                grabbed
            }
            PointerEventKind::Move => match self.tracked_delta(event.x) {
                Some(raw_delta_x) => self.pointer_move(raw_delta_x),
                None => false,
            },
            PointerEventKind::Up => {
                let moved = match self.tracked_delta(event.x) {
                    Some(raw_delta_x) => self.pointer_move(raw_delta_x),
                    None => false,
                };
                self.pointer_up() || moved
            }
            PointerEventKind::Cancel => self.pointer_cancel(),
        }
    }

    fn tracked_delta(&self, x: f32) -> Option<f32> {
        self.inner.borrow_mut().tracker.update(x)
    }

    /// Layout pass reporting the container width.
    pub fn on_layout(&self, container_width: f32) {
        let controller = Rc::downgrade(&self.inner);
        let recheck_threshold = {
            let mut inner = self.inner.borrow_mut();
            let range = TravelRange::from_layout(container_width, inner.options.handle_width);
            if range == inner.range {
                return;
            }
            log::debug!(
                "travel range {:.1} -> {:.1} while {}",
                inner.range.length(),
                range.length(),
                inner.state
            );
            inner.range = range;

            match inner.state {
                ButtonState::Idle | ButtonState::Cancelling | ButtonState::Resetting => false,
                ButtonState::Dragging => {
                    let offset = range.clamp(inner.offset);
                    inner.track_pointer(offset);
                    true
                }
                ButtonState::Locked => {
                    let end = range.length();
                    inner.track_pointer(end);
                    false
                }
                ButtonState::Committing => {
                    inner.settle_to(range.length(), controller);
                    false
                }
            }
        };

        if recheck_threshold {
            self.dispatch(GestureEvent::LiveThresholdCross);
        }
    }

    /// Commits without a gesture. No-op while committing or locked.
    pub fn force_complete(&self) -> bool {
        self.dispatch(GestureEvent::ExternalForceComplete)
    }

    /// Returns a locked control to idle. No-op in every other state.
    pub fn reset(&self) -> bool {
        self.dispatch(GestureEvent::ExternalReset)
    }

    pub fn is_locked(&self) -> bool {
        self.inner.borrow().state == ButtonState::Locked
    }

    pub fn state(&self) -> ButtonState {
        self.inner.borrow().state
    }

    /// Logical offset owned by the state machine.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().offset
    }

    /// Visual offset as currently rendered.
    pub fn position(&self) -> f32 {
        self.inner.borrow().animator.value()
    }

    pub fn travel_range(&self) -> TravelRange {
        self.inner.borrow().range
    }

    pub fn progress(&self) -> f32 {
        let inner = self.inner.borrow();
        inner.range.progress(inner.animator.value())
    }

    pub fn geometry(&self) -> HandleGeometry {
        let inner = self.inner.borrow();
        let offset = inner.range.clamp(inner.animator.value());
        let direction = if inner.options.rtl { -1.0 } else { 1.0 };
        HandleGeometry {
            offset,
            progress: inner.range.progress(offset),
            translate_x: direction * offset,
            fill_translate_x: direction * (offset - inner.range.length()),
        }
    }

    pub fn label(&self) -> String {
        let inner = self.inner.borrow();
        if inner.state == ButtonState::Locked {
            inner.options.text_unlocked.clone()
        } else {
            inner.options.text.clone()
        }
    }

    /// Takes effect on the next grab; an active drag runs to completion.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.borrow_mut().options.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.borrow().options.disabled
    }

    pub fn is_rtl(&self) -> bool {
        self.inner.borrow().options.rtl
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().animator.is_running()
    }
}

impl Clone for SwipeController {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
