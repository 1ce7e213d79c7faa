//! Slide-to-confirm control logic.
//!
//! The user drags a handle along a track. Releasing (or crossing) at 90% of
//! the travel range commits the action and locks the handle at the far end.
//! Anything short of that slides back home. [`SwipeController`] is the state
//! machine of record; [`transition`] exposes its table as a pure function.

mod controller;
mod machine;
mod options;
mod pointer;
mod sampler;
mod side_effects;
mod threshold;
mod travel;

pub use controller::{HandleGeometry, HostCallback, StateListener, SwipeController};
pub use machine::{transition, ButtonState, Effect, GestureContext, GestureEvent, Transition};
pub use options::{
    ReleaseAnimation, SwipeableButtonOptions, DEFAULT_HANDLE_WIDTH, DEFAULT_TEXT,
    DEFAULT_TEXT_UNLOCKED, DEFAULT_WIDTH,
};
pub use pointer::{PointerEvent, PointerEventKind};
pub use sampler::{DragSample, DragSampler, DragTracker};
pub use side_effects::{
    HapticKind, LogSideEffects, NoopSideEffects, SideEffectDispatcher, SideEffectError,
};
pub use threshold::{CommitDecision, ThresholdEvaluator, THRESHOLD_RATIO};
pub use travel::TravelRange;

pub use swipeable_animation::{AnimationSpec, DurationPolicy, Easing, SpringSpec};
