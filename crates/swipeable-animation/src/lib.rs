//! Position animation for swipeable controls.
//!
//! A [`PositionAnimator`] owns one animated scalar. It either follows the
//! pointer exactly ([`PositionAnimator::set_immediate`]) or settles toward a
//! target on the host's frame clock and reports completion once
//! ([`PositionAnimator::animate_to`]).

mod animation;
mod animator;

pub use animation::{AnimationRequest, AnimationSpec, DurationPolicy, Easing, SpringSpec};
pub use animator::{AnimationHandle, PositionAnimator};
