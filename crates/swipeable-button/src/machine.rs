//! Transition table of the slide-to-confirm gesture.
//!
//! [`transition`] is pure: it maps the current state, an event and a snapshot
//! of the gesture context to the next state plus the effects to carry out.
//! Combinations the table does not list return `None` and leave the state
//! untouched, which makes the machine total over `state x event`.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::sampler::{DragSample, DragSampler};
use crate::side_effects::HapticKind;
use crate::threshold::{CommitDecision, ThresholdEvaluator};
use crate::travel::TravelRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Dragging,
    Committing,
    Cancelling,
    Locked,
    Resetting,
}

impl ButtonState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonState::Idle => "idle",
            ButtonState::Dragging => "dragging",
            ButtonState::Committing => "committing",
            ButtonState::Cancelling => "cancelling",
            ButtonState::Locked => "locked",
            ButtonState::Resetting => "resetting",
        }
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown,
    /// Total horizontal displacement since pointer-down, uncorrected.
    PointerMove {
        raw_delta_x: f32,
    },
    PointerUp,
    /// The platform cancelled the pointer stream.
    PointerCancel,
    /// The offset reached the commit threshold while still dragging.
    LiveThresholdCross,
    AnimationComplete,
    ExternalReset,
    ExternalForceComplete,
}

/// Everything besides the state that guards a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub offset: f32,
    pub range: TravelRange,
    pub disabled: bool,
    pub is_rtl: bool,
    /// A settle animation is still moving.
    pub animation_in_flight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Haptic(HapticKind),
    /// Write the offset directly, following the pointer.
    TrackPointer(f32),
    /// Hand the offset to the animator and settle at the target.
    AnimateTo(f32),
    InvokeSuccess,
    InvokeFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: ButtonState,
    pub to: ButtonState,
    pub effects: SmallVec<[Effect; 2]>,
}

impl Transition {
    fn new(from: ButtonState, to: ButtonState, effects: SmallVec<[Effect; 2]>) -> Self {
        Self { from, to, effects }
    }

    pub fn changes_state(&self) -> bool {
        self.from != self.to
    }
}

pub fn transition(
    state: ButtonState,
    event: GestureEvent,
    ctx: &GestureContext,
) -> Option<Transition> {
    use ButtonState::*;
    use GestureEvent::*;

    let commit = || {
        Transition::new(
            state,
            Committing,
            smallvec![Effect::AnimateTo(ctx.range.length())],
        )
    };
    let cancel = || Transition::new(state, Cancelling, smallvec![Effect::AnimateTo(0.0)]);

    match (state, event) {
        // A grab while sliding home takes the handle from the animator; the
        // interrupted settle never reports.
        (Idle | Cancelling | Resetting, PointerDown) if !ctx.disabled => Some(Transition::new(
            state,
            Dragging,
            smallvec![Effect::Haptic(HapticKind::Grab), Effect::TrackPointer(0.0)],
        )),
        (Dragging, PointerMove { raw_delta_x }) => {
            let offset = DragSampler::sample(DragSample::new(raw_delta_x, ctx.is_rtl), ctx.range);
            Some(Transition::new(
                Dragging,
                Dragging,
                smallvec![Effect::TrackPointer(offset)],
            ))
        }
        (Dragging, PointerUp) => match ThresholdEvaluator::decide(ctx.offset, ctx.range) {
            CommitDecision::Commit => Some(commit()),
            CommitDecision::Cancel => Some(cancel()),
        },
        (Dragging, PointerCancel) => Some(cancel()),
        (Dragging, LiveThresholdCross)
            if ThresholdEvaluator::decide(ctx.offset, ctx.range).is_commit() =>
        {
            Some(commit())
        }
        (Committing, AnimationComplete) if !ctx.animation_in_flight => Some(Transition::new(
            Committing,
            Locked,
            smallvec![Effect::InvokeSuccess, Effect::Haptic(HapticKind::Commit)],
        )),
        (Cancelling, AnimationComplete) if !ctx.animation_in_flight => Some(Transition::new(
            Cancelling,
            Idle,
            smallvec![Effect::InvokeFailure],
        )),
        (Resetting, AnimationComplete) if !ctx.animation_in_flight => {
            Some(Transition::new(Resetting, Idle, SmallVec::new()))
        }
        (Locked, ExternalReset) => Some(Transition::new(
            Locked,
            Resetting,
            smallvec![Effect::AnimateTo(0.0)],
        )),
        (Idle | Dragging | Cancelling | Resetting, ExternalForceComplete) => Some(commit()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [ButtonState; 6] = [
        ButtonState::Idle,
        ButtonState::Dragging,
        ButtonState::Committing,
        ButtonState::Cancelling,
        ButtonState::Locked,
        ButtonState::Resetting,
    ];

    fn ctx(offset: f32) -> GestureContext {
        GestureContext {
            offset,
            range: TravelRange::new(250.0),
            disabled: false,
            is_rtl: false,
            animation_in_flight: false,
        }
    }

    fn target(transition: &Transition) -> Option<f32> {
        transition.effects.iter().find_map(|effect| match effect {
            Effect::AnimateTo(target) => Some(*target),
            _ => None,
        })
    }

    #[test]
    fn pointer_down_grabs_from_idle() {
        let t = transition(ButtonState::Idle, GestureEvent::PointerDown, &ctx(0.0))
            .expect("grab");
        assert_eq!(t.to, ButtonState::Dragging);
        assert_eq!(
            t.effects.as_slice(),
            &[Effect::Haptic(HapticKind::Grab), Effect::TrackPointer(0.0)]
        );
    }

    #[test]
    fn disabled_blocks_only_the_grab() {
        let disabled = GestureContext {
            disabled: true,
            ..ctx(100.0)
        };
        assert!(transition(ButtonState::Idle, GestureEvent::PointerDown, &disabled).is_none());

        let release = transition(ButtonState::Dragging, GestureEvent::PointerUp, &disabled)
            .expect("drag in progress still resolves");
        assert_eq!(release.to, ButtonState::Cancelling);
    }

    #[test]
    fn pointer_move_tracks_sampled_offset() {
        let t = transition(
            ButtonState::Dragging,
            GestureEvent::PointerMove { raw_delta_x: 400.0 },
            &ctx(0.0),
        )
        .expect("move");
        assert!(!t.changes_state());
        assert_eq!(t.effects.as_slice(), &[Effect::TrackPointer(250.0)]);
    }

    #[test]
    fn rtl_move_is_mirrored() {
        let rtl = GestureContext {
            is_rtl: true,
            ..ctx(0.0)
        };
        let t = transition(
            ButtonState::Dragging,
            GestureEvent::PointerMove { raw_delta_x: 150.0 },
            &rtl,
        )
        .expect("move");
        assert_eq!(t.effects.as_slice(), &[Effect::TrackPointer(0.0)]);
    }

    #[test]
    fn release_below_threshold_cancels() {
        let t = transition(ButtonState::Dragging, GestureEvent::PointerUp, &ctx(200.0))
            .expect("release");
        assert_eq!(t.to, ButtonState::Cancelling);
        assert_eq!(target(&t), Some(0.0));
    }

    #[test]
    fn release_past_threshold_commits() {
        let t = transition(ButtonState::Dragging, GestureEvent::PointerUp, &ctx(230.0))
            .expect("release");
        assert_eq!(t.to, ButtonState::Committing);
        assert_eq!(target(&t), Some(250.0));
    }

    #[test]
    fn live_cross_requires_threshold() {
        assert!(
            transition(ButtonState::Dragging, GestureEvent::LiveThresholdCross, &ctx(224.0))
                .is_none()
        );
        let t = transition(ButtonState::Dragging, GestureEvent::LiveThresholdCross, &ctx(225.0))
            .expect("cross");
        assert_eq!(t.to, ButtonState::Committing);
    }

    #[test]
    fn live_cross_and_release_agree_everywhere() {
        for step in 0..=250 {
            let offset = step as f32;
            let release = transition(ButtonState::Dragging, GestureEvent::PointerUp, &ctx(offset))
                .expect("release always resolves");
            let live =
                transition(ButtonState::Dragging, GestureEvent::LiveThresholdCross, &ctx(offset));
            assert_eq!(
                release.to == ButtonState::Committing,
                live.is_some(),
                "paths disagree at {offset}"
            );
        }
    }

    #[test]
    fn degenerate_range_never_commits() {
        let degenerate = GestureContext {
            range: TravelRange::ZERO,
            ..ctx(0.0)
        };
        let t = transition(ButtonState::Dragging, GestureEvent::PointerUp, &degenerate)
            .expect("release");
        assert_eq!(t.to, ButtonState::Cancelling);
        assert!(
            transition(ButtonState::Dragging, GestureEvent::LiveThresholdCross, &degenerate)
                .is_none()
        );
    }

    #[test]
    fn completion_paths() {
        let locked = transition(ButtonState::Committing, GestureEvent::AnimationComplete, &ctx(250.0))
            .expect("commit lands");
        assert_eq!(locked.to, ButtonState::Locked);
        assert_eq!(
            locked.effects.as_slice(),
            &[Effect::InvokeSuccess, Effect::Haptic(HapticKind::Commit)]
        );

        let idle = transition(ButtonState::Cancelling, GestureEvent::AnimationComplete, &ctx(0.0))
            .expect("cancel lands");
        assert_eq!(idle.to, ButtonState::Idle);
        assert_eq!(idle.effects.as_slice(), &[Effect::InvokeFailure]);

        let reset = transition(ButtonState::Resetting, GestureEvent::AnimationComplete, &ctx(0.0))
            .expect("reset lands");
        assert_eq!(reset.to, ButtonState::Idle);
        assert!(reset.effects.is_empty(), "reset never calls the host back");
    }

    #[test]
    fn completion_ignored_while_animation_moves() {
        let moving = GestureContext {
            animation_in_flight: true,
            ..ctx(120.0)
        };
        for state in [
            ButtonState::Committing,
            ButtonState::Cancelling,
            ButtonState::Resetting,
        ] {
            assert!(transition(state, GestureEvent::AnimationComplete, &moving).is_none());
        }
    }

    #[test]
    fn reset_only_from_locked() {
        for state in ALL_STATES {
            let t = transition(state, GestureEvent::ExternalReset, &ctx(250.0));
            if state == ButtonState::Locked {
                let t = t.expect("reset");
                assert_eq!(t.to, ButtonState::Resetting);
                assert_eq!(target(&t), Some(0.0));
            } else {
                assert!(t.is_none(), "reset from {state}");
            }
        }
    }

    #[test]
    fn force_complete_is_idempotent() {
        for state in ALL_STATES {
            let t = transition(state, GestureEvent::ExternalForceComplete, &ctx(0.0));
            match state {
                ButtonState::Locked | ButtonState::Committing => {
                    assert!(t.is_none(), "force complete from {state}")
                }
                _ => {
                    let t = t.expect("force complete");
                    assert_eq!(t.to, ButtonState::Committing);
                    assert_eq!(target(&t), Some(250.0));
                }
            }
        }
    }

    #[test]
    fn pointer_events_outside_dragging_are_identity() {
        let events = [
            GestureEvent::PointerMove { raw_delta_x: 240.0 },
            GestureEvent::PointerUp,
            GestureEvent::PointerCancel,
            GestureEvent::LiveThresholdCross,
        ];
        for state in ALL_STATES {
            if state == ButtonState::Dragging {
                continue;
            }
            for event in events {
                assert!(
                    transition(state, event, &ctx(240.0)).is_none(),
                    "{event:?} in {state}"
                );
            }
        }
    }

    #[test]
    fn pointer_down_grabs_unless_committed() {
        for state in ALL_STATES {
            let grabbed = transition(state, GestureEvent::PointerDown, &ctx(0.0));
            let expected = matches!(
                state,
                ButtonState::Idle | ButtonState::Cancelling | ButtonState::Resetting
            );
            assert_eq!(grabbed.is_some(), expected, "pointer down in {state}");
            if let Some(t) = grabbed {
                assert_eq!(t.from, state);
                assert_eq!(t.to, ButtonState::Dragging);
            }
        }
    }

    #[test]
    fn disabled_blocks_grab_while_sliding_home() {
        let disabled = GestureContext {
            disabled: true,
            animation_in_flight: true,
            ..ctx(120.0)
        };
        for state in [ButtonState::Cancelling, ButtonState::Resetting] {
            assert!(transition(state, GestureEvent::PointerDown, &disabled).is_none());
        }
    }
}
