//! Host-controlled options, layout changes and the pointer-event adapter.

use swipeable_button::*;
use swipeable_testing::SwipeTestRule;

#[test]
fn disabled_control_ignores_grabs() {
    let mut rule = SwipeTestRule::with_options(SwipeableButtonOptions::default().with_disabled(true));

    rule.swipe(240.0);

    assert_eq!(rule.state(), ButtonState::Idle);
    assert!(rule.side_effects().haptics().is_empty());
    assert!(rule.log().changes().is_empty());
}

#[test]
fn disabling_mid_drag_lets_the_drag_finish() {
    let mut rule = SwipeTestRule::new();

    rule.drag_to(100.0);
    rule.controller().set_disabled(true);
    rule.controller().pointer_move(240.0);
    rule.release();

    assert_eq!(rule.state(), ButtonState::Locked);
    assert!(rule.controller().is_disabled());

    rule.controller().reset();
    rule.pump_until_idle();
    assert!(!rule.controller().pointer_down());
}

#[test]
fn force_complete_ignores_disabled() {
    let mut rule = SwipeTestRule::with_options(SwipeableButtonOptions::default().with_disabled(true));

    rule.controller().force_complete();
    rule.pump_until_idle();

    assert_eq!(rule.state(), ButtonState::Locked);
}

#[test]
fn no_animate_still_reports_on_the_next_frame() {
    let mut rule =
        SwipeTestRule::with_options(SwipeableButtonOptions::default().with_no_animate(true));

    rule.drag_to(100.0);
    rule.controller().pointer_up();

    assert_eq!(rule.controller().position(), 0.0);
    assert_eq!(rule.state(), ButtonState::Cancelling);
    assert_eq!(rule.failures(), 0);

    assert_eq!(rule.pump_until_idle(), 1);
    assert_eq!(rule.state(), ButtonState::Idle);
    assert_eq!(rule.failures(), 1);
}

#[test]
fn tween_release_runs_for_its_duration() {
    let mut rule = SwipeTestRule::with_options(
        SwipeableButtonOptions::default()
            .with_release_animation(ReleaseAnimation::Tween(AnimationSpec::settle())),
    );

    rule.drag_to(200.0);
    rule.controller().pointer_up();
    let frames = rule.pump_until_idle();

    // 200 ms at 60 Hz plus the frame that records the start time.
    assert!((12..=14).contains(&frames), "ran {frames} frames");
    assert_eq!(rule.state(), ButtonState::Idle);
}

#[test]
fn settle_moves_monotonically_toward_home() {
    let mut rule = SwipeTestRule::new();

    rule.drag_to(200.0);
    rule.controller().pointer_up();

    let mut positions = vec![rule.controller().position()];
    while rule.runtime_handle().has_frame_callbacks() {
        rule.advance_frames(1);
        positions.push(rule.controller().position());
        assert!(positions.len() < 600);
    }

    assert!(positions.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(positions.last().copied(), Some(0.0));
}

#[test]
fn layout_change_updates_range_while_idle() {
    let rule = SwipeTestRule::new();

    rule.controller().on_layout(500.0);

    assert_eq!(rule.controller().travel_range().length(), 450.0);
    assert_eq!(rule.state(), ButtonState::Idle);
    assert!(rule.log().changes().is_empty());
}

#[test]
fn layout_growth_mid_drag_keeps_offset() {
    let mut rule = SwipeTestRule::new();

    rule.drag_to(200.0);
    rule.controller().on_layout(600.0);

    assert_eq!(rule.state(), ButtonState::Dragging);
    assert_eq!(rule.controller().offset(), 200.0);

    rule.release();
    assert_eq!(rule.state(), ButtonState::Idle);
}

#[test]
fn layout_shrink_mid_drag_clamps_offset() {
    let mut rule = SwipeTestRule::new();

    rule.drag_to(150.0);
    rule.controller().on_layout(100.0);

    assert_eq!(rule.controller().offset(), 50.0);
    assert_eq!(rule.state(), ButtonState::Committing);
    rule.pump_until_idle();
    assert_eq!(rule.state(), ButtonState::Locked);
}

#[test]
fn pointer_adapter_drives_a_full_commit() {
    let mut rule = SwipeTestRule::new();
    let controller = rule.controller().clone();

    assert!(controller.handle_pointer_event(PointerEvent::down(12.0)));
    controller.handle_pointer_event(PointerEvent::moved(100.0));
    controller.handle_pointer_event(PointerEvent::moved(200.0));
    assert_eq!(controller.offset(), 188.0);
    controller.handle_pointer_event(PointerEvent::up(245.0));
    rule.pump_until_idle();

    assert!(controller.is_locked());
    assert_eq!(rule.successes(), 1);
}

#[test]
fn pointer_adapter_cancel_slides_home() {
    let mut rule = SwipeTestRule::new();
    let controller = rule.controller().clone();

    controller.handle_pointer_event(PointerEvent::down(0.0));
    controller.handle_pointer_event(PointerEvent::moved(120.0));
    controller.handle_pointer_event(PointerEvent::cancel(120.0));
    rule.pump_until_idle();

    assert_eq!(rule.state(), ButtonState::Idle);
    assert_eq!(rule.failures(), 1);
}

#[test]
fn custom_labels_follow_lock_state() {
    let mut rule = SwipeTestRule::with_options(
        SwipeableButtonOptions::default().with_text("PAY", "PAID"),
    );

    assert_eq!(rule.controller().label(), "PAY");
    rule.swipe(250.0);
    assert_eq!(rule.controller().label(), "PAID");
}

#[test]
fn transition_table_matches_controller() {
    let ctx = GestureContext {
        offset: 230.0,
        range: TravelRange::new(250.0),
        disabled: false,
        is_rtl: false,
        animation_in_flight: false,
    };

    let release = transition(ButtonState::Dragging, GestureEvent::PointerUp, &ctx)
        .expect("release is handled while dragging");
    assert_eq!(release.to, ButtonState::Committing);
    assert_eq!(release.effects.as_slice(), &[Effect::AnimateTo(250.0)]);

    assert!(transition(ButtonState::Locked, GestureEvent::PointerDown, &ctx).is_none());
}
