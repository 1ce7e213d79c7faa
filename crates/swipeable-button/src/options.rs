//! Host-facing configuration.

use swipeable_animation::{AnimationSpec, DurationPolicy, SpringSpec};

use crate::travel::TravelRange;

/// Container width assumed until the first layout event.
pub const DEFAULT_WIDTH: f32 = 300.0;
/// Handle width; the handle is a square as tall as the button.
pub const DEFAULT_HANDLE_WIDTH: f32 = 50.0;
pub const DEFAULT_TEXT: &str = "SLIDE";
pub const DEFAULT_TEXT_UNLOCKED: &str = "UNLOCKED";

/// Curve used when a released handle settles at either end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseAnimation {
    Spring(SpringSpec),
    Tween(AnimationSpec),
}

impl ReleaseAnimation {
    pub fn policy(self) -> DurationPolicy {
        match self {
            ReleaseAnimation::Spring(spec) => DurationPolicy::Spring(spec),
            ReleaseAnimation::Tween(spec) => DurationPolicy::Tween(spec),
        }
    }
}

impl Default for ReleaseAnimation {
    fn default() -> Self {
        ReleaseAnimation::Spring(SpringSpec::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeableButtonOptions {
    pub width: f32,
    pub handle_width: f32,
    /// Blocks new grabs only; a drag in progress is allowed to finish.
    pub disabled: bool,
    /// Settle in zero time instead of animating.
    pub no_animate: bool,
    /// Mirrored layout. Read once when the controller is created.
    pub rtl: bool,
    pub release_animation: ReleaseAnimation,
    pub text: String,
    pub text_unlocked: String,
}

impl Default for SwipeableButtonOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            handle_width: DEFAULT_HANDLE_WIDTH,
            disabled: false,
            no_animate: false,
            rtl: false,
            release_animation: ReleaseAnimation::default(),
            text: DEFAULT_TEXT.to_owned(),
            text_unlocked: DEFAULT_TEXT_UNLOCKED.to_owned(),
        }
    }
}

impl SwipeableButtonOptions {
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_handle_width(mut self, handle_width: f32) -> Self {
        self.handle_width = handle_width;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_no_animate(mut self, no_animate: bool) -> Self {
        self.no_animate = no_animate;
        self
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn with_release_animation(mut self, release_animation: ReleaseAnimation) -> Self {
        self.release_animation = release_animation;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>, text_unlocked: impl Into<String>) -> Self {
        self.text = text.into();
        self.text_unlocked = text_unlocked.into();
        self
    }

    /// Policy for every settle animation (commit, cancel, reset).
    pub fn settle_policy(&self) -> DurationPolicy {
        if self.no_animate {
            DurationPolicy::Instant
        } else {
            self.release_animation.policy()
        }
    }

    /// Range used before any layout event arrives.
    pub fn initial_range(&self) -> TravelRange {
        TravelRange::from_layout(self.width, self.handle_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_a_250_point_track() {
        let options = SwipeableButtonOptions::default();
        assert_eq!(options.initial_range().length(), 250.0);
        assert_eq!(options.text, "SLIDE");
        assert_eq!(options.text_unlocked, "UNLOCKED");
        assert_eq!(
            options.settle_policy(),
            DurationPolicy::Spring(SpringSpec::default())
        );
    }

    #[test]
    fn no_animate_overrides_release_curve() {
        let options = SwipeableButtonOptions::default()
            .with_release_animation(ReleaseAnimation::Tween(AnimationSpec::settle()))
            .with_no_animate(true);
        assert_eq!(options.settle_policy(), DurationPolicy::Instant);
    }

    #[test]
    fn tween_release_uses_tween_policy() {
        let options = SwipeableButtonOptions::default()
            .with_release_animation(ReleaseAnimation::Tween(AnimationSpec::settle()));
        assert_eq!(
            options.settle_policy(),
            DurationPolicy::Tween(AnimationSpec::settle())
        );
    }

    #[test]
    fn negative_handle_does_not_extend_past_container() {
        let options = SwipeableButtonOptions::default()
            .with_width(120.0)
            .with_handle_width(-10.0);
        assert_eq!(options.initial_range().length(), 120.0);
    }
}
