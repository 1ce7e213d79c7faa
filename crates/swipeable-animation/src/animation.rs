//! Curves and request types consumed by [`PositionAnimator`](crate::PositionAnimator).

/// Easing curves for duration-based settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Slow start, cubic.
    EaseIn,
    /// Slow finish, cubic.
    EaseOut,
    /// Slow start and finish, cubic.
    EaseInOut,
    /// Material standard curve.
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates a unit cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
///
/// Same solver the compose animation runtime uses for its easing curves.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first; bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Duration-based settle: fixed length, eased progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// The 200 ms ease-in-out timing used when a released handle slides home.
    pub fn settle() -> Self {
        Self::tween(200, Easing::EaseInOut)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::settle()
    }
}

/// Spring settle configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, below 1.0 bounces, above 1.0 creeps.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Velocity (progress units per second) under which the spring may rest.
    pub velocity_threshold: f32,
    /// Distance from target (value units) under which the spring may rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn critically_damped() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    /// Soft, slightly bouncy spring close to what touch toolkits ship by default.
    pub fn gentle() -> Self {
        Self {
            damping_ratio: 0.5,
            stiffness: 100.0,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::critically_damped()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::critically_damped()
    }
}

/// How a position change is carried out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationPolicy {
    /// Write the value now; no transition and no completion signal.
    Immediate,
    /// Physics-based settle.
    Spring(SpringSpec),
    /// Duration-based settle.
    Tween(AnimationSpec),
    /// Zero-duration settle for hosts that disable animation. The value is
    /// written now, completion still arrives on the next frame.
    Instant,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        DurationPolicy::Spring(SpringSpec::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub target: f32,
    pub policy: DurationPolicy,
}

impl AnimationRequest {
    pub fn new(target: f32, policy: DurationPolicy) -> Self {
        Self { target, policy }
    }
}
