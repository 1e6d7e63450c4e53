//! Animation specifications and the target-based animation they produce.
//!
//! Mirrors Jetpack Compose's `spring()` / `tween()` specs. A spec plus start
//! value, target and start velocity yields a [`TargetBasedAnimation`] that can
//! be sampled at any play time.

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Upper bound on spring play time; a spring still moving after this is snapped.
const MAX_SPRING_DURATION_NANOS: u64 = 10 * 1_000_000_000;

/// Damping ratio for a spring without overshoot (JC: `DampingRatioNoBouncy`).
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
/// Medium stiffness (JC: `StiffnessMedium`).
pub const STIFFNESS_MEDIUM: f32 = 1500.0;
/// Default visibility threshold for scalar springs.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.01;

/// Physics-based spring configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    /// `1.0` is critically damped, below `1.0` bounces, above overdamps.
    pub damping_ratio: f32,
    /// Spring stiffness; higher settles faster.
    pub stiffness: f32,
    /// Displacement and velocity below which the spring counts as settled.
    pub visibility_threshold: f32,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            damping_ratio: DAMPING_RATIO_NO_BOUNCY,
            stiffness: STIFFNESS_MEDIUM,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default()
        }
    }

    pub fn visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Displacement from rest and velocity after `t` seconds.
    fn displacement_at(&self, x0: f64, v0: f64, t: f64) -> (f64, f64) {
        let omega = (self.stiffness.max(f32::EPSILON) as f64).sqrt();
        let zeta = self.damping_ratio.max(0.0) as f64;

        if (zeta - 1.0).abs() < 1e-6 {
            let c1 = x0;
            let c2 = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = (c1 + c2 * t) * decay;
            let v = c2 * decay - omega * (c1 + c2 * t) * decay;
            (x, v)
        } else if zeta > 1.0 {
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let gamma_plus = -zeta * omega + root;
            let gamma_minus = -zeta * omega - root;
            let c2 = (v0 - gamma_minus * x0) / (gamma_plus - gamma_minus);
            let c1 = x0 - c2;
            let e_minus = (gamma_minus * t).exp();
            let e_plus = (gamma_plus * t).exp();
            let x = c1 * e_minus + c2 * e_plus;
            let v = c1 * gamma_minus * e_minus + c2 * gamma_plus * e_plus;
            (x, v)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let a = x0;
            let b = (v0 + zeta * omega * x0) / damped;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let x = decay * (a * cos + b * sin);
            let v = decay * (-zeta * omega * (a * cos + b * sin) + damped * (b * cos - a * sin));
            (x, v)
        }
    }
}

/// Easing curve for tweens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Cubic bezier (0.4, 0.0, 0.2, 1.0), the Material standard curve.
    FastOutSlowIn,
    /// Cubic bezier (0.0, 0.0, 0.2, 1.0).
    LinearOutSlowIn,
    /// Cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => fraction,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn bezier_coordinate(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Solves the curve for `x` by bisection, then evaluates `y`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    let mut t = x;
    for _ in 0..32 {
        let estimate = bezier_coordinate(x1, x2, t);
        if (estimate - x).abs() < 1e-5 {
            break;
        }
        if estimate < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) * 0.5;
    }
    bezier_coordinate(y1, y2, t)
}

/// Duration-based animation configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub delay_millis: u64,
    pub easing: Easing,
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self {
            duration_millis: 300,
            delay_millis: 0,
            easing: Easing::FastOutSlowIn,
        }
    }
}

impl TweenSpec {
    pub fn new(duration_millis: u64) -> Self {
        Self {
            duration_millis,
            ..Self::default()
        }
    }

    pub fn delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// How an [`crate::Animatable`] travels to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    Spring(SpringSpec),
    Tween(TweenSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Spring(SpringSpec::default())
    }
}

impl From<SpringSpec> for AnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        AnimationSpec::Spring(spec)
    }
}

impl From<TweenSpec> for AnimationSpec {
    fn from(spec: TweenSpec) -> Self {
        AnimationSpec::Tween(spec)
    }
}

/// An animation from a fixed start toward a fixed target (JC: `TargetBasedAnimation`).
#[derive(Clone, Debug)]
pub struct TargetBasedAnimation {
    spec: AnimationSpec,
    initial_value: f32,
    target_value: f32,
    initial_velocity: f32,
}

impl TargetBasedAnimation {
    pub fn new(
        spec: AnimationSpec,
        initial_value: f32,
        target_value: f32,
        initial_velocity: f32,
    ) -> Self {
        Self {
            spec,
            initial_value,
            target_value,
            initial_velocity,
        }
    }

    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    /// Value and velocity (units per second) at `play_time_nanos`.
    pub fn value_and_velocity_at(&self, play_time_nanos: u64) -> (f32, f32) {
        if self.is_finished_at(play_time_nanos) {
            return (self.target_value, 0.0);
        }
        match self.spec {
            AnimationSpec::Spring(spring) => {
                let t = play_time_nanos as f64 / NANOS_PER_SECOND;
                let x0 = (self.initial_value - self.target_value) as f64;
                let (x, v) = spring.displacement_at(x0, self.initial_velocity as f64, t);
                (self.target_value + x as f32, v as f32)
            }
            AnimationSpec::Tween(tween) => {
                let value = self.tween_value_at(&tween, play_time_nanos);
                let previous = play_time_nanos.saturating_sub(NANOS_PER_MILLI);
                let delta_seconds = (play_time_nanos - previous) as f64 / NANOS_PER_SECOND;
                let velocity = if delta_seconds > 0.0 {
                    ((value - self.tween_value_at(&tween, previous)) as f64 / delta_seconds) as f32
                } else {
                    0.0
                };
                (value, velocity)
            }
        }
    }

    fn tween_value_at(&self, tween: &TweenSpec, play_time_nanos: u64) -> f32 {
        let delay = tween.delay_millis * NANOS_PER_MILLI;
        let duration = tween.duration_millis * NANOS_PER_MILLI;
        let elapsed = play_time_nanos.saturating_sub(delay);
        let fraction = if duration == 0 {
            1.0
        } else {
            (elapsed as f64 / duration as f64).min(1.0) as f32
        };
        let eased = tween.easing.transform(fraction);
        self.initial_value + (self.target_value - self.initial_value) * eased
    }

    /// Whether the animation has settled by `play_time_nanos`.
    pub fn is_finished_at(&self, play_time_nanos: u64) -> bool {
        match self.spec {
            AnimationSpec::Tween(tween) => {
                play_time_nanos >= (tween.delay_millis + tween.duration_millis) * NANOS_PER_MILLI
            }
            AnimationSpec::Spring(spring) => {
                if play_time_nanos >= MAX_SPRING_DURATION_NANOS {
                    return true;
                }
                let t = play_time_nanos as f64 / NANOS_PER_SECOND;
                let x0 = (self.initial_value - self.target_value) as f64;
                let (x, v) = spring.displacement_at(x0, self.initial_velocity as f64, t);
                let threshold = spring.visibility_threshold.abs() as f64;
                x.abs() < threshold && v.abs() < threshold
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILLIS: u64 = 1_000_000;

    #[test]
    fn test_spring_starts_at_initial_value() {
        let animation = TargetBasedAnimation::new(AnimationSpec::default(), 0.4, 0.0, 0.0);
        let (value, velocity) = animation.value_and_velocity_at(0);
        assert!((value - 0.4).abs() < 1e-6);
        assert!(velocity.abs() < 1e-6);
    }

    #[test]
    fn test_critically_damped_spring_converges_without_overshoot() {
        let animation = TargetBasedAnimation::new(AnimationSpec::default(), 1.0, 0.0, 0.0);
        let mut previous = 1.0;
        let mut play_time = 0;
        while !animation.is_finished_at(play_time) {
            let (value, _) = animation.value_and_velocity_at(play_time);
            assert!(value >= -1e-4, "overshot target: {value}");
            assert!(value <= previous + 1e-6);
            previous = value;
            play_time += 16 * MILLIS;
        }
        assert!(play_time < 2_000 * MILLIS);
        assert_eq!(animation.value_and_velocity_at(play_time), (0.0, 0.0));
    }

    #[test]
    fn test_bouncy_spring_overshoots() {
        let spec = AnimationSpec::Spring(SpringSpec::new(0.2, 400.0));
        let animation = TargetBasedAnimation::new(spec, 1.0, 0.0, 0.0);
        let overshoot = (0..200)
            .map(|frame| animation.value_and_velocity_at(frame * 8 * MILLIS).0)
            .any(|value| value < -0.05);
        assert!(overshoot);
    }

    #[test]
    fn test_overdamped_spring_settles() {
        let spec = AnimationSpec::Spring(SpringSpec::new(2.0, 800.0));
        let animation = TargetBasedAnimation::new(spec, -1.0, 0.0, 0.0);
        assert!(animation.is_finished_at(3_000 * MILLIS));
        let (value, _) = animation.value_and_velocity_at(50 * MILLIS);
        assert!(value > -1.0 && value < 0.0);
    }

    #[test]
    fn test_tween_respects_duration_and_delay() {
        let spec = TweenSpec::new(100).delay(50).easing(Easing::Linear);
        let animation = TargetBasedAnimation::new(spec.into(), 0.0, 1.0, 0.0);
        assert_eq!(animation.value_and_velocity_at(25 * MILLIS).0, 0.0);
        let (mid, velocity) = animation.value_and_velocity_at(100 * MILLIS);
        assert!((mid - 0.5).abs() < 1e-4);
        assert!((velocity - 10.0).abs() < 0.1);
        assert!(animation.is_finished_at(150 * MILLIS));
        assert_eq!(animation.value_and_velocity_at(150 * MILLIS), (1.0, 0.0));
    }

    #[test]
    fn test_fast_out_slow_in_endpoints() {
        let easing = Easing::FastOutSlowIn;
        assert_eq!(easing.transform(0.0), 0.0);
        assert_eq!(easing.transform(1.0), 1.0);
        let mid = easing.transform(0.5);
        assert!(mid > 0.5 && mid < 1.0, "mid = {mid}");
    }
}
