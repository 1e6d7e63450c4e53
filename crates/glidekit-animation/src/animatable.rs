//! Animatable scalar value.
//!
//! [`Animatable`] is the Rust counterpart of Jetpack Compose's
//! `Animatable<Float>`: a value holder that can be snapped instantly or
//! animated over frames, optionally bounded. Reads always return the
//! instantaneous value, including while an animation is in flight.
//!
//! Every mutation (`snap_to`, `animate_to`, `stop`) takes a new mutation id.
//! An animation that wakes up and finds a newer id has been superseded and
//! ends with [`AnimationEndReason::Interrupted`] without touching the value,
//! so at most one animation drives the value at a time.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation_spec::{AnimationSpec, TargetBasedAnimation};
use crate::frame_clock::FrameClock;

/// Why an [`Animatable::animate_to`] call returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// The animation reached its target.
    Finished,
    /// The value hit a bound before reaching the target.
    BoundReached,
    /// Another snap, animation or stop took over.
    Interrupted,
}

/// Outcome of an animation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationResult {
    pub end_reason: AnimationEndReason,
    /// Value at the moment the animation ended.
    pub end_value: f32,
}

#[derive(Debug)]
struct AnimatableInner {
    value: f32,
    velocity: f32,
    target_value: f32,
    lower_bound: f32,
    upper_bound: f32,
    is_running: bool,
    mutation_id: u64,
}

impl AnimatableInner {
    fn clamp(&self, value: f32) -> f32 {
        value.max(self.lower_bound).min(self.upper_bound)
    }

    /// Claims the value for a new mutation, superseding any running animation.
    fn begin_mutation(&mut self) -> u64 {
        self.mutation_id = self.mutation_id.wrapping_add(1);
        self.is_running = false;
        self.mutation_id
    }
}

/// A scalar value that can be snapped or animated frame by frame.
///
/// Cloning yields another handle to the same value.
#[derive(Clone, Debug)]
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

impl Animatable {
    /// Creates an unbounded animatable at `initial_value`.
    pub fn new(initial_value: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatableInner {
                value: initial_value,
                velocity: 0.0,
                target_value: initial_value,
                lower_bound: f32::NEG_INFINITY,
                upper_bound: f32::INFINITY,
                is_running: false,
                mutation_id: 0,
            })),
        }
    }

    /// Current value (instantaneous while animating).
    pub fn value(&self) -> f32 {
        self.inner.borrow().value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Target of the running animation, or the last snapped value.
    pub fn target_value(&self) -> f32 {
        self.inner.borrow().target_value
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().is_running
    }

    pub fn lower_bound(&self) -> f32 {
        self.inner.borrow().lower_bound
    }

    pub fn upper_bound(&self) -> f32 {
        self.inner.borrow().upper_bound
    }

    /// Sets the bounds and clamps the current value into them.
    ///
    /// Inverted bounds are swapped.
    pub fn update_bounds(&self, lower: f32, upper: f32) {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let mut inner = self.inner.borrow_mut();
        inner.lower_bound = lower;
        inner.upper_bound = upper;
        inner.value = inner.clamp(inner.value);
        inner.target_value = inner.clamp(inner.target_value);
    }

    /// Sets the value instantly, cancelling any running animation.
    pub fn snap_to(&self, target: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.begin_mutation();
        let clamped = inner.clamp(target);
        inner.value = clamped;
        inner.target_value = clamped;
        inner.velocity = 0.0;
    }

    /// Cancels any running animation, leaving the value where it is.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.is_running {
            log::trace!("Animatable stopped at {}", inner.value);
        }
        inner.begin_mutation();
        inner.target_value = inner.value;
        inner.velocity = 0.0;
    }

    /// Animates toward `target` one frame at a time, starting from the current
    /// value and velocity.
    ///
    /// Resolves once the animation finishes, hits a bound, or is superseded by
    /// another mutation.
    pub async fn animate_to<C: FrameClock>(
        &self,
        target: f32,
        spec: AnimationSpec,
        clock: &C,
    ) -> AnimationResult {
        let (id, animation) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.begin_mutation();
            let target = inner.clamp(target);
            inner.target_value = target;
            inner.is_running = true;
            let animation = TargetBasedAnimation::new(spec, inner.value, target, inner.velocity);
            (id, animation)
        };

        let mut start_time_nanos = None;
        loop {
            let frame_time_nanos = clock.next_frame().await;

            let mut inner = self.inner.borrow_mut();
            if inner.mutation_id != id {
                return AnimationResult {
                    end_reason: AnimationEndReason::Interrupted,
                    end_value: inner.value,
                };
            }

            let start = *start_time_nanos.get_or_insert(frame_time_nanos);
            let play_time_nanos = frame_time_nanos.saturating_sub(start);
            let (value, velocity) = animation.value_and_velocity_at(play_time_nanos);
            let clamped = inner.clamp(value);
            inner.value = clamped;
            inner.velocity = velocity;

            if clamped != value {
                inner.velocity = 0.0;
                inner.is_running = false;
                inner.target_value = clamped;
                return AnimationResult {
                    end_reason: AnimationEndReason::BoundReached,
                    end_value: clamped,
                };
            }

            if animation.is_finished_at(play_time_nanos) {
                inner.value = animation.target_value();
                inner.velocity = 0.0;
                inner.is_running = false;
                return AnimationResult {
                    end_reason: AnimationEndReason::Finished,
                    end_value: inner.value,
                };
            }
        }
    }
}
