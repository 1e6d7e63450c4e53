//! Release velocity estimation for drag gestures.
//!
//! Collects timestamped pointer positions along one axis and fits a line
//! through the recent ones (JC: `VelocityTracker1D` with the least-squares
//! strategy, degree 1).

use web_time::Instant;

use crate::gesture_constants::{MAX_FLING_VELOCITY, VELOCITY_HISTORY_SIZE, VELOCITY_HORIZON_MILLIS};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time_millis: u64,
    position: f32,
}

/// Tracks pointer movement along one axis and estimates velocity in px/s.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; VELOCITY_HISTORY_SIZE],
    newest: usize,
    origin: Option<Instant>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; VELOCITY_HISTORY_SIZE],
            newest: 0,
            origin: None,
        }
    }

    /// Records `position` at `time_millis`.
    ///
    /// Timestamps are expected to be non-decreasing.
    pub fn add_position(&mut self, time_millis: u64, position: f32) {
        self.newest = (self.newest + 1) % VELOCITY_HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample {
            time_millis,
            position,
        });
    }

    /// Records `position` stamped with the current wall-clock time.
    pub fn add_position_now(&mut self, position: f32) {
        let origin = *self.origin.get_or_insert_with(Instant::now);
        let elapsed = Instant::now().duration_since(origin).as_millis() as u64;
        self.add_position(elapsed, position);
    }

    /// Forgets all samples.
    pub fn reset(&mut self) {
        self.samples = [None; VELOCITY_HISTORY_SIZE];
        self.newest = 0;
        self.origin = None;
    }

    /// Estimated velocity in px/s, clamped to `±MAX_FLING_VELOCITY`.
    ///
    /// Returns `0.0` with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample until the horizon.
        let mut points = Vec::with_capacity(VELOCITY_HISTORY_SIZE);
        for step in 0..VELOCITY_HISTORY_SIZE {
            let index = (self.newest + VELOCITY_HISTORY_SIZE - step) % VELOCITY_HISTORY_SIZE;
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time_millis.saturating_sub(sample.time_millis);
            if age > VELOCITY_HORIZON_MILLIS {
                break;
            }
            points.push((-(age as f64), sample.position as f64));
        }

        if points.len() < 2 {
            return 0.0;
        }

        let n = points.len() as f64;
        let mean_t = points.iter().map(|(t, _)| t).sum::<f64>() / n;
        let mean_x = points.iter().map(|(_, x)| x).sum::<f64>() / n;
        let (mut covariance, mut variance) = (0.0, 0.0);
        for (t, x) in &points {
            covariance += (t - mean_t) * (x - mean_x);
            variance += (t - mean_t) * (t - mean_t);
        }
        if variance == 0.0 {
            return 0.0;
        }

        let per_milli = covariance / variance;
        let velocity = (per_milli * 1000.0) as f32;
        velocity.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_motion() {
        let mut tracker = VelocityTracker::new();
        for i in 0..5u64 {
            // 2 px per ms
            tracker.add_position(i * 10, i as f32 * 20.0);
        }
        assert!((tracker.calculate_velocity() - 2000.0).abs() < 0.5);
    }

    #[test]
    fn test_ignores_samples_past_horizon() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 1000.0);
        tracker.add_position(500, 0.0);
        tracker.add_position(510, -10.0);
        assert!((tracker.calculate_velocity() + 1000.0).abs() < 0.5);
    }

    #[test]
    fn test_single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
        tracker.add_position(5, 40.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(1, 500.0);
        assert_eq!(tracker.calculate_velocity(), MAX_FLING_VELOCITY);
        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_wall_clock_samples_are_stamped_from_first_call() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position_now(0.0);
        let first = tracker.samples[tracker.newest].map(|sample| sample.time_millis);
        assert_eq!(first, Some(0));

        std::thread::sleep(std::time::Duration::from_millis(5));
        tracker.add_position_now(25.0);
        let second = tracker.samples[tracker.newest].map(|sample| sample.time_millis);
        assert!(second >= Some(5));

        let velocity = tracker.calculate_velocity();
        assert!(velocity.is_finite());
        assert!(velocity > 0.0);

        tracker.reset();
        assert!(tracker.origin.is_none());
        tracker.add_position_now(3.0);
        assert_eq!(
            tracker.samples[tracker.newest].map(|sample| sample.time_millis),
            Some(0)
        );
    }
}
