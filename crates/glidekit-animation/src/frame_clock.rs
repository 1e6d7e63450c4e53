//! Frame clock abstraction.
//!
//! Animations in glidekit are futures that advance once per frame. The host
//! supplies a [`FrameClock`] which resolves each frame request to the frame
//! timestamp, matching Jetpack Compose's `MonotonicFrameClock.withFrameNanos`.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Nanoseconds in a 60 Hz frame.
pub const FRAME_INTERVAL_60HZ_NANOS: u64 = 16_666_667;

/// Source of frame timestamps for frame-driven animations.
pub trait FrameClock {
    /// Suspends until the next frame and resolves to its timestamp in nanoseconds.
    ///
    /// Timestamps must be monotonically non-decreasing.
    fn next_frame(&self) -> impl Future<Output = u64>;
}

impl<C: FrameClock> FrameClock for &C {
    fn next_frame(&self) -> impl Future<Output = u64> {
        (**self).next_frame()
    }
}

/// Synthetic clock that steps time by a fixed interval per frame request.
///
/// Each request yields to the executor once before resolving, so concurrent
/// animations interleave frame by frame, but no real time passes. Useful for
/// headless hosts and tests where an animation should run to completion
/// without waiting on a display.
#[derive(Debug)]
pub struct FixedStepFrameClock {
    frame_time_nanos: Cell<u64>,
    frame_interval_nanos: u64,
}

impl FixedStepFrameClock {
    /// Creates a clock stepping `frame_interval_nanos` per frame, starting at zero.
    pub fn new(frame_interval_nanos: u64) -> Self {
        Self {
            frame_time_nanos: Cell::new(0),
            frame_interval_nanos,
        }
    }

    /// Timestamp of the most recently produced frame.
    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos.get()
    }

    /// Number of frames produced so far.
    pub fn frames_produced(&self) -> u64 {
        if self.frame_interval_nanos == 0 {
            return 0;
        }
        self.frame_time_nanos.get() / self.frame_interval_nanos
    }
}

impl Default for FixedStepFrameClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_60HZ_NANOS)
    }
}

impl FrameClock for FixedStepFrameClock {
    fn next_frame(&self) -> impl Future<Output = u64> {
        let next = self.frame_time_nanos.get() + self.frame_interval_nanos;
        self.frame_time_nanos.set(next);
        YieldThenReady {
            frame_time_nanos: next,
            yielded: false,
        }
    }
}

/// Resolves to the frame time on its second poll.
struct YieldThenReady {
    frame_time_nanos: u64,
    yielded: bool,
}

impl Future for YieldThenReady {
    type Output = u64;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<u64> {
        if self.yielded {
            return Poll::Ready(self.frame_time_nanos);
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
