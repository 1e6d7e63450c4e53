use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use glidekit_animation::{FrameClock, FRAME_INTERVAL_60HZ_NANOS};

struct TestFrameClockInner {
    frame_count: u64,
    frame_time_nanos: u64,
    frame_interval_nanos: u64,
    waiters: Vec<Waker>,
}

/// Manually advanced frame clock.
///
/// Frame requests stay pending until [`advance_frame`](Self::advance_frame)
/// produces the next frame, so tests decide exactly how far animations run.
#[derive(Clone)]
pub struct TestFrameClock {
    inner: Rc<RefCell<TestFrameClockInner>>,
}

impl Default for TestFrameClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_60HZ_NANOS)
    }
}

impl TestFrameClock {
    pub fn new(frame_interval_nanos: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TestFrameClockInner {
                frame_count: 0,
                frame_time_nanos: 0,
                frame_interval_nanos,
                waiters: Vec::new(),
            })),
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame_count
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.inner.borrow().frame_time_nanos
    }

    /// Whether any future is waiting for the next frame.
    pub fn has_pending_frame_requests(&self) -> bool {
        !self.inner.borrow().waiters.is_empty()
    }

    /// Produces one frame and wakes everything waiting on it.
    pub fn advance_frame(&self) {
        let waiters = {
            let mut inner = self.inner.borrow_mut();
            inner.frame_count += 1;
            inner.frame_time_nanos += inner.frame_interval_nanos;
            std::mem::take(&mut inner.waiters)
        };
        for waker in waiters {
            waker.wake();
        }
    }
}

impl FrameClock for TestFrameClock {
    fn next_frame(&self) -> impl Future<Output = u64> {
        NextFrame {
            clock: self.clone(),
            target_frame: self.frame_count() + 1,
        }
    }
}

struct NextFrame {
    clock: TestFrameClock,
    target_frame: u64,
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<u64> {
        let mut inner = self.clock.inner.borrow_mut();
        if inner.frame_count >= self.target_frame {
            return Poll::Ready(inner.frame_time_nanos);
        }
        if !inner.waiters.iter().any(|waker| waker.will_wake(cx.waker())) {
            inner.waiters.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
