use std::cell::Cell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use glidekit_foundation::pager::{FlingOutcome, PagerConfig, PagerDragHandler, PagerState};
use glidekit_foundation::VelocityTracker;

use crate::test_frame_clock::TestFrameClock;

/// Frames [`PagerTestRule::await_idle`] runs before giving up.
const MAX_IDLE_FRAMES: usize = 600;

/// Pointer events injected per swipe.
const SWIPE_STEPS: u32 = 10;

/// Harness driving a [`PagerDragHandler`] with scripted swipes.
///
/// Release velocity comes from a [`VelocityTracker`] fed with the swipe's
/// synthetic timestamps. Settles run on a local executor advanced by a
/// [`TestFrameClock`].
pub struct PagerTestRule {
    handler: Rc<PagerDragHandler>,
    clock: TestFrameClock,
    pool: LocalPool,
    last_outcome: Rc<Cell<Option<FlingOutcome>>>,
}

impl PagerTestRule {
    pub fn new(state: PagerState, config: PagerConfig, page_size: f32) -> Self {
        let handler = PagerDragHandler::new(state, config);
        handler.set_page_size(page_size);
        Self {
            handler: Rc::new(handler),
            clock: TestFrameClock::default(),
            pool: LocalPool::new(),
            last_outcome: Rc::new(Cell::new(None)),
        }
    }

    pub fn state(&self) -> &PagerState {
        self.handler.state()
    }

    pub fn handler(&self) -> &PagerDragHandler {
        &self.handler
    }

    pub fn clock(&self) -> &TestFrameClock {
        &self.clock
    }

    /// Outcome of the most recent completed release.
    pub fn last_outcome(&self) -> Option<FlingOutcome> {
        self.last_outcome.get()
    }

    /// Drags by `distance` pixels along the pager axis over `duration_millis`
    /// and releases, leaving the settle running. Returns the release velocity.
    pub fn perform_swipe(&mut self, distance: f32, duration_millis: u64) -> f32 {
        let mut tracker = VelocityTracker::new();
        let step = distance / SWIPE_STEPS as f32;
        let mut position = 0.0;
        tracker.add_position(0, position);

        self.handler.on_drag_started();
        for i in 1..=SWIPE_STEPS {
            position += step;
            tracker.add_position(duration_millis * i as u64 / SWIPE_STEPS as u64, position);
            self.handler.on_drag(step);
        }

        let velocity = tracker.calculate_velocity();
        self.release(velocity);
        velocity
    }

    /// Drags by `distance` pixels without releasing.
    pub fn drag_by(&mut self, distance: f32) {
        self.handler.on_drag_started();
        self.handler.on_drag(distance);
    }

    /// Releases the current drag with `velocity` pixels per second.
    pub fn release(&mut self, velocity: f32) {
        self.last_outcome.set(None);
        let handler = self.handler.clone();
        let clock = self.clock.clone();
        let outcome = self.last_outcome.clone();
        self.pool
            .spawner()
            .spawn_local(async move {
                let result = handler.on_drag_stopped(velocity, &clock).await;
                outcome.set(Some(result));
            })
            .expect("local pool rejected pager settle");
        self.pool.run_until_stalled();
    }

    /// Swipes and waits for the pager to settle.
    pub fn swipe(&mut self, distance: f32, duration_millis: u64) -> Option<FlingOutcome> {
        self.perform_swipe(distance, duration_millis);
        self.await_idle();
        self.last_outcome()
    }

    pub fn advance_frame(&mut self) {
        self.clock.advance_frame();
        self.pool.run_until_stalled();
    }

    /// Advances frames until no settle is waiting on the clock.
    pub fn await_idle(&mut self) {
        self.pool.run_until_stalled();
        let mut frames = 0;
        while self.clock.has_pending_frame_requests() {
            self.advance_frame();
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("Pager failed to settle after {MAX_IDLE_FRAMES} frames");
            }
        }
    }
}
