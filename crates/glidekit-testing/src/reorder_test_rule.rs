use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use glidekit_animation::FrameClock;
use glidekit_foundation::reorder::{DragDropListState, ReorderConfig};
use glidekit_foundation::Offset;

use crate::fake_lazy_list::FakeLazyList;
use crate::test_frame_clock::TestFrameClock;

/// Frames [`ReorderTestRule::await_idle`] runs before giving up.
const MAX_IDLE_FRAMES: usize = 100;

/// Harness wiring a [`DragDropListState`] to a [`FakeLazyList`].
///
/// Moves are applied to the list and recorded. Every drag tick runs the
/// auto-scroll policy; scroll jobs run on a local executor driven by a
/// [`TestFrameClock`] and scroll the list by the overscroll amount one frame
/// after launch.
pub struct ReorderTestRule<T: 'static> {
    list: FakeLazyList<T>,
    state: DragDropListState<FakeLazyList<T>>,
    clock: TestFrameClock,
    pool: LocalPool,
    moves: Rc<RefCell<Vec<(usize, usize)>>>,
}

impl<T: 'static> ReorderTestRule<T> {
    pub fn new(list: FakeLazyList<T>) -> Self {
        Self::with_config(list, ReorderConfig::default())
    }

    pub fn with_config(list: FakeLazyList<T>, config: ReorderConfig) -> Self {
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = moves.clone();
        let mut apply = list.move_callback();
        let state = DragDropListState::with_config(list.clone(), config, move |from, to| {
            sink.borrow_mut().push((from, to));
            apply(from, to);
        });
        Self {
            list,
            state,
            clock: TestFrameClock::default(),
            pool: LocalPool::new(),
            moves,
        }
    }

    pub fn state(&self) -> &DragDropListState<FakeLazyList<T>> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DragDropListState<FakeLazyList<T>> {
        &mut self.state
    }

    pub fn list(&self) -> &FakeLazyList<T> {
        &self.list
    }

    pub fn clock(&self) -> &TestFrameClock {
        &self.clock
    }

    /// Moves emitted so far, in order.
    pub fn moves(&self) -> Vec<(usize, usize)> {
        self.moves.borrow().clone()
    }

    /// Runs a scripted gesture against the list.
    pub fn perform_touch_input(&mut self, block: impl FnOnce(&mut ReorderTouchScope<'_, T>)) {
        let mut scope = ReorderTouchScope {
            rule: self,
            position: Offset::ZERO,
        };
        block(&mut scope);
    }

    /// Produces one frame and runs whatever it unblocks.
    pub fn advance_frame(&mut self) {
        self.clock.advance_frame();
        self.pool.run_until_stalled();
    }

    /// Advances frames until no task is waiting on the clock.
    pub fn await_idle(&mut self) {
        self.pool.run_until_stalled();
        let mut frames = 0;
        while self.clock.has_pending_frame_requests() {
            self.advance_frame();
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("Reorder gesture failed to settle after {MAX_IDLE_FRAMES} frames");
            }
        }
    }

    fn tick_auto_scroll(&mut self) {
        let list = self.list.clone();
        let clock = self.clock.clone();
        let job = self.state.drive_auto_scroll(move |overscroll| async move {
            clock.next_frame().await;
            list.scroll_by(overscroll)
        });
        if let Some(job) = job {
            self.pool
                .spawner()
                .spawn_local(async move {
                    if job.await.is_err() {
                        log::trace!("Auto-scroll job aborted");
                    }
                })
                .expect("local pool rejected auto-scroll job");
        }
        self.pool.run_until_stalled();
    }
}

/// Pointer script for a [`ReorderTestRule`] (JC: `TouchInjectionScope`).
pub struct ReorderTouchScope<'a, T: 'static> {
    rule: &'a mut ReorderTestRule<T>,
    position: Offset,
}

impl<T: 'static> ReorderTouchScope<'_, T> {
    /// Current pointer position.
    pub fn position(&self) -> Offset {
        self.position
    }

    /// Presses at `at`; returns the picked item index.
    pub fn down(&mut self, at: Offset) -> Option<usize> {
        self.position = at;
        self.rule.state.on_drag_start(at)
    }

    /// Moves the pointer by `delta`; returns the move this tick emitted.
    pub fn move_by(&mut self, delta: Offset) -> Option<(usize, usize)> {
        self.position = Offset::new(self.position.x + delta.x, self.position.y + delta.y);
        let moved = self.rule.state.on_drag(delta);
        self.rule.tick_auto_scroll();
        moved
    }

    /// Moves by `delta` along the list's main axis only.
    pub fn move_along(&mut self, delta: f32) -> Option<(usize, usize)> {
        let step = self.rule.state.config().orientation.offset_along(delta);
        self.move_by(step)
    }

    pub fn move_to(&mut self, target: Offset) -> Option<(usize, usize)> {
        let delta = Offset::new(target.x - self.position.x, target.y - self.position.y);
        self.move_by(delta)
    }

    /// Moves by `delta` in `steps` equal ticks, collecting emitted moves.
    pub fn move_in_steps(&mut self, delta: Offset, steps: usize) -> Vec<(usize, usize)> {
        let steps = steps.max(1);
        let step = Offset::new(delta.x / steps as f32, delta.y / steps as f32);
        (0..steps).filter_map(|_| self.move_by(step)).collect()
    }

    pub fn up(&mut self) {
        self.rule.state.on_drag_end();
        self.rule.pool.run_until_stalled();
    }

    /// Ends the gesture the way a cancelled pointer stream does.
    pub fn cancel(&mut self) {
        self.rule.state.on_drag_interrupted();
        self.rule.pool.run_until_stalled();
    }
}
