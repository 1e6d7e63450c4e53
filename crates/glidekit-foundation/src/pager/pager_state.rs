//! Pager state: page extent, fractional page offset and selection.
//!
//! [`PagerState`] keeps `min_page <= current_page <= max_page` on every
//! mutation and tracks a fractional offset in `[-1, 1]` toward the
//! neighbouring page. A positive offset leans toward the previous page
//! (`current_page - 1`), a negative offset toward the next. Committing a
//! page ([`PagerState::select_page`]) subtracts the rounded offset from the
//! current page.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use glidekit_animation::{Animatable, AnimationEndReason, AnimationSpec, FrameClock};

/// Whether a page is committed or a gesture is still deciding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    /// A page is committed.
    #[default]
    Selected,
    /// A drag or fling is in progress.
    Undecided,
}

/// Outcome of [`PagerState::fling`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlingOutcome {
    /// The velocity pointed past the first or last page; nothing happened.
    Blocked,
    /// The offset settled and `page` was committed.
    Settled { page: i32 },
    /// Another snap or fling took over before the settle finished.
    Cancelled,
}

/// Rounds half-way values up (toward positive infinity).
pub(crate) fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

struct PagerStateInner {
    min_page: i32,
    max_page: i32,
    current_page: i32,
    selection_state: SelectionState,
    settle_spec: AnimationSpec,
}

/// State holder for a pager.
///
/// Cloning yields another handle to the same state. Meant to be driven by a
/// single gesture stream on one thread.
///
/// # Example
///
/// ```rust,ignore
/// let state = PagerState::new(0, 0, 9);
/// state.snap_to_offset(-0.7); // dragged most of the way to page 1
/// state.select_page();
/// assert_eq!(state.current_page(), 1);
/// ```
#[derive(Clone)]
pub struct PagerState {
    inner: Rc<RefCell<PagerStateInner>>,
    offset: Animatable,
}

impl PagerState {
    /// Creates a pager over `min_page..=max_page` showing `current_page`.
    ///
    /// `max_page` is raised to `min_page` if smaller, and `current_page` is
    /// clamped into the extent.
    pub fn new(current_page: i32, min_page: i32, max_page: i32) -> Self {
        let max_page = max_page.max(min_page);
        let offset = Animatable::new(0.0);
        offset.update_bounds(-1.0, 1.0);
        Self {
            inner: Rc::new(RefCell::new(PagerStateInner {
                min_page,
                max_page,
                current_page: current_page.clamp(min_page, max_page),
                selection_state: SelectionState::Selected,
                settle_spec: AnimationSpec::default(),
            })),
            offset,
        }
    }

    pub fn settle_spec(&self) -> AnimationSpec {
        self.inner.borrow().settle_spec
    }

    pub fn set_settle_spec(&self, spec: AnimationSpec) {
        self.inner.borrow_mut().settle_spec = spec;
    }

    pub fn min_page(&self) -> i32 {
        self.inner.borrow().min_page
    }

    /// Sets the first page, lowering it to `max_page` if larger, then
    /// re-clamps the current page.
    pub fn set_min_page(&self, value: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.min_page = value.min(inner.max_page);
        inner.current_page = inner.current_page.clamp(inner.min_page, inner.max_page);
    }

    pub fn max_page(&self) -> i32 {
        self.inner.borrow().max_page
    }

    /// Sets the last page, raising it to `min_page` if smaller, then
    /// re-clamps the current page.
    pub fn set_max_page(&self, value: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.max_page = value.max(inner.min_page);
        inner.current_page = inner.current_page.clamp(inner.min_page, inner.max_page);
    }

    pub fn current_page(&self) -> i32 {
        self.inner.borrow().current_page
    }

    /// Sets the current page, clamped into `min_page..=max_page`.
    pub fn set_current_page(&self, value: i32) {
        let mut inner = self.inner.borrow_mut();
        inner.current_page = value.clamp(inner.min_page, inner.max_page);
    }

    pub fn selection_state(&self) -> SelectionState {
        self.inner.borrow().selection_state
    }

    pub fn set_selection_state(&self, state: SelectionState) {
        self.inner.borrow_mut().selection_state = state;
    }

    /// Instantaneous offset toward the neighbouring page, in `[-1, 1]`.
    pub fn current_page_offset(&self) -> f32 {
        self.offset.value()
    }

    /// Whether a settle animation is in flight.
    pub fn is_settling(&self) -> bool {
        self.offset.is_running()
    }

    /// Sets the offset instantly, cancelling any settle in flight.
    ///
    /// The offset is clamped to `[-1, 1]`, tightened to `[-1, 0]` on the
    /// first page and `[0, 1]` on the last page since there is no neighbour
    /// to lean toward. `NaN` is treated as `0`.
    pub fn snap_to_offset(&self, offset: f32) {
        let (current, min_page, max_page) = {
            let inner = self.inner.borrow();
            (inner.current_page, inner.min_page, inner.max_page)
        };
        let max = if current == min_page { 0.0 } else { 1.0 };
        let min = if current == max_page { 0.0 } else { -1.0 };
        let offset = if offset.is_nan() { 0.0 } else { offset };
        self.offset.snap_to(offset.clamp(min, max));
    }

    /// Commits the page the offset points at: moves `current_page` by the
    /// rounded offset, resets the offset and marks the pager `Selected`.
    pub fn select_page(&self) {
        let rounded = round_half_up(self.current_page_offset());
        let previous = self.current_page();
        self.set_current_page(previous - rounded);
        self.snap_to_offset(0.0);
        self.set_selection_state(SelectionState::Selected);
        log::debug!("Selected page {} (was {})", self.current_page(), previous);
    }

    /// Stops a settle animation in flight without committing a page.
    pub fn cancel_settle(&self) {
        if self.offset.is_running() {
            log::debug!("Cancelling pager settle at offset {}", self.offset.value());
        }
        self.offset.stop();
    }

    /// Settles the offset onto the nearest page and commits it.
    ///
    /// `velocity` is in pages per second; only its sign is used to refuse a
    /// fling past the last page (negative) or the first page (positive).
    /// Suspends until the settle finishes. A newer snap or fling cancels this
    /// one, in which case nothing is committed.
    pub async fn fling<C: FrameClock>(&self, velocity: f32, clock: &C) -> FlingOutcome {
        let (current, min_page, max_page, spec) = {
            let inner = self.inner.borrow();
            (
                inner.current_page,
                inner.min_page,
                inner.max_page,
                inner.settle_spec,
            )
        };
        if (velocity < 0.0 && current == max_page) || (velocity > 0.0 && current == min_page) {
            log::debug!("Fling with velocity {} blocked at page {}", velocity, current);
            return FlingOutcome::Blocked;
        }

        let target = round_half_up(self.current_page_offset()) as f32;
        let result = self.offset.animate_to(target, spec, clock).await;
        if result.end_reason == AnimationEndReason::Interrupted {
            log::debug!("Fling superseded at offset {}", result.end_value);
            return FlingOutcome::Cancelled;
        }

        self.select_page();
        FlingOutcome::Settled {
            page: self.current_page(),
        }
    }

    /// Runs `action` with the pager `Undecided`, then always commits with
    /// [`select_page`](Self::select_page), even if `action` panics or the
    /// returned future is dropped before completing.
    pub async fn selection_page<R, F, Fut>(&self, action: F) -> R
    where
        F: FnOnce(PagerState) -> Fut,
        Fut: Future<Output = R>,
    {
        let _finalize = SelectPageOnDrop(self);
        self.set_selection_state(SelectionState::Undecided);
        action(self.clone()).await
    }
}

/// Commits the pager when dropped.
struct SelectPageOnDrop<'a>(&'a PagerState);

impl Drop for SelectPageOnDrop<'_> {
    fn drop(&mut self) {
        self.0.select_page();
    }
}

impl Default for PagerState {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl fmt::Debug for PagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PagerState")
            .field("min_page", &inner.min_page)
            .field("max_page", &inner.max_page)
            .field("current_page", &inner.current_page)
            .field("current_page_offset", &self.offset.value())
            .field("selection_state", &inner.selection_state)
            .finish()
    }
}
