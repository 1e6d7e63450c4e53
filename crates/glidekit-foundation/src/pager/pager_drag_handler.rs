use std::cell::Cell;

use glidekit_animation::{AnimationSpec, FrameClock};

use super::pager_state::{round_half_up, FlingOutcome, PagerState, SelectionState};
use crate::geometry::Orientation;

/// Configuration for a pager (JC: the `Pager` composable parameters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    /// Drag axis.
    pub orientation: Orientation,

    /// How many pages a single drag may travel past the current one.
    pub off_screen_limit: u32,

    /// Animation used to settle onto a page after release.
    pub settle_spec: AnimationSpec,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            off_screen_limit: 2,
            settle_spec: AnimationSpec::default(),
        }
    }
}

impl PagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn off_screen_limit(mut self, limit: u32) -> Self {
        self.off_screen_limit = limit;
        self
    }

    pub fn settle_spec(mut self, spec: impl Into<AnimationSpec>) -> Self {
        self.settle_spec = spec.into();
        self
    }
}

/// Converts pixel drag gestures into pager offset updates and settles.
///
/// Events arrive as `on_drag_started`, any number of `on_drag`, then
/// `on_drag_stopped`.
#[derive(Debug)]
pub struct PagerDragHandler {
    state: PagerState,
    config: PagerConfig,
    page_size: Cell<f32>,
}

impl PagerDragHandler {
    /// Creates a handler driving `state`, which adopts `config.settle_spec`.
    pub fn new(state: PagerState, config: PagerConfig) -> Self {
        state.set_settle_spec(config.settle_spec);
        Self {
            state,
            config,
            page_size: Cell::new(0.0),
        }
    }

    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Size of one page along the drag axis, in pixels.
    pub fn page_size(&self) -> f32 {
        self.page_size.get()
    }

    /// Updates the page size from the latest measure pass.
    pub fn set_page_size(&self, size: f32) {
        self.page_size.set(size.max(0.0));
    }

    /// Begins a drag: stops any settle in flight and marks the pager `Undecided`.
    pub fn on_drag_started(&self) {
        self.state.cancel_settle();
        self.state.set_selection_state(SelectionState::Undecided);
        log::trace!("Pager drag started on page {}", self.state.current_page());
    }

    /// Applies a drag delta in pixels along the drag axis.
    ///
    /// The resulting position is limited to `off_screen_limit` pages in each
    /// direction, and to zero toward a missing neighbour.
    pub fn on_drag(&self, delta: f32) {
        let page_size = self.page_size.get();
        if page_size <= 0.0 {
            return;
        }
        let state = &self.state;
        let current = state.current_page();
        let reach = page_size * self.config.off_screen_limit as f32;
        let max = if current == state.min_page() { 0.0 } else { reach };
        let min = if current == state.max_page() { 0.0 } else { -reach };
        let position = page_size * state.current_page_offset();
        let next = (position + delta).clamp(min, max);
        state.snap_to_offset(next / page_size);
    }

    /// Ends a drag with the release velocity in pixels per second.
    ///
    /// Settles onto the nearest page. A blocked fling commits the current
    /// page immediately; a superseded one leaves the pager to the gesture
    /// that took over.
    pub async fn on_drag_stopped<C: FrameClock>(&self, velocity: f32, clock: &C) -> FlingOutcome {
        let page_size = self.page_size.get();
        if page_size <= 0.0 {
            self.state.select_page();
            return FlingOutcome::Settled {
                page: self.state.current_page(),
            };
        }
        let outcome = self.state.fling(velocity / page_size, clock).await;
        if outcome == FlingOutcome::Blocked {
            self.state.select_page();
        }
        outcome
    }

    /// Main-axis pixel position of `page`'s start edge relative to the viewport.
    pub fn page_placement(&self, page: i32) -> f32 {
        let pages = page as f32
            - (self.state.current_page() as f32 - self.state.current_page_offset());
        round_half_up(pages * self.page_size.get()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use glidekit_animation::{FixedStepFrameClock, TweenSpec};

    fn handler(current: i32, min: i32, max: i32) -> PagerDragHandler {
        let handler = PagerDragHandler::new(PagerState::new(current, min, max), PagerConfig::new());
        handler.set_page_size(1000.0);
        handler
    }

    #[test]
    fn test_config_builder() {
        let config = PagerConfig::new()
            .orientation(Orientation::Horizontal)
            .off_screen_limit(1)
            .settle_spec(TweenSpec::new(200));
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.off_screen_limit, 1);
        assert_eq!(config.settle_spec, AnimationSpec::Tween(TweenSpec::new(200)));

        let handler = PagerDragHandler::new(PagerState::default(), config);
        assert_eq!(handler.state().settle_spec(), config.settle_spec);
    }

    #[test]
    fn test_drag_converts_pixels_to_offset() {
        let handler = handler(1, 0, 3);
        handler.on_drag_started();
        assert_eq!(handler.state().selection_state(), SelectionState::Undecided);

        handler.on_drag(-250.0);
        assert_eq!(handler.state().current_page_offset(), -0.25);
        handler.on_drag(-250.0);
        assert_eq!(handler.state().current_page_offset(), -0.5);
        handler.on_drag(700.0);
        assert_eq!(handler.state().current_page_offset(), 0.2);
    }

    #[test]
    fn test_drag_toward_missing_neighbour_is_pinned() {
        let first = handler(0, 0, 3);
        first.on_drag_started();
        first.on_drag(400.0);
        assert_eq!(first.state().current_page_offset(), 0.0);

        let last = handler(3, 0, 3);
        last.on_drag_started();
        last.on_drag(-400.0);
        assert_eq!(last.state().current_page_offset(), 0.0);
        last.on_drag(5000.0);
        assert_eq!(last.state().current_page_offset(), 1.0);
    }

    #[test]
    fn test_drag_without_page_size_is_ignored() {
        let handler = PagerDragHandler::new(PagerState::new(1, 0, 2), PagerConfig::new());
        handler.on_drag_started();
        handler.on_drag(-300.0);
        assert_eq!(handler.state().current_page_offset(), 0.0);

        let clock = FixedStepFrameClock::default();
        let outcome = block_on(handler.on_drag_stopped(-900.0, &clock));
        assert_eq!(outcome, FlingOutcome::Settled { page: 1 });
        assert_eq!(handler.state().selection_state(), SelectionState::Selected);
    }

    #[test]
    fn test_drag_and_release_settles_on_next_page() {
        let clock = FixedStepFrameClock::default();
        let handler = handler(0, 0, 3);
        handler.on_drag_started();
        handler.on_drag(-620.0);
        let outcome = block_on(handler.on_drag_stopped(-1500.0, &clock));
        assert_eq!(outcome, FlingOutcome::Settled { page: 1 });
        assert_eq!(handler.state().current_page_offset(), 0.0);
        assert_eq!(handler.state().selection_state(), SelectionState::Selected);
    }

    #[test]
    fn test_blocked_release_still_selects() {
        let clock = FixedStepFrameClock::default();
        let handler = handler(3, 0, 3);
        handler.on_drag_started();
        handler.on_drag(-300.0);
        let outcome = block_on(handler.on_drag_stopped(-2000.0, &clock));
        assert_eq!(outcome, FlingOutcome::Blocked);
        assert_eq!(handler.state().current_page(), 3);
        assert_eq!(handler.state().selection_state(), SelectionState::Selected);
    }

    #[test]
    fn test_page_placement() {
        let handler = handler(2, 0, 4);
        assert_eq!(handler.page_placement(2), 0.0);
        assert_eq!(handler.page_placement(3), 1000.0);
        assert_eq!(handler.page_placement(1), -1000.0);

        handler.on_drag_started();
        handler.on_drag(-333.3);
        assert_eq!(handler.page_placement(3), 667.0);
        assert_eq!(handler.page_placement(2), -333.0);
    }
}
