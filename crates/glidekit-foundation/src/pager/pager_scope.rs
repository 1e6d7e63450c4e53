use super::pager_state::{PagerState, SelectionState};

/// Read view of the pager handed to each page's content.
#[derive(Clone, Debug)]
pub struct PagerScope {
    state: PagerState,
    page: i32,
}

impl PagerScope {
    pub fn new(state: PagerState, page: i32) -> Self {
        Self { state, page }
    }

    /// The page this scope renders.
    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn current_page(&self) -> i32 {
        self.state.current_page()
    }

    pub fn current_page_offset(&self) -> f32 {
        self.state.current_page_offset()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.state.selection_state()
    }

    /// Whether this page is the committed current page.
    pub fn is_current_page(&self) -> bool {
        self.page == self.state.current_page()
    }

    /// Position of this page relative to the viewport, in pages.
    ///
    /// `0` is fully in view, `1` one page past the end, `-1` one page before
    /// the start.
    pub fn page_position(&self) -> f32 {
        self.page as f32 - (self.state.current_page() as f32 - self.state.current_page_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_position_follows_offset() {
        let state = PagerState::new(1, 0, 3);
        let next = PagerScope::new(state.clone(), 2);
        let current = PagerScope::new(state.clone(), 1);
        assert_eq!(next.page_position(), 1.0);
        assert!(current.is_current_page());

        state.snap_to_offset(-0.25);
        assert_eq!(next.page_position(), 0.75);
        assert_eq!(current.page_position(), -0.25);
        assert_eq!(next.current_page_offset(), -0.25);
    }
}
