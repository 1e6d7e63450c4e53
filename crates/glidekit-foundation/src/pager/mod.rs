//! Vertical/horizontal pager with snap-to-page settling.
//!
//! - [`PagerState`] - page extent, fractional offset and selection state
//! - [`PagerDragHandler`] - pixel drag deltas to offsets, release to fling
//! - [`PagerScope`] - per-page read view for page content

mod pager_drag_handler;
mod pager_scope;
mod pager_state;

pub use pager_drag_handler::*;
pub use pager_scope::*;
pub use pager_state::{FlingOutcome, PagerState, SelectionState};
