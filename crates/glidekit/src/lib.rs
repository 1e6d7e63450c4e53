//! Toolkit-independent gesture state for reorderable lists and pagers.
//!
//! Re-exports the animation and foundation crates under one name. Most hosts
//! only need the [`prelude`]:
//!
//! ```rust,ignore
//! use glidekit::prelude::*;
//!
//! let state = PagerState::new(0, 0, 9);
//! let handler = PagerDragHandler::new(state.clone(), PagerConfig::default());
//! handler.set_page_size(1920.0);
//! ```

pub use glidekit_animation as animation;
pub use glidekit_foundation as foundation;

pub use glidekit_foundation::{pager, reorder};

pub mod prelude {
    pub use glidekit_animation::{
        Animatable, AnimationSpec, Easing, FixedStepFrameClock, FrameClock, SpringSpec,
        TweenSpec,
    };
    pub use glidekit_foundation::pager::{
        FlingOutcome, PagerConfig, PagerDragHandler, PagerScope, PagerState, SelectionState,
    };
    pub use glidekit_foundation::reorder::{
        DragDropListState, LayoutInfoProvider, ListLayoutInfo, MoveError, MutableListExt,
        ReorderConfig, VisibleItem,
    };
    pub use glidekit_foundation::{Job, Offset, Orientation, VelocityTracker};
}
