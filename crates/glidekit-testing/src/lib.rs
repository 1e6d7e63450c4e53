//! Testing utilities and harness for glidekit

mod fake_lazy_list;
mod pager_test_rule;
mod reorder_test_rule;
mod test_frame_clock;

pub use fake_lazy_list::*;
pub use pager_test_rule::*;
pub use reorder_test_rule::*;
pub use test_frame_clock::*;

pub mod prelude {
    pub use crate::{FakeLazyList, PagerTestRule, ReorderTestRule, TestFrameClock};
    pub use glidekit_foundation::Offset;
}
