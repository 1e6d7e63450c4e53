//! Drag-to-reorder for lazy lists.
//!
//! - [`DragDropListState`] - gesture state machine emitting move instructions
//! - [`LayoutInfoProvider`] / [`ListLayoutInfo`] - visible-item geometry from the host
//! - [`MutableListExt`] - remove-and-reinsert primitive for the host collection

mod drag_drop_list_state;
mod layout_info;
mod move_item;

pub use drag_drop_list_state::*;
pub use layout_info::*;
pub use move_item::*;
