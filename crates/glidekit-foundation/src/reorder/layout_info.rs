//! Visible-item geometry supplied by the list host.

use std::rc::Rc;

use smallvec::SmallVec;

/// Snapshot of one rendered item in a lazy list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleItem {
    /// Index of the item in the full data source.
    pub index: usize,

    /// Key of the item.
    pub key: u64,

    /// Offset of the item's start edge along the scroll axis, in viewport
    /// coordinates.
    pub offset: f32,

    /// Size of the item along the scroll axis.
    pub size: f32,
}

impl VisibleItem {
    pub fn new(index: usize, offset: f32, size: f32) -> Self {
        Self {
            index,
            key: index as u64,
            offset,
            size,
        }
    }

    pub fn with_key(mut self, key: u64) -> Self {
        self.key = key;
        self
    }

    /// Offset of the item's end edge.
    pub fn offset_end(&self) -> f32 {
        self.offset + self.size
    }

    /// Whether `position` lies within `[offset, offset_end]`, both ends inclusive.
    pub fn contains(&self, position: f32) -> bool {
        self.offset <= position && position <= self.offset_end()
    }
}

/// Information about the currently visible items of a list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListLayoutInfo {
    /// Visible items in ascending index order.
    pub visible_items_info: SmallVec<[VisibleItem; 16]>,

    /// Total number of items in the list.
    pub total_items_count: usize,

    /// Start boundary of the viewport.
    pub viewport_start_offset: f32,

    /// End boundary of the viewport.
    pub viewport_end_offset: f32,
}

impl ListLayoutInfo {
    /// Geometry of the item at absolute index `absolute`, if it is rendered.
    ///
    /// Visible items are contiguous, so this is a direct lookup relative to
    /// the first visible index.
    pub fn visible_item_for(&self, absolute: usize) -> Option<VisibleItem> {
        let first = self.visible_items_info.first()?;
        let relative = absolute.checked_sub(first.index)?;
        self.visible_items_info.get(relative).copied()
    }
}

/// Source of the current list layout (JC: `LazyListState.layoutInfo`).
///
/// Queried on every gesture event; implementations should return the layout
/// of the most recent measure pass.
pub trait LayoutInfoProvider {
    fn layout_info(&self) -> ListLayoutInfo;
}

impl<T: LayoutInfoProvider + ?Sized> LayoutInfoProvider for &T {
    fn layout_info(&self) -> ListLayoutInfo {
        (**self).layout_info()
    }
}

impl<T: LayoutInfoProvider + ?Sized> LayoutInfoProvider for Rc<T> {
    fn layout_info(&self) -> ListLayoutInfo {
        (**self).layout_info()
    }
}

impl LayoutInfoProvider for ListLayoutInfo {
    fn layout_info(&self) -> ListLayoutInfo {
        self.clone()
    }
}
