use std::cell::RefCell;
use std::rc::Rc;

use glidekit_foundation::reorder::{
    LayoutInfoProvider, ListLayoutInfo, MoveError, MutableListExt, VisibleItem,
};

struct FakeLazyListInner<T> {
    items: Vec<T>,
    keys: Vec<u64>,
    sizes: Vec<f32>,
    scroll_offset: f32,
    viewport_size: f32,
}

/// In-memory lazy list host: a backing collection laid out along one axis in
/// a fixed viewport, scrolled by a pixel offset.
///
/// Each item gets a stable key (its index at construction) that travels with
/// it through moves and is reported in [`VisibleItem::key`].
///
/// Cloning yields another handle to the same list, so one clone can serve as
/// the controller's layout provider while another applies moves and scrolls.
pub struct FakeLazyList<T> {
    inner: Rc<RefCell<FakeLazyListInner<T>>>,
}

impl<T> Clone for FakeLazyList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> FakeLazyList<T> {
    /// Creates a list where every item is `item_size` pixels long.
    pub fn uniform(items: Vec<T>, item_size: f32, viewport_size: f32) -> Self {
        let sizes = vec![item_size; items.len()];
        Self::with_sizes(items, sizes, viewport_size)
    }

    /// Creates a list with per-item sizes. Missing sizes default to zero.
    pub fn with_sizes(items: Vec<T>, mut sizes: Vec<f32>, viewport_size: f32) -> Self {
        sizes.resize(items.len(), 0.0);
        let keys = (0..items.len() as u64).collect();
        Self {
            inner: Rc::new(RefCell::new(FakeLazyListInner {
                items,
                keys,
                sizes,
                scroll_offset: 0.0,
                viewport_size,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scroll_offset(&self) -> f32 {
        self.inner.borrow().scroll_offset
    }

    pub fn viewport_size(&self) -> f32 {
        self.inner.borrow().viewport_size
    }

    /// Total length of the content.
    pub fn content_size(&self) -> f32 {
        self.inner.borrow().sizes.iter().sum()
    }

    /// Scrolls by `delta` pixels within the content and returns the amount
    /// actually consumed.
    pub fn scroll_by(&self, delta: f32) -> f32 {
        let max = (self.content_size() - self.viewport_size()).max(0.0);
        let mut inner = self.inner.borrow_mut();
        let previous = inner.scroll_offset;
        inner.scroll_offset = (previous + delta).clamp(0.0, max);
        let consumed = inner.scroll_offset - previous;
        log::trace!("FakeLazyList scrolled by {} (requested {})", consumed, delta);
        consumed
    }

    /// Stable item keys in current order.
    pub fn keys(&self) -> Vec<u64> {
        self.inner.borrow().keys.clone()
    }

    /// Moves an item together with its key and size.
    pub fn move_item(&self, from: usize, to: usize) -> Result<(), MoveError> {
        let mut inner = self.inner.borrow_mut();
        inner.items.move_item(from, to)?;
        inner.keys.move_item(from, to)?;
        inner.sizes.move_item(from, to)
    }

    /// A host move callback applying moves to this list.
    pub fn move_callback(&self) -> impl FnMut(usize, usize) + 'static {
        let list = self.clone();
        move |from, to| {
            if let Err(err) = list.move_item(from, to) {
                log::warn!("FakeLazyList rejected move {} -> {}: {}", from, to, err);
            }
        }
    }
}

impl<T: Clone> FakeLazyList<T> {
    /// Snapshot of the backing collection.
    pub fn items(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }
}

impl<T> LayoutInfoProvider for FakeLazyList<T> {
    fn layout_info(&self) -> ListLayoutInfo {
        let inner = self.inner.borrow();
        let viewport_end = inner.scroll_offset + inner.viewport_size;
        let mut info = ListLayoutInfo {
            total_items_count: inner.items.len(),
            viewport_start_offset: 0.0,
            viewport_end_offset: inner.viewport_size,
            ..Default::default()
        };
        let mut start = 0.0;
        for (index, size) in inner.sizes.iter().copied().enumerate() {
            let end = start + size;
            if end > inner.scroll_offset && start < viewport_end {
                info.visible_items_info.push(
                    VisibleItem::new(index, start - inner.scroll_offset, size)
                        .with_key(inner.keys[index]),
                );
            }
            if start >= viewport_end {
                break;
            }
            start = end;
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reports_visible_window() {
        let list = FakeLazyList::uniform((0..10).collect::<Vec<u32>>(), 100.0, 250.0);
        let info = list.layout_info();
        let indices: Vec<usize> = info.visible_items_info.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(info.viewport_end_offset, 250.0);

        assert_eq!(list.scroll_by(150.0), 150.0);
        let info = list.layout_info();
        assert_eq!(info.visible_items_info[0].index, 1);
        assert_eq!(info.visible_items_info[0].offset, -50.0);
        assert_eq!(info.visible_items_info.len(), 3);
    }

    #[test]
    fn test_scroll_is_limited_to_content() {
        let list = FakeLazyList::uniform(vec!['a', 'b', 'c'], 100.0, 200.0);
        assert_eq!(list.scroll_by(-30.0), 0.0);
        assert_eq!(list.scroll_by(500.0), 100.0);
        assert_eq!(list.scroll_offset(), 100.0);
    }

    #[test]
    fn test_move_callback_reorders_items() {
        let list = FakeLazyList::with_sizes(vec!["a", "b", "c"], vec![10.0, 20.0, 30.0], 100.0);
        let mut on_move = list.move_callback();
        on_move(0, 2);
        on_move(5, 0);
        assert_eq!(list.items(), vec!["b", "c", "a"]);
        let sizes: Vec<f32> = list
            .layout_info()
            .visible_items_info
            .iter()
            .map(|item| item.size)
            .collect();
        assert_eq!(sizes, vec![20.0, 30.0, 10.0]);
        assert_eq!(list.keys(), vec![1, 2, 0]);
    }

    #[test]
    fn test_visible_items_carry_keys_through_moves() {
        let list = FakeLazyList::uniform(vec!['a', 'b', 'c', 'd'], 100.0, 250.0);
        list.move_item(3, 0).unwrap();
        let visible: Vec<(usize, u64)> = list
            .layout_info()
            .visible_items_info
            .iter()
            .map(|item| (item.index, item.key))
            .collect();
        assert_eq!(visible, vec![(0, 3), (1, 0), (2, 1)]);
    }
}
