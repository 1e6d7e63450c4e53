//! Drag-to-reorder state for lazy lists.
//!
//! [`DragDropListState`] follows a dragged element against the visible
//! siblings reported by a [`LayoutInfoProvider`] and asks the host to move
//! items one swap at a time. It never touches the data itself; the host's
//! `on_move` callback performs the reorder (usually through
//! [`MutableListExt::move_item`](super::MutableListExt::move_item)) and the
//! next layout pass reflects it.

use std::future::Future;

use futures::future::Aborted;

use super::layout_info::{LayoutInfoProvider, VisibleItem};
use crate::geometry::{Offset, Orientation};
use crate::job::Job;

/// Configuration for [`DragDropListState`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReorderConfig {
    /// Scroll axis of the list; pointer offsets are projected onto it.
    pub orientation: Orientation,
}

impl ReorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// An in-progress drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Current logical index of the dragged element.
    pub dragged_index: usize,

    /// Geometry of the element when the drag started.
    pub initial_item: VisibleItem,

    /// Sum of all drag deltas along the scroll axis.
    pub dragged_distance: f32,
}

impl DragSession {
    /// Where the dragged element would be if it followed the pointer exactly:
    /// `(start, end)` along the scroll axis.
    pub fn virtual_bounds(&self) -> (f32, f32) {
        (
            self.initial_item.offset + self.dragged_distance,
            self.initial_item.offset_end() + self.dragged_distance,
        )
    }
}

/// State holder for a drag-to-reorder list.
///
/// Driven by one pointer at a time: call [`on_drag_start`](Self::on_drag_start)
/// when a drag begins, [`on_drag`](Self::on_drag) for every delta and
/// [`on_drag_end`](Self::on_drag_end) or
/// [`on_drag_interrupted`](Self::on_drag_interrupted) when it stops.
pub struct DragDropListState<P> {
    layout: P,
    on_move: Box<dyn FnMut(usize, usize)>,
    config: ReorderConfig,
    session: Option<DragSession>,
    overscroll_job: Option<Job>,
}

impl<P: LayoutInfoProvider> DragDropListState<P> {
    /// Creates a state reading geometry from `layout` and reporting moves to
    /// `on_move(from, to)`.
    pub fn new(layout: P, on_move: impl FnMut(usize, usize) + 'static) -> Self {
        Self::with_config(layout, ReorderConfig::default(), on_move)
    }

    pub fn with_config(
        layout: P,
        config: ReorderConfig,
        on_move: impl FnMut(usize, usize) + 'static,
    ) -> Self {
        Self {
            layout,
            on_move: Box::new(on_move),
            config,
            session: None,
            overscroll_job: None,
        }
    }

    pub fn layout(&self) -> &P {
        &self.layout
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Index the dragged element currently occupies, if a drag is active.
    pub fn current_index_of_dragged_item(&self) -> Option<usize> {
        self.session.map(|session| session.dragged_index)
    }

    /// Accumulated drag distance; `0.0` outside a drag.
    pub fn dragged_distance(&self) -> f32 {
        self.session
            .map(|session| session.dragged_distance)
            .unwrap_or(0.0)
    }

    /// Translation the host should apply to the dragged element so it stays
    /// under the pointer: its virtual start minus where layout currently
    /// places it.
    ///
    /// `None` outside a drag or while the element is scrolled out of view.
    pub fn element_displacement(&self) -> Option<f32> {
        let session = self.session?;
        let current = self.layout.layout_info().visible_item_for(session.dragged_index)?;
        Some(session.initial_item.offset + session.dragged_distance - current.offset)
    }

    /// Starts a drag at `pointer` if it lies on a visible item.
    ///
    /// Returns the index of the picked item. Outside every item no session is
    /// opened and `None` is returned.
    pub fn on_drag_start(&mut self, pointer: Offset) -> Option<usize> {
        let position = self.config.orientation.main_axis(pointer);
        let info = self.layout.layout_info();
        let item = info
            .visible_items_info
            .iter()
            .find(|item| item.contains(position))
            .copied()?;

        log::debug!("Drag started on item {} at {}", item.index, position);
        self.session = Some(DragSession {
            dragged_index: item.index,
            initial_item: item,
            dragged_distance: 0.0,
        });
        Some(item.index)
    }

    /// Applies a drag delta and swaps with a neighbour once the dragged
    /// element has moved past it.
    ///
    /// Returns the emitted move `(from, to)`, if any. At most one move is
    /// emitted per call. No-op without an open session.
    pub fn on_drag(&mut self, delta: Offset) -> Option<(usize, usize)> {
        let session = self.session.as_mut()?;
        session.dragged_distance += self.config.orientation.main_axis(delta);
        let session = *session;

        let (start, end) = session.virtual_bounds();
        let info = self.layout.layout_info();
        let Some(hovered) = info.visible_item_for(session.dragged_index) else {
            log::trace!(
                "Dragged item {} is not visible, skipping reorder",
                session.dragged_index
            );
            return None;
        };

        let moving_forward = start - hovered.offset > 0.0;
        let target = info
            .visible_items_info
            .iter()
            .filter(|item| {
                !(item.offset_end() < start || item.offset > end || item.index == hovered.index)
            })
            .find(|item| {
                if moving_forward {
                    end > item.offset_end()
                } else {
                    start < item.offset
                }
            })?;

        let from = session.dragged_index;
        let to = target.index;
        log::debug!("Moving dragged item {} -> {}", from, to);
        (self.on_move)(from, to);
        if let Some(session) = self.session.as_mut() {
            session.dragged_index = to;
        }
        Some((from, to))
    }

    /// Ends the drag normally.
    pub fn on_drag_end(&mut self) {
        self.on_drag_interrupted();
    }

    /// Discards the drag session and cancels auto-scroll.
    ///
    /// Always succeeds, also without an open session.
    pub fn on_drag_interrupted(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!(
                "Drag on item {} ended after {} px",
                session.dragged_index,
                session.dragged_distance
            );
        }
        self.cancel_overscroll_job();
    }

    /// How far the dragged element's virtual bounds reach past the viewport
    /// in the drag direction.
    ///
    /// Positive when dragging forward past the viewport end, negative when
    /// dragging backward past the viewport start, `0.0` otherwise or without
    /// a session.
    pub fn check_for_overscroll(&self) -> f32 {
        let Some(session) = self.session else {
            return 0.0;
        };
        let (start, end) = session.virtual_bounds();
        let info = self.layout.layout_info();
        let distance = session.dragged_distance;

        if distance > 0.0 {
            let diff = end - info.viewport_end_offset;
            if diff > 0.0 {
                return diff;
            }
        } else if distance < 0.0 {
            let diff = start - info.viewport_start_offset;
            if diff < 0.0 {
                return diff;
            }
        }
        0.0
    }

    pub fn is_overscroll_job_active(&self) -> bool {
        self.overscroll_job.as_ref().is_some_and(Job::is_active)
    }

    /// Launches `task` as the auto-scroll job unless one is already active.
    ///
    /// Returns the future the host must poll, or `None` if a job is running.
    pub fn launch_overscroll_job<F>(
        &mut self,
        task: F,
    ) -> Option<impl Future<Output = Result<F::Output, Aborted>>>
    where
        F: Future,
    {
        if self.is_overscroll_job_active() {
            return None;
        }
        let (job, future) = Job::launch(task);
        self.overscroll_job = Some(job);
        Some(future)
    }

    pub fn cancel_overscroll_job(&mut self) {
        if let Some(job) = self.overscroll_job.take() {
            if job.is_active() {
                log::trace!("Cancelling auto-scroll job");
            }
            job.cancel();
        }
    }

    /// Per-tick auto-scroll policy: call after [`on_drag`](Self::on_drag).
    ///
    /// Without overscroll the running job is cancelled. Otherwise, if no job
    /// is active, `make_task(overscroll)` builds a scroll task which is
    /// launched and returned for the host to poll.
    pub fn drive_auto_scroll<F>(
        &mut self,
        make_task: impl FnOnce(f32) -> F,
    ) -> Option<impl Future<Output = Result<F::Output, Aborted>>>
    where
        F: Future,
    {
        let overscroll = self.check_for_overscroll();
        if overscroll == 0.0 {
            self.cancel_overscroll_job();
            return None;
        }
        if self.is_overscroll_job_active() {
            return None;
        }
        self.launch_overscroll_job(make_task(overscroll))
    }
}

impl<P> std::fmt::Debug for DragDropListState<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDropListState")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("overscroll_job", &self.overscroll_job)
            .finish_non_exhaustive()
    }
}
