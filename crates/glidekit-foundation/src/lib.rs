//! Gesture controllers for glidekit.
//!
//! Two independent, renderer-agnostic state machines:
//!
//! - [`reorder`]: drag-to-reorder for lazy lists (hit testing, hover
//!   detection, move emission, auto-scroll triggering)
//! - [`pager`]: paged scrolling with a fractional offset that settles onto
//!   the nearest page after release
//!
//! Both are single-threaded handles meant to be driven from the UI thread.
//! Animations are futures advanced by a [`glidekit_animation::FrameClock`].

mod geometry;
mod gesture_constants;
mod job;
mod velocity_tracker;

pub mod pager;
pub mod reorder;

pub use geometry::*;
pub use gesture_constants::*;
pub use job::*;
pub use velocity_tracker::*;
