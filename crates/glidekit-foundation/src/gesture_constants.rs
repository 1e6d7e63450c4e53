//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels and milliseconds.

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Samples older than this, relative to the newest one, are ignored when
/// estimating release velocity.
pub const VELOCITY_HORIZON_MILLIS: u64 = 100;

/// Number of pointer samples kept by the velocity tracker.
pub const VELOCITY_HISTORY_SIZE: usize = 20;
