//! Animation system for glidekit.
//!
//! - [`FrameClock`] - frame timestamp source (JC: `MonotonicFrameClock`)
//! - [`Animatable`] - snappable, animatable scalar (JC: `Animatable<Float>`)
//! - [`AnimationSpec`] - spring and tween configurations

mod animatable;
mod animation_spec;
mod frame_clock;

pub use animatable::*;
pub use animation_spec::*;
pub use frame_clock::*;
