//! Pointer geometry shared by the gesture controllers.

/// A 2D pointer position or delta in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Scroll axis of a list or pager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The component of `offset` along this axis.
    pub fn main_axis(self, offset: Offset) -> f32 {
        match self {
            Orientation::Vertical => offset.y,
            Orientation::Horizontal => offset.x,
        }
    }

    /// An offset that moves `delta` along this axis only.
    pub fn offset_along(self, delta: f32) -> Offset {
        match self {
            Orientation::Vertical => Offset::new(0.0, delta),
            Orientation::Horizontal => Offset::new(delta, 0.0),
        }
    }
}
