use crate::units::*;

/// A rectangle, specified by its four edges in a top-left origin coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub left: Px,
    /// The y-coordinate of the top edge.
    pub top: Px,
    /// The x-coordinate of the right edge.
    pub right: Px,
    /// The y-coordinate of the bottom edge.
    pub bottom: Px,
}

impl Rect {
    pub fn new(left: Px, top: Px, right: Px, bottom: Px) -> Rect {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from its top-left corner and its size
    pub fn from_origin_size(left: Px, top: Px, width: Px, height: Px) -> Rect {
        Rect {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> Px {
        self.right - self.left
    }

    pub fn height(&self) -> Px {
        self.bottom - self.top
    }

    /// Convert every edge to device-independent units
    pub fn to_dip(&self, metrics: &DisplayMetrics) -> DipRect {
        DipRect {
            left: metrics.to_dip(self.left),
            top: metrics.to_dip(self.top),
            right: metrics.to_dip(self.right),
            bottom: metrics.to_dip(self.bottom),
        }
    }
}

/// The same as [Rect], in device-independent units.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DipRect {
    pub left: Dip,
    pub top: Dip,
    pub right: Dip,
    pub bottom: Dip,
}

impl From<(Px, Px, Px, Px)> for Rect {
    fn from(r: (Px, Px, Px, Px)) -> Self {
        Rect {
            left: r.0,
            top: r.1,
            right: r.2,
            bottom: r.3,
        }
    }
}

impl From<Rect> for (Px, Px, Px, Px) {
    fn from(r: Rect) -> Self {
        (r.left, r.top, r.right, r.bottom)
    }
}
