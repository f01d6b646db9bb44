use crate::units::Px;

/// Padding between the edges of a text view and the laid out text. Placement
/// offsets every inline element by it: the left padding for left-to-right
/// characters, the right padding for right-to-left ones, and always the top.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Padding {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS padding)
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Padding {
        Padding {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create padding where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Padding {
        let value: Px = value.into();
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create padding where all values are 0.0
    pub fn empty() -> Padding {
        Padding::all(Px(0.0))
    }

    /// Round every component down to whole pixels
    pub fn floor(&self) -> Padding {
        Padding {
            top: self.top.floor(),
            right: self.right.floor(),
            bottom: self.bottom.floor(),
            left: self.left.floor(),
        }
    }

    /// The padding applied on the leading side of a character, depending on
    /// whether that character reads:
    /// * _left-to-right_ => left
    /// * _right-to-left_ => right
    pub fn leading(&self, rtl: bool) -> Px {
        if rtl {
            self.right
        } else {
            self.left
        }
    }
}
