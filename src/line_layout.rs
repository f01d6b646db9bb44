//! The text-layout oracle consumed by placement and hit-testing.
//!
//! Text is shaped and broken into lines by a platform backend; this crate only
//! asks it questions. [LineLayout] mirrors the queries a typical paragraph
//! layout engine answers. Every line or offset query may fail, since backends
//! are known to reject (or worse) queries at offsets they consider invalid.

use crate::error::LayoutError;
use crate::units::Px;
use serde::{Deserialize, Serialize};

/// Dominant reading direction of a paragraph, or of a single character
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

/// Line geometry of a laid out paragraph.
///
/// Offsets are character offsets into the paragraph, lines are 0-based.
/// Horizontal values are relative to the layout's left edge (before padding),
/// vertical values relative to its top edge.
pub trait LineLayout {
    /// Number of lines in the layout
    fn line_count(&self) -> usize;

    /// The line containing the character at `offset`
    fn line_for_offset(&self, offset: usize) -> Result<usize, LayoutError>;

    /// The line at vertical position `y`, clamped to the first and last lines
    fn line_for_vertical(&self, y: Px) -> Result<usize, LayoutError>;

    /// Offset of the first character on `line`
    fn line_start(&self, line: usize) -> Result<usize, LayoutError>;

    /// Offset just past the last character on `line`
    fn line_end(&self, line: usize) -> Result<usize, LayoutError>;

    /// Number of characters hidden behind an ellipsis on `line`, 0 if none
    fn ellipsis_count(&self, line: usize) -> Result<usize, LayoutError>;

    /// Where the ellipsis starts on `line`, relative to [LineLayout::line_start]
    fn ellipsis_start(&self, line: usize) -> Result<usize, LayoutError>;

    fn paragraph_direction(&self, line: usize) -> Result<Direction, LayoutError>;

    /// Whether the character at `offset` resolves to right-to-left
    fn is_rtl_char_at(&self, offset: usize) -> Result<bool, LayoutError>;

    /// Distance from the top of the layout to the baseline of `line`
    fn line_baseline(&self, line: usize) -> Result<Px, LayoutError>;

    /// Horizontal position of `offset` when inserting text in the paragraph's
    /// direction
    fn primary_horizontal(&self, offset: usize) -> Result<Px, LayoutError>;

    /// Horizontal position of `offset` when inserting text against the
    /// paragraph's direction
    fn secondary_horizontal(&self, offset: usize) -> Result<Px, LayoutError>;

    fn line_left(&self, line: usize) -> Result<Px, LayoutError>;

    fn line_right(&self, line: usize) -> Result<Px, LayoutError>;

    /// Width of the visible text on `line`, without trailing whitespace
    fn line_width(&self, line: usize) -> Result<Px, LayoutError>;

    /// Extent of `line` including trailing whitespace
    fn line_max(&self, line: usize) -> Result<Px, LayoutError>;

    /// The character offset on `line` closest to horizontal position `x`
    fn offset_for_horizontal(&self, line: usize, x: Px) -> Result<usize, LayoutError>;
}

impl<L: LineLayout + ?Sized> LineLayout for &L {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }
    fn line_for_offset(&self, offset: usize) -> Result<usize, LayoutError> {
        (**self).line_for_offset(offset)
    }
    fn line_for_vertical(&self, y: Px) -> Result<usize, LayoutError> {
        (**self).line_for_vertical(y)
    }
    fn line_start(&self, line: usize) -> Result<usize, LayoutError> {
        (**self).line_start(line)
    }
    fn line_end(&self, line: usize) -> Result<usize, LayoutError> {
        (**self).line_end(line)
    }
    fn ellipsis_count(&self, line: usize) -> Result<usize, LayoutError> {
        (**self).ellipsis_count(line)
    }
    fn ellipsis_start(&self, line: usize) -> Result<usize, LayoutError> {
        (**self).ellipsis_start(line)
    }
    fn paragraph_direction(&self, line: usize) -> Result<Direction, LayoutError> {
        (**self).paragraph_direction(line)
    }
    fn is_rtl_char_at(&self, offset: usize) -> Result<bool, LayoutError> {
        (**self).is_rtl_char_at(offset)
    }
    fn line_baseline(&self, line: usize) -> Result<Px, LayoutError> {
        (**self).line_baseline(line)
    }
    fn primary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
        (**self).primary_horizontal(offset)
    }
    fn secondary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
        (**self).secondary_horizontal(offset)
    }
    fn line_left(&self, line: usize) -> Result<Px, LayoutError> {
        (**self).line_left(line)
    }
    fn line_right(&self, line: usize) -> Result<Px, LayoutError> {
        (**self).line_right(line)
    }
    fn line_width(&self, line: usize) -> Result<Px, LayoutError> {
        (**self).line_width(line)
    }
    fn line_max(&self, line: usize) -> Result<Px, LayoutError> {
        (**self).line_max(line)
    }
    fn offset_for_horizontal(&self, line: usize, x: Px) -> Result<usize, LayoutError> {
        (**self).offset_for_horizontal(line, x)
    }
}
