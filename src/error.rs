use thiserror::Error;

/// Failures reported by a [LineLayout](crate::LineLayout) backend when a query
/// can't be answered
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("character offset {offset} is outside of the laid out text (length {len})")]
    /// The queried character offset doesn't exist in the laid out text
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("line {line} is outside of the layout ({count} lines)")]
    /// The queried line doesn't exist in the layout
    LineOutOfRange { line: usize, count: usize },

    #[error("text backend failed: {0}")]
    /// The backend failed for a reason of its own
    Backend(String),
}

/// All errors that a placement pass can generate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error(transparent)]
    /// The text backend couldn't answer a geometry query
    Layout(#[from] LayoutError),

    #[error("marker for element {tag} spans [{start}, {end}), past the text's {len} chars")]
    /// A marker points past the end of its paragraph
    MarkerOutOfBounds {
        tag: crate::ElementTag,
        start: usize,
        end: usize,
        len: usize,
    },
}
