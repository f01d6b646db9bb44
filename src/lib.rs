//! Placement of views embedded in laid out text.
//!
//! Text views often host non-text children: inline images, badges, whole
//! views anchored to a placeholder character. Once the text has been broken
//! into lines, each child needs to know whether it is still visible (or was
//! truncated behind an ellipsis) and exactly where it sits, in both
//! left-to-right and right-to-left text.
//!
//! The crate doesn't shape text itself. It asks a [LineLayout] backend for
//! line geometry, and ships [MonospaceLayout] as a simple backend of its own.

mod error;
pub use error::*;

mod event;
pub use event::*;

pub use hit_test::*;

/// Placement of embedded elements and the policies that drive it
pub mod layout;

mod line_layout;
pub use line_layout::*;

mod monospace;
pub use monospace::*;

mod paragraph;
pub use paragraph::*;

mod rect;
pub use rect::*;

mod registry;
pub use registry::*;

mod units;
pub use units::*;

mod view;
pub use view::*;
