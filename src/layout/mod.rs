//! Placement of embedded elements within laid out text.
//!
//! Given a [StyledParagraph](crate::StyledParagraph) whose markers anchor
//! embedded elements (inline views, images) to characters, and a
//! [LineLayout](crate::LineLayout) describing how that text was broken into
//! lines, [place] works out whether each element is visible and where it goes.
//!
//! Text backends disagree on how truncation and right-to-left geometry are
//! reported. Those differences are handled by [Quirks], which keeps the
//! workarounds out of the placement math.
//!
//! # Example
//!
//! ```
//! use inline_placement::layout::{place, ContainerBox, Padding, Quirks, Visibility};
//! use inline_placement::{ElementTag, Marker, MonospaceLayout, MonospaceMetrics};
//! use inline_placement::{Px, Rect, StyledParagraph};
//!
//! let paragraph = StyledParagraph::new("Hello\u{FFFC} world")
//!     .with_marker(Marker::new(ElementTag(12), 5..6, Px(20.0), Px(10.0)));
//! let metrics = MonospaceMetrics::new(Px(10.0), Px(200.0));
//! let layout = MonospaceLayout::new(paragraph.text(), metrics);
//! let bounds = Rect::new(Px(0.0), Px(0.0), Px(200.0), Px(40.0));
//! let container = ContainerBox::new(bounds, Padding::empty());
//!
//! let placements = place(&paragraph, &layout, &container, 1, &Quirks::default())
//!     .expect("layout can answer every query");
//! assert_eq!(placements[0].visibility, Visibility::Visible);
//! assert_eq!(placements[0].frame.map(|f| f.left), Some(Px(50.0)));
//! ```

mod padding;
mod placement;
mod quirks;

pub use padding::*;
pub use placement::*;
pub use quirks::*;
