use std::ops::Range;

use crate::units::Px;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a view: either an embedded element or the text view itself
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("#{_0}")]
pub struct ElementTag(pub i32);

/// A placeholder anchoring an embedded element to a span of the text. The span
/// is usually a single replacement character the element is drawn over.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub tag: ElementTag,
    /// Character offsets, `[start, end)`
    pub span: Range<usize>,
    /// Intrinsic width of the element, measured before placement
    pub width: Px,
    /// Intrinsic height of the element, measured before placement
    pub height: Px,
}

impl Marker {
    pub fn new(tag: ElementTag, span: Range<usize>, width: Px, height: Px) -> Marker {
        Marker {
            tag,
            span,
            width,
            height,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }
}

/// A span of text that resolves touches to a particular view, such as a
/// nested, pressable run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedSpan {
    pub tag: ElementTag,
    pub span: Range<usize>,
}

/// Text plus the markers and tagged spans attached to it.
///
/// All offsets are character (`char`) offsets, not byte offsets.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyledParagraph {
    text: String,
    chars: Vec<char>,
    markers: Vec<Marker>,
    tagged_spans: Vec<TaggedSpan>,
}

impl StyledParagraph {
    pub fn new<S: Into<String>>(text: S) -> StyledParagraph {
        let text: String = text.into();
        let chars = text.chars().collect();
        StyledParagraph {
            text,
            chars,
            markers: Vec::new(),
            tagged_spans: Vec::new(),
        }
    }

    /// Attach an embedded element, builder style
    pub fn with_marker(mut self, marker: Marker) -> StyledParagraph {
        self.push_marker(marker);
        self
    }

    /// Attach a tagged span, builder style
    pub fn with_tagged_span(mut self, tag: ElementTag, span: Range<usize>) -> StyledParagraph {
        self.tagged_spans.push(TaggedSpan { tag, span });
        self
    }

    /// Attach an embedded element. Markers keep the order they were pushed in;
    /// that order is the element's sequence index.
    pub fn push_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the paragraph
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn has_markers(&self) -> bool {
        !self.markers.is_empty()
    }

    pub fn tagged_spans(&self) -> &[TaggedSpan] {
        &self.tagged_spans
    }

    /// Markers in paragraph order (by start offset, then by insertion order),
    /// paired with their sequence index
    pub fn markers_in_text_order(&self) -> Vec<(usize, &Marker)> {
        let mut ordered: Vec<(usize, &Marker)> = self.markers.iter().enumerate().collect();
        // stable, so markers sharing a start keep insertion order
        ordered.sort_by_key(|(_, m)| m.start());
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_count_chars_not_bytes() {
        let p = StyledParagraph::new("héllo שלום");
        assert_eq!(p.len(), 10);
        assert_eq!(p.char_at(1), Some('é'));
        assert_eq!(p.char_at(6), Some('ש'));
        assert_eq!(p.char_at(10), None);
    }

    #[test]
    fn text_order_is_stable() {
        let p = StyledParagraph::new("a\u{FFFC}b\u{FFFC}c")
            .with_marker(Marker::new(ElementTag(7), 3..4, Px(1.0), Px(1.0)))
            .with_marker(Marker::new(ElementTag(8), 1..2, Px(1.0), Px(1.0)))
            .with_marker(Marker::new(ElementTag(9), 1..2, Px(1.0), Px(1.0)));

        let order: Vec<(usize, ElementTag)> = p
            .markers_in_text_order()
            .into_iter()
            .map(|(i, m)| (i, m.tag))
            .collect();
        assert_eq!(
            order,
            vec![(1, ElementTag(8)), (2, ElementTag(9)), (0, ElementTag(7))]
        );
    }
}
