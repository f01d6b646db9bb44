use crate::error::PlacementError;
use crate::layout::{Padding, Quirks};
use crate::line_layout::LineLayout;
use crate::paragraph::{ElementTag, Marker, StyledParagraph};
use crate::rect::Rect;
use crate::units::Px;
use serde::{Deserialize, Serialize};

/// Line count used when a view doesn't limit its number of lines
pub const UNLIMITED_LINES: usize = usize::MAX;

/// Whether an embedded element should be drawn
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    #[serde(rename = "visible")]
    Visible,
    /// Truncated away or clipped by the view's bounds
    #[serde(rename = "gone")]
    Hidden,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Visibility {
    /// The label used for this visibility in layout notifications
    pub fn label(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "gone",
            Visibility::Unknown => "unknown",
        }
    }
}

/// Bounds of the text view that hosts the embedded elements, and the padding
/// between those bounds and the laid out text
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ContainerBox {
    /// The view's bounds in its parent's coordinate space
    pub bounds: Rect,
    pub padding: Padding,
}

impl ContainerBox {
    pub fn new(bounds: Rect, padding: Padding) -> ContainerBox {
        ContainerBox { bounds, padding }
    }

    pub fn width(&self) -> Px {
        self.bounds.width()
    }

    pub fn height(&self) -> Px {
        self.bounds.height()
    }
}

/// Where (and whether) a single embedded element ends up
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub tag: ElementTag,
    /// Position of the element's marker in the paragraph's marker list
    pub index: usize,
    /// Character offset the element is anchored to
    pub offset: usize,
    pub visibility: Visibility,
    /// `None` when the element was truncated away before any geometry was
    /// computed; clipped elements keep the frame they would have had.
    pub frame: Option<Rect>,
}

impl Placement {
    fn truncated(index: usize, marker: &Marker) -> Placement {
        Placement {
            tag: marker.tag,
            index,
            offset: marker.start(),
            visibility: Visibility::Hidden,
            frame: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Computes the visibility and frame of every element embedded in `paragraph`.
///
/// Markers are visited in text order; each result carries the marker's
/// position in the paragraph's marker list and its character offset. Frames are
/// in the same coordinate space as `container.bounds`.
///
/// Nothing is mutated: the caller decides how to apply the results. Any failed
/// oracle query aborts the whole pass, so either every element gets a result
/// or none does.
pub fn place<L: LineLayout + ?Sized>(
    paragraph: &StyledParagraph,
    layout: &L,
    container: &ContainerBox,
    max_lines: usize,
    quirks: &Quirks,
) -> Result<Vec<Placement>, PlacementError> {
    let len = paragraph.len();
    let mut placements = Vec::with_capacity(paragraph.markers().len());

    for (index, marker) in paragraph.markers_in_text_order() {
        if marker.span.start > len || marker.span.end > len {
            return Err(PlacementError::MarkerOutOfBounds {
                tag: marker.tag,
                start: marker.span.start,
                end: marker.span.end,
                len,
            });
        }

        let start = marker.start();
        let line = layout.line_for_offset(start)?;

        // check truncation before anything else; horizontal queries on
        // truncated characters are exactly the ones backends choke on
        if is_truncated(layout, start, line, max_lines, quirks)? {
            log::trace!(
                "element {} at offset {start} truncated on line {line}",
                marker.tag
            );
            placements.push(Placement::truncated(index, marker));
            continue;
        }

        let rtl_char = layout.is_rtl_char_at(start)?;
        let x = horizontal_position(
            paragraph,
            layout,
            marker,
            line,
            rtl_char,
            container.width(),
            quirks,
        )?;

        let left = x + container.padding.leading(rtl_char);
        // elements sit on the baseline
        let top = container.padding.top + layout.line_baseline(line)?.trunc() - marker.height;

        let clipped = container.width() <= left || container.height() <= top;
        let visibility = if clipped {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };

        let frame = Rect::from_origin_size(
            container.bounds.left + left,
            container.bounds.top + top,
            marker.width,
            marker.height,
        );
        log::trace!(
            "element {} at offset {start} on line {line}: {} {:?}",
            marker.tag,
            visibility.label(),
            frame
        );

        placements.push(Placement {
            tag: marker.tag,
            index,
            offset: start,
            visibility,
            frame: Some(frame),
        });
    }

    Ok(placements)
}

/// The three truncation checks. Each covers a different way backends report
/// (or fail to report) truncation, and none of them is reliable everywhere,
/// so an element is truncated if any enabled check says so.
fn is_truncated<L: LineLayout + ?Sized>(
    layout: &L,
    start: usize,
    line: usize,
    max_lines: usize,
    quirks: &Quirks,
) -> Result<bool, PlacementError> {
    if quirks.ellipsis_truncation
        && layout.ellipsis_count(line)? > 0
        && start >= layout.line_start(line)? + layout.ellipsis_start(line)?
    {
        return Ok(true);
    }

    if quirks.max_lines_truncation && line >= max_lines {
        return Ok(true);
    }

    if quirks.line_end_truncation && start >= layout.line_end(line)? {
        return Ok(true);
    }

    Ok(false)
}

/// Horizontal position of an element relative to the text's left edge, before
/// padding is applied
fn horizontal_position<L: LineLayout + ?Sized>(
    paragraph: &StyledParagraph,
    layout: &L,
    marker: &Marker,
    line: usize,
    rtl_char: bool,
    container_width: Px,
    quirks: &Quirks,
) -> Result<Px, PlacementError> {
    let start = marker.start();
    let rtl_paragraph = layout.paragraph_direction(line)?.is_rtl();

    if quirks.final_offset_workaround && start + 1 == paragraph.len() {
        let line_end = layout.line_end(line)?;
        let ends_with_newline = line_end > 0 && paragraph.char_at(line_end - 1) == Some('\n');
        let extent = if ends_with_newline {
            layout.line_max(line)?
        } else {
            layout.line_width(line)?
        };

        return Ok(if rtl_paragraph {
            container_width - extent.trunc()
        } else {
            layout.line_right(line)?.trunc() - marker.width
        });
    }

    // a character running against its paragraph (an LTR run inside RTL text,
    // say) is only positioned correctly by the secondary query
    let x = if rtl_char == rtl_paragraph {
        layout.primary_horizontal(start)?
    } else {
        layout.secondary_horizontal(start)?
    }
    .trunc();

    let x = if rtl_paragraph {
        let line_right = layout.line_right(line)?.trunc();
        quirks.correct_rtl_bias(x, rtl_paragraph, container_width, line_right)
    } else {
        x
    };

    // right-to-left characters are anchored by their right edge
    Ok(if rtl_char { x - marker.width } else { x })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::line_layout::Direction;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Clone)]
    struct FakeLine {
        start: usize,
        end: usize,
        ellipsis_start: usize,
        ellipsis_count: usize,
        direction: Direction,
        baseline: Px,
        right: Px,
        width: Px,
        max: Px,
    }

    impl FakeLine {
        fn ltr(start: usize, end: usize, baseline: f32, right: f32) -> FakeLine {
            FakeLine {
                start,
                end,
                ellipsis_start: 0,
                ellipsis_count: 0,
                direction: Direction::Ltr,
                baseline: Px(baseline),
                right: Px(right),
                width: Px(right),
                max: Px(right),
            }
        }
    }

    #[derive(Default)]
    struct FakeLayout {
        lines: Vec<FakeLine>,
        rtl_chars: Vec<usize>,
        primary: HashMap<usize, Px>,
        secondary: HashMap<usize, Px>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeLayout {
        fn line(&self, line: usize) -> Result<&FakeLine, LayoutError> {
            self.lines.get(line).ok_or(LayoutError::LineOutOfRange {
                line,
                count: self.lines.len(),
            })
        }

        fn called(&self, query: &str) -> bool {
            self.calls.borrow().iter().any(|c| *c == query)
        }
    }

    impl LineLayout for FakeLayout {
        fn line_count(&self) -> usize {
            self.lines.len()
        }
        fn line_for_offset(&self, offset: usize) -> Result<usize, LayoutError> {
            Ok(self
                .lines
                .iter()
                .position(|l| offset >= l.start && offset < l.end)
                .unwrap_or(self.lines.len().saturating_sub(1)))
        }
        fn line_for_vertical(&self, _y: Px) -> Result<usize, LayoutError> {
            Ok(0)
        }
        fn line_start(&self, line: usize) -> Result<usize, LayoutError> {
            Ok(self.line(line)?.start)
        }
        fn line_end(&self, line: usize) -> Result<usize, LayoutError> {
            Ok(self.line(line)?.end)
        }
        fn ellipsis_count(&self, line: usize) -> Result<usize, LayoutError> {
            Ok(self.line(line)?.ellipsis_count)
        }
        fn ellipsis_start(&self, line: usize) -> Result<usize, LayoutError> {
            Ok(self.line(line)?.ellipsis_start)
        }
        fn paragraph_direction(&self, line: usize) -> Result<Direction, LayoutError> {
            Ok(self.line(line)?.direction)
        }
        fn is_rtl_char_at(&self, offset: usize) -> Result<bool, LayoutError> {
            Ok(self.rtl_chars.contains(&offset))
        }
        fn line_baseline(&self, line: usize) -> Result<Px, LayoutError> {
            Ok(self.line(line)?.baseline)
        }
        fn primary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
            self.calls.borrow_mut().push("primary");
            self.primary
                .get(&offset)
                .copied()
                .ok_or(LayoutError::OffsetOutOfRange { offset, len: 0 })
        }
        fn secondary_horizontal(&self, offset: usize) -> Result<Px, LayoutError> {
            self.calls.borrow_mut().push("secondary");
            self.secondary
                .get(&offset)
                .copied()
                .ok_or(LayoutError::OffsetOutOfRange { offset, len: 0 })
        }
        fn line_left(&self, line: usize) -> Result<Px, LayoutError> {
            let l = self.line(line)?;
            Ok(l.right - l.width)
        }
        fn line_right(&self, line: usize) -> Result<Px, LayoutError> {
            Ok(self.line(line)?.right)
        }
        fn line_width(&self, line: usize) -> Result<Px, LayoutError> {
            self.calls.borrow_mut().push("width");
            Ok(self.line(line)?.width)
        }
        fn line_max(&self, line: usize) -> Result<Px, LayoutError> {
            self.calls.borrow_mut().push("max");
            Ok(self.line(line)?.max)
        }
        fn offset_for_horizontal(&self, line: usize, _x: Px) -> Result<usize, LayoutError> {
            Ok(self.line(line)?.start)
        }
    }

    fn container(width: f32, height: f32) -> ContainerBox {
        ContainerBox::new(
            Rect::new(Px(0.0), Px(0.0), Px(width), Px(height)),
            Padding::empty(),
        )
    }

    fn element(tag: i32, at: usize, width: f32, height: f32) -> Marker {
        Marker::new(ElementTag(tag), at..at + 1, Px(width), Px(height))
    }

    /// Places with every quirk on, in a `width` by 50 box at the origin
    fn place_in(
        paragraph: &StyledParagraph,
        layout: &FakeLayout,
        width: f32,
        max_lines: usize,
    ) -> Result<Vec<Placement>, PlacementError> {
        let bounds = container(width, 50.0);
        place(paragraph, layout, &bounds, max_lines, &Quirks::default())
    }

    #[test]
    fn element_sits_on_baseline_after_preceding_text() {
        let paragraph =
            StyledParagraph::new("Hello\u{FFFC} world").with_marker(element(1, 5, 20.0, 10.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 12, 16.0, 120.0)],
            ..Default::default()
        };
        layout.primary.insert(5, Px(40.0));

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");

        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert_eq!(p.visibility, Visibility::Visible);
        assert_eq!(
            p.frame,
            Some(Rect::new(Px(40.0), Px(6.0), Px(60.0), Px(16.0)))
        );
        assert!(!layout.called("secondary"));
    }

    #[test]
    fn element_beyond_max_lines_is_hidden() {
        let paragraph =
            StyledParagraph::new("first\nsec\u{FFFC}nd").with_marker(element(1, 9, 20.0, 10.0));
        let layout = FakeLayout {
            lines: vec![
                FakeLine::ltr(0, 6, 16.0, 50.0),
                FakeLine::ltr(6, 12, 36.0, 60.0),
            ],
            ..Default::default()
        };

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");

        assert_eq!(placements[0].visibility, Visibility::Hidden);
        assert_eq!(placements[0].frame, None);
        assert!(!layout.called("primary"));
    }

    #[test]
    fn element_past_ellipsis_is_hidden() {
        let paragraph = StyledParagraph::new("a long line\u{FFFC} here")
            .with_marker(element(1, 11, 20.0, 10.0));
        let mut line = FakeLine::ltr(0, 17, 16.0, 100.0);
        line.ellipsis_start = 9;
        line.ellipsis_count = 8;
        let layout = FakeLayout {
            lines: vec![line],
            ..Default::default()
        };

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");
        assert_eq!(placements[0].visibility, Visibility::Hidden);
        assert_eq!(placements[0].frame, None);
    }

    #[test]
    fn element_at_line_end_is_hidden() {
        let paragraph = StyledParagraph::new("abc\u{FFFC}def").with_marker(element(1, 3, 5.0, 5.0));
        // the backend reports the line as ending on the first truncated char
        let layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 3, 16.0, 30.0)],
            ..Default::default()
        };

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");
        assert_eq!(placements[0].visibility, Visibility::Hidden);
    }

    #[test]
    fn disabled_truncation_checks_do_not_hide() {
        let paragraph = StyledParagraph::new("abc\u{FFFC}def").with_marker(element(1, 3, 5.0, 5.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 3, 16.0, 30.0)],
            ..Default::default()
        };
        layout.primary.insert(3, Px(30.0));

        let quirks = Quirks::none();
        let placements =
            place(&paragraph, &layout, &container(200.0, 50.0), 1, &quirks).expect("can place");
        assert_eq!(placements[0].visibility, Visibility::Visible);
    }

    #[test]
    fn final_offset_uses_line_extents() {
        let paragraph = StyledParagraph::new("abc\u{FFFC}").with_marker(element(1, 3, 10.0, 10.0));
        // primary_horizontal would fail if queried
        let layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 4, 16.0, 44.0)],
            ..Default::default()
        };

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");
        assert_eq!(placements[0].frame.map(|f| f.left), Some(Px(34.0)));
        assert!(!layout.called("primary"));
        assert!(!layout.called("secondary"));
    }

    #[test]
    fn final_offset_rtl_after_newline_uses_line_max() {
        // the element is the last char and its line ends with a newline
        let paragraph =
            StyledParagraph::new("שלום\n\u{FFFC}\n").with_marker(element(1, 6, 10.0, 10.0));
        let mut second = FakeLine::ltr(0, 7, 16.0, 200.0);
        second.direction = Direction::Rtl;
        second.width = Px(0.0);
        second.max = Px(30.0);
        let mut first = FakeLine::ltr(0, 5, 16.0, 200.0);
        first.direction = Direction::Rtl;
        second.start = 5;
        let layout = FakeLayout {
            lines: vec![first, second],
            rtl_chars: vec![0, 1, 2, 3],
            ..Default::default()
        };

        let placements = place_in(&paragraph, &layout, 200.0, UNLIMITED_LINES).expect("can place");
        assert_eq!(placements[0].frame.map(|f| f.left), Some(Px(170.0)));
        assert!(layout.called("max"));
        assert!(!layout.called("width"));
        assert!(!layout.called("primary"));
    }

    #[test]
    fn ltr_element_in_rtl_paragraph_uses_secondary() {
        let paragraph =
            StyledParagraph::new("שלום\u{FFFC}עולם").with_marker(element(1, 4, 10.0, 10.0));
        let mut line = FakeLine::ltr(0, 9, 16.0, 180.0);
        line.direction = Direction::Rtl;
        let mut layout = FakeLayout {
            lines: vec![line],
            rtl_chars: vec![0, 1, 2, 3, 5, 6, 7, 8],
            ..Default::default()
        };
        layout.primary.insert(4, Px(999.0));
        layout.secondary.insert(4, Px(120.0));

        let placements = place_in(&paragraph, &layout, 200.0, UNLIMITED_LINES).expect("can place");
        // 200 - (180 - 120)
        assert_eq!(placements[0].frame.map(|f| f.left), Some(Px(140.0)));
        assert!(!layout.called("primary"));
    }

    #[test]
    fn rtl_element_is_anchored_by_right_edge() {
        let paragraph =
            StyledParagraph::new("שלום\u{FFFC}עולם").with_marker(element(1, 4, 10.0, 10.0));
        let mut line = FakeLine::ltr(0, 9, 16.0, 200.0);
        line.direction = Direction::Rtl;
        let mut layout = FakeLayout {
            lines: vec![line],
            rtl_chars: (0..9).collect(),
            ..Default::default()
        };
        layout.primary.insert(4, Px(150.0));
        let container = ContainerBox::new(
            Rect::new(Px(0.0), Px(0.0), Px(200.0), Px(50.0)),
            Padding::trbl(Px(2.0), Px(3.0), Px(0.0), Px(7.0)),
        );

        let quirks = Quirks::default();
        let placements =
            place(&paragraph, &layout, &container, UNLIMITED_LINES, &quirks).expect("can place");
        // 200 - (200 - 150) - 10 + right padding
        assert_eq!(
            placements[0].frame,
            Some(Rect::new(Px(143.0), Px(8.0), Px(153.0), Px(18.0)))
        );
    }

    #[test]
    fn clipped_element_keeps_frame() {
        let paragraph =
            StyledParagraph::new("abcdef\u{FFFC}gh").with_marker(element(1, 6, 10.0, 10.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 9, 16.0, 90.0)],
            ..Default::default()
        };
        layout.primary.insert(6, Px(60.0));

        let placements = place_in(&paragraph, &layout, 50.0, 1).expect("can place");
        assert_eq!(placements[0].visibility, Visibility::Hidden);
        assert_eq!(placements[0].frame.map(|f| f.left), Some(Px(60.0)));
    }

    #[test]
    fn frames_are_offset_by_container_origin() {
        let paragraph = StyledParagraph::new("ab\u{FFFC}cd").with_marker(element(1, 2, 4.0, 4.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 5, 12.0, 50.0)],
            ..Default::default()
        };
        layout.primary.insert(2, Px(20.7));
        let container = ContainerBox::new(
            Rect::new(Px(100.0), Px(40.0), Px(300.0), Px(90.0)),
            Padding::all(Px(5.0)),
        );

        let placements =
            place(&paragraph, &layout, &container, 1, &Quirks::default()).expect("can place");
        assert_eq!(
            placements[0].frame,
            Some(Rect::new(Px(125.0), Px(53.0), Px(129.0), Px(57.0)))
        );
    }

    #[test]
    fn failed_query_aborts_the_pass() {
        let paragraph = StyledParagraph::new("a\u{FFFC}b\u{FFFC}c")
            .with_marker(element(1, 1, 4.0, 4.0))
            .with_marker(element(2, 3, 4.0, 4.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 5, 12.0, 50.0)],
            ..Default::default()
        };
        layout.primary.insert(1, Px(10.0));

        let result = place_in(&paragraph, &layout, 200.0, 1);
        let missing = LayoutError::OffsetOutOfRange { offset: 3, len: 0 };
        assert_eq!(result, Err(PlacementError::Layout(missing)));
    }

    #[test]
    fn marker_past_text_is_rejected() {
        let paragraph = StyledParagraph::new("ab").with_marker(element(1, 2, 4.0, 4.0));
        let layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 2, 12.0, 20.0)],
            ..Default::default()
        };
        let result = place_in(&paragraph, &layout, 200.0, 1);
        assert!(matches!(
            result,
            Err(PlacementError::MarkerOutOfBounds { start: 2, end: 3, .. })
        ));
    }

    #[test]
    fn results_carry_marker_position_in_text_order() {
        let paragraph = StyledParagraph::new("a\u{FFFC}b\u{FFFC}c")
            .with_marker(element(1, 3, 4.0, 4.0))
            .with_marker(element(2, 1, 4.0, 4.0));
        let mut layout = FakeLayout {
            lines: vec![FakeLine::ltr(0, 5, 12.0, 50.0)],
            ..Default::default()
        };
        layout.primary.insert(1, Px(10.0));
        layout.primary.insert(3, Px(30.0));

        let placements = place_in(&paragraph, &layout, 200.0, 1).expect("can place");
        let order: Vec<(usize, usize)> = placements.iter().map(|p| (p.index, p.offset)).collect();
        assert_eq!(order, vec![(1, 1), (0, 3)]);
    }
}
