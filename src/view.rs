use crate::event::{EventSink, InlineViewLayoutEvent, INLINE_VIEW_LAYOUT_EVENT};
use crate::hit_test::tag_for_touch;
use crate::layout::{place, ContainerBox, Padding, Placement, Quirks, UNLIMITED_LINES};
use crate::line_layout::LineLayout;
use crate::paragraph::{ElementTag, StyledParagraph};
use crate::rect::Rect;
use crate::registry::{apply_placements, ElementRegistry};
use crate::units::{DisplayMetrics, Px};

/// Which layout system positions a view's inline elements
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LayoutOwner {
    /// The text view places its inline elements itself, on every layout
    #[default]
    View,
    /// An external layout system has already placed them; the view must not
    /// touch them
    External,
}

/// Where a view is in its layout cycle
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LayoutState {
    /// Content or bounds changed since the last placement pass
    #[default]
    Unlaid,
    /// The last placement pass matches the current content and bounds
    Placed,
}

/// New content for a text view. Padding only takes effect when all four
/// sides are given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TextUpdate {
    pub paragraph: StyledParagraph,
    pub padding_top: Option<Px>,
    pub padding_right: Option<Px>,
    pub padding_bottom: Option<Px>,
    pub padding_left: Option<Px>,
}

impl TextUpdate {
    pub fn new(paragraph: StyledParagraph) -> TextUpdate {
        TextUpdate {
            paragraph,
            ..Default::default()
        }
    }

    pub fn with_padding(self, padding: Padding) -> TextUpdate {
        TextUpdate {
            padding_top: Some(padding.top),
            padding_right: Some(padding.right),
            padding_bottom: Some(padding.bottom),
            padding_left: Some(padding.left),
            ..self
        }
    }

    /// The padding to apply, rounded down to whole pixels, if every side was set
    pub fn padding(&self) -> Option<Padding> {
        match (
            self.padding_top,
            self.padding_right,
            self.padding_bottom,
            self.padding_left,
        ) {
            (Some(top), Some(right), Some(bottom), Some(left)) => {
                Some(Padding::trbl(top, right, bottom, left).floor())
            }
            _ => None,
        }
    }
}

/// A text view hosting embedded elements.
///
/// The view holds its content and the backend's line layout for that content,
/// and re-places its inline elements whenever it's laid out.
pub struct InlineTextView<L: LineLayout> {
    tag: ElementTag,
    owner: LayoutOwner,
    paragraph: Option<StyledParagraph>,
    layout: Option<L>,
    padding: Padding,
    number_of_lines: usize,
    notify_on_inline_view_layout: bool,
    quirks: Quirks,
    metrics: DisplayMetrics,
    bounds: Option<Rect>,
    state: LayoutState,
}

impl<L: LineLayout> InlineTextView<L> {
    pub fn new(tag: ElementTag) -> InlineTextView<L> {
        InlineTextView {
            tag,
            owner: LayoutOwner::default(),
            paragraph: None,
            layout: None,
            padding: Padding::empty(),
            number_of_lines: UNLIMITED_LINES,
            notify_on_inline_view_layout: false,
            quirks: Quirks::default(),
            metrics: DisplayMetrics::default(),
            bounds: None,
            state: LayoutState::Unlaid,
        }
    }

    pub fn with_owner(mut self, owner: LayoutOwner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn with_display_metrics(mut self, metrics: DisplayMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn paragraph(&self) -> Option<&StyledParagraph> {
        self.paragraph.as_ref()
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn number_of_lines(&self) -> usize {
        self.number_of_lines
    }

    /// Replace the view's content. The current line layout described the old
    /// content, so it's dropped until the backend supplies a new one.
    pub fn set_text(&mut self, update: TextUpdate) {
        if let Some(padding) = update.padding() {
            self.padding = padding;
        }
        self.paragraph = Some(update.paragraph);
        self.layout = None;
        self.state = LayoutState::Unlaid;
    }

    /// Supply the backend's line layout for the current content
    pub fn set_layout(&mut self, layout: L) {
        self.layout = Some(layout);
        self.state = LayoutState::Unlaid;
    }

    pub fn layout(&self) -> Option<&L> {
        self.layout.as_ref()
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.state = LayoutState::Unlaid;
    }

    /// Limit the number of lines shown; 0 lifts the limit
    pub fn set_number_of_lines(&mut self, number_of_lines: usize) {
        self.number_of_lines = if number_of_lines == 0 {
            UNLIMITED_LINES
        } else {
            number_of_lines
        };
        self.state = LayoutState::Unlaid;
    }

    pub fn set_notify_on_inline_view_layout(&mut self, notify: bool) {
        self.notify_on_inline_view_layout = notify;
    }

    /// The view was given new bounds, in its parent's coordinate space.
    /// Places the inline elements; see [InlineTextView::place_inline_views].
    pub fn on_layout<R, S>(
        &mut self,
        bounds: Rect,
        registry: &mut R,
        sink: &mut S,
    ) -> Option<Vec<Placement>>
    where
        R: ElementRegistry + ?Sized,
        S: EventSink + ?Sized,
    {
        if self.bounds != Some(bounds) {
            self.bounds = Some(bounds);
            self.state = LayoutState::Unlaid;
        }
        self.place_inline_views(registry, sink)
    }

    /// Places every inline element in the current bounds and applies the
    /// results to the registry, then notifies `sink` if asked to.
    ///
    /// Returns the placements in text order, or `None` when no pass ran: the
    /// view has no bounds yet, its content has no inline elements, an external
    /// layout system owns placement, the line layout isn't ready, or the
    /// backend failed a query. All of these are retried on the next layout.
    pub fn place_inline_views<R, S>(
        &mut self,
        registry: &mut R,
        sink: &mut S,
    ) -> Option<Vec<Placement>>
    where
        R: ElementRegistry + ?Sized,
        S: EventSink + ?Sized,
    {
        if self.owner == LayoutOwner::External {
            return None;
        }
        let paragraph = self.paragraph.as_ref().filter(|p| p.has_markers())?;
        let bounds = self.bounds?;
        let Some(layout) = self.layout.as_ref() else {
            log::debug!(
                target: "inline_placement",
                "{}: line layout not ready, skipping",
                self.tag
            );
            return None;
        };

        let container = ContainerBox::new(bounds, self.padding);
        let placements = match place(
            paragraph,
            layout,
            &container,
            self.number_of_lines,
            &self.quirks,
        ) {
            Ok(placements) => placements,
            Err(e) => {
                log::error!(
                    target: "inline_placement",
                    "{}: placing inline views failed: {e}",
                    self.tag
                );
                return None;
            }
        };

        let applied = apply_placements(registry, &placements);
        log::debug!(
            target: "inline_placement",
            "{}: placed {applied} of {} inline views",
            self.tag,
            placements.len()
        );

        if self.notify_on_inline_view_layout {
            let event = InlineViewLayoutEvent::from_placements(&placements, &self.metrics);
            match event.to_json() {
                Ok(payload) => sink.receive_event(self.tag, INLINE_VIEW_LAYOUT_EVENT, payload),
                Err(e) => log::error!(
                    target: "inline_placement",
                    "{}: can't serialize {INLINE_VIEW_LAYOUT_EVENT}: {e}",
                    self.tag
                ),
            }
        }

        self.state = LayoutState::Placed;
        Some(placements)
    }

    /// The view that should handle a touch at `(x, y)` in view coordinates
    pub fn tag_for_touch(&self, x: Px, y: Px) -> ElementTag {
        match self.paragraph.as_ref() {
            Some(paragraph) => tag_for_touch(paragraph, self.layout.as_ref(), self.tag, x, y),
            None => self.tag,
        }
    }
}
