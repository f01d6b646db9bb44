//! Notifications sent after inline elements have been placed.

use crate::layout::{Placement, Visibility};
use crate::paragraph::ElementTag;
use crate::units::{Dip, DisplayMetrics};
use serde::{Deserialize, Serialize};

/// Name of the event emitted after every placement pass of a view that asked
/// to be notified
pub const INLINE_VIEW_LAYOUT_EVENT: &str = "topInlineViewLayout";

/// Receives events emitted by text views
pub trait EventSink {
    fn receive_event(&mut self, target: ElementTag, name: &str, payload: serde_json::Value);
}

/// One placed element. Edges are only present for visible elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineViewInfo {
    pub visibility: Visibility,
    /// Character offset of the element's placeholder in the text
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub left: Option<Dip>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub top: Option<Dip>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right: Option<Dip>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bottom: Option<Dip>,
}

impl InlineViewInfo {
    pub fn from_placement(placement: &Placement, metrics: &DisplayMetrics) -> InlineViewInfo {
        let edges = match (placement.visibility, placement.frame) {
            (Visibility::Visible, Some(frame)) => Some(frame.to_dip(metrics)),
            _ => None,
        };

        InlineViewInfo {
            visibility: placement.visibility,
            index: placement.offset,
            left: edges.map(|e| e.left),
            top: edges.map(|e| e.top),
            right: edges.map(|e| e.right),
            bottom: edges.map(|e| e.bottom),
        }
    }
}

/// Payload of [INLINE_VIEW_LAYOUT_EVENT]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineViewLayoutEvent {
    pub inline_views: Vec<InlineViewInfo>,
}

impl InlineViewLayoutEvent {
    /// Build the event for a placement pass. Entries are ordered by their
    /// placeholder's character offset; elements sharing an offset keep the
    /// order they were placed in.
    pub fn from_placements(placements: &[Placement], metrics: &DisplayMetrics) -> Self {
        let mut inline_views: Vec<InlineViewInfo> = placements
            .iter()
            .map(|p| InlineViewInfo::from_placement(p, metrics))
            .collect();
        inline_views.sort_by_key(|info| info.index);
        InlineViewLayoutEvent { inline_views }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// An [EventSink] that keeps every event it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<(ElementTag, String, serde_json::Value)>,
}

impl EventSink for RecordingSink {
    fn receive_event(&mut self, target: ElementTag, name: &str, payload: serde_json::Value) {
        self.events.push((target, name.to_string(), payload));
    }
}
