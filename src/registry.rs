use std::collections::HashMap;

use crate::layout::{Placement, Visibility};
use crate::paragraph::ElementTag;
use crate::rect::Rect;
use crate::units::Px;
use id_arena::{Arena, Id};

/// A view embedded in text, as seen by whoever draws it
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedElement {
    pub tag: ElementTag,
    /// Intrinsic width, measured before placement
    pub width: Px,
    /// Intrinsic height, measured before placement
    pub height: Px,
    pub visibility: Visibility,
    /// Last frame the element was laid out at. Left alone when the element is
    /// truncated away.
    pub frame: Option<Rect>,
}

impl EmbeddedElement {
    pub fn new(tag: ElementTag, width: Px, height: Px) -> EmbeddedElement {
        EmbeddedElement {
            tag,
            width,
            height,
            visibility: Visibility::Unknown,
            frame: None,
        }
    }

    /// Take on the result of a placement pass
    pub fn apply(&mut self, placement: &Placement) {
        self.visibility = placement.visibility;
        if let Some(frame) = placement.frame {
            self.frame = Some(frame);
        }
    }
}

/// Resolves element tags to the elements a placement pass positions
pub trait ElementRegistry {
    fn resolve_mut(&mut self, tag: ElementTag) -> Option<&mut EmbeddedElement>;
}

/// Apply every placement to its element. Placements whose tag can't be
/// resolved are skipped; returns how many were applied.
pub fn apply_placements<R: ElementRegistry + ?Sized>(
    registry: &mut R,
    placements: &[Placement],
) -> usize {
    let mut applied = 0;
    for placement in placements {
        match registry.resolve_mut(placement.tag) {
            Some(element) => {
                element.apply(placement);
                applied += 1;
            }
            None => log::debug!("no element registered for {}", placement.tag),
        }
    }
    applied
}

/// Element storage keyed by tag. Elements live in an arena so that their ids
/// stay valid for as long as the registry does.
#[derive(Default)]
pub struct Elements {
    pub elements: Arena<EmbeddedElement>,
    by_tag: HashMap<ElementTag, Id<EmbeddedElement>>,
}

impl Elements {
    /// Add an element, returning its id. An element added with a tag that's
    /// already registered replaces the old one in its slot and keeps its id.
    pub fn add(&mut self, element: EmbeddedElement) -> Id<EmbeddedElement> {
        if let Some(id) = self.id_of(element.tag) {
            if let Some(slot) = self.elements.get_mut(id) {
                *slot = element;
                return id;
            }
        }
        let tag = element.tag;
        let id = self.elements.alloc(element);
        self.by_tag.insert(tag, id);
        id
    }

    pub fn id_of(&self, tag: ElementTag) -> Option<Id<EmbeddedElement>> {
        self.by_tag.get(&tag).copied()
    }

    pub fn get(&self, tag: ElementTag) -> Option<&EmbeddedElement> {
        self.id_of(tag).and_then(|id| self.elements.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl ElementRegistry for Elements {
    fn resolve_mut(&mut self, tag: ElementTag) -> Option<&mut EmbeddedElement> {
        let id = self.by_tag.get(&tag).copied()?;
        self.elements.get_mut(id)
    }
}
