//! Element identity and geometry
//!
//! The motion core never touches rendered nodes. The renderer mounts each
//! content item under a stable `ItemKey` and reports its document-space
//! bounds; everything downstream looks elements up by key.

use indexmap::IndexMap;
use std::fmt;

/// Stable logical identifier of a rendered content item
///
/// Keys survive re-renders and filter changes, e.g. `portfolio/mcc-logo`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key scoped under a section, `section/item`
    pub fn scoped(section: &str, item: &str) -> Self {
        Self(format!("{section}/{item}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Document-space vertical extent of a mounted element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    pub top: f32,
    pub height: f32,
}

impl ElementBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// The visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Document offset of the viewport's top edge
    pub scroll_y: f32,
    /// Viewport height
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_y: f32, height: f32) -> Self {
        Self {
            scroll_y,
            height: height.max(0.0),
        }
    }

    /// Document position of the line `fraction` of the way down the viewport
    pub fn line_at(&self, fraction: f32) -> f32 {
        self.scroll_y + self.height * fraction
    }
}

/// Resolves keys to the bounds of currently mounted elements
///
/// `None` means the element is detached (never rendered or since removed).
pub trait ElementLookup {
    fn bounds(&self, key: &ItemKey) -> Option<ElementBounds>;

    fn is_mounted(&self, key: &ItemKey) -> bool {
        self.bounds(key).is_some()
    }
}

/// Mounted element table kept in mount order
#[derive(Clone, Debug, Default)]
pub struct MountedElements {
    elements: IndexMap<ItemKey, ElementBounds>,
}

impl MountedElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount or move an element
    pub fn mount(&mut self, key: ItemKey, bounds: ElementBounds) {
        self.elements.insert(key, bounds);
    }

    /// Remove an element; returns its last bounds if it was mounted
    pub fn unmount(&mut self, key: &ItemKey) -> Option<ElementBounds> {
        self.elements.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, &ElementBounds)> {
        self.elements.iter()
    }
}

impl ElementLookup for MountedElements {
    fn bounds(&self, key: &ItemKey) -> Option<ElementBounds> {
        self.elements.get(key).copied()
    }
}
