//! Read-only access to a host's rendered element tree.

use anyhow::Error;
use skeleton_core::{Rect, StyleSnapshot};

/// Load state of an image element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    /// Intrinsic width of the decoded image, zero until loaded.
    pub natural_width: u32,
    /// Intrinsic height of the decoded image, zero until loaded.
    pub natural_height: u32,
    /// The `src` as resolved against the document base URL.
    pub current_src: String,
}

/// An adapter that abstracts the host's laid-out element tree.
///
/// Implement this for your rendering surface. The measurer only reads
/// through it and never mutates the host tree. Handles are cheap copies
/// identifying one element; non-element nodes are invisible here.
pub trait ElementView {
    type Handle: Copy + Eq;

    /// Parent element, `None` at the document root.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element, skipping non-element nodes.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Child elements in document order.
    fn children(&self, element: Self::Handle) -> Vec<Self::Handle>;

    /// Tag name in ASCII lowercase.
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Returns the attribute value if present.
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;

    /// All attributes as name/value pairs.
    fn attributes(&self, element: Self::Handle) -> Vec<(String, String)>;

    /// Text owned directly by the element, descendants excluded.
    fn own_text(&self, element: Self::Handle) -> String;

    /// Post-layout border box in viewport coordinates.
    ///
    /// # Errors
    /// Returns an error when geometry cannot be read right now.
    fn bounding_box(&self, element: Self::Handle) -> Result<Rect, Error>;

    /// Resolved style of the element.
    ///
    /// # Errors
    /// Returns an error when the style is not available, e.g. mid-layout.
    fn computed_style(&self, element: Self::Handle) -> Result<StyleSnapshot, Error>;

    /// Serialized outer markup of the element and its subtree.
    ///
    /// # Errors
    /// Returns an error when the subtree cannot be serialized.
    fn outer_html(&self, element: Self::Handle) -> Result<String, Error>;

    /// Load state for image elements, `None` for everything else.
    fn image_state(&self, element: Self::Handle) -> Option<ImageState>;

    /// URL of the current document, if the host has one.
    fn location(&self) -> Option<&str> {
        None
    }

    /// Returns Some(id) if the element has an id attribute.
    fn element_id(&self, element: Self::Handle) -> Option<&str> {
        self.attr(element, "id")
    }

    /// True if the element's class list contains `class`.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool {
        self.attr(element, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|token| token == class))
    }
}
