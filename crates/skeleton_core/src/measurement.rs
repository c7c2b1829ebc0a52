//! Immutable per-element measurement tree.

use crate::geometry::Rect;
use crate::style::StyleSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One visited element: geometry, resolved style, content and children.
///
/// Built once by a measurement pass and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementNode {
    /// Effective box. Differs from the raw layout box for unloaded images.
    pub rect: Rect,
    pub style: StyleSnapshot,
    /// Element kind in ASCII lowercase (`div`, `img`, `td`, ...).
    pub tag: String,
    /// Trimmed text owned directly by the element, descendants excluded.
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MeasurementNode>,
    /// Serialized outer markup for escape-hatch subtrees. Such nodes never
    /// have children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough_markup: Option<String>,
}

impl MeasurementNode {
    /// A plain measured element with no children yet.
    pub fn new(tag: &str, rect: Rect, style: StyleSnapshot) -> Self {
        Self {
            rect,
            style,
            tag: tag.to_ascii_lowercase(),
            text: String::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            passthrough_markup: None,
        }
    }

    #[inline]
    pub const fn is_passthrough(&self) -> bool {
        self.passthrough_markup.is_some()
    }

    #[inline]
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::subtree_len)
            .sum::<usize>()
    }
}
