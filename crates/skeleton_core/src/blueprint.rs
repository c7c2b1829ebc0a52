//! Blueprint (skeleton node) tree produced by the classifier.

use crate::geometry::Rect;
use core::error::Error;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Visual role of a blueprint node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkeletonKind {
    Text,
    Image,
    Icon,
    Button,
    Input,
    Container,
    /// Never rendered; dropped from its parent's children.
    Skip,
    /// Reproduced verbatim from captured markup.
    Passthrough,
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
}

/// Error for a role name that is not a [`SkeletonKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown skeleton role `{}`", self.0)
    }
}

impl Error for UnknownKind {}

impl SkeletonKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Icon => "icon",
            Self::Button => "button",
            Self::Input => "input",
            Self::Container => "container",
            Self::Skip => "skip",
            Self::Passthrough => "passthrough",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
        }
    }

    /// Structural table kind for an element tag (`table`, `thead`, `tbody`,
    /// `tfoot`, `tr`). Cells are not included.
    pub fn table_structure(tag: &str) -> Option<Self> {
        match tag {
            "table" => Some(Self::Table),
            "thead" => Some(Self::Thead),
            "tbody" => Some(Self::Tbody),
            "tfoot" => Some(Self::Tfoot),
            "tr" => Some(Self::Tr),
            _ => None,
        }
    }

    /// Cell kind for an element tag (`th`, `td`).
    pub fn table_cell(tag: &str) -> Option<Self> {
        match tag {
            "th" => Some(Self::Th),
            "td" => Some(Self::Td),
            _ => None,
        }
    }

    pub const fn is_table_structure(self) -> bool {
        matches!(
            self,
            Self::Table | Self::Thead | Self::Tbody | Self::Tfoot | Self::Tr
        )
    }

    pub const fn is_table_cell(self) -> bool {
        matches!(self, Self::Th | Self::Td)
    }

    /// Kinds that may carry children.
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Container) || self.is_table_structure() || self.is_table_cell()
    }
}

impl fmt::Display for SkeletonKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SkeletonKind {
    type Err = UnknownKind;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let kind = match input.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "image" => Self::Image,
            "icon" => Self::Icon,
            "button" => Self::Button,
            "input" => Self::Input,
            "container" => Self::Container,
            "skip" => Self::Skip,
            "passthrough" => Self::Passthrough,
            "table" => Self::Table,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "tfoot" => Self::Tfoot,
            "tr" => Self::Tr,
            "th" => Self::Th,
            "td" => Self::Td,
            _ => return Err(UnknownKind(input.to_owned())),
        };
        Ok(kind)
    }
}

/// Style subset carried over so placeholders keep their flex/grid placement,
/// spacing and table layout. Absent fields are simply not reapplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PreservedStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_sizing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_grow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_basis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_self: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_row: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_collapse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_layout: Option<String>,
}

/// One blueprint node.
///
/// Leaves (every kind except container, table kinds, skip and passthrough)
/// never have children and always carry a resolved box. `Skip` nodes are
/// filtered out of `children` before a tree leaves the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonNode {
    #[serde(rename = "type")]
    pub kind: SkeletonKind,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    /// Line count, text leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    /// Container display mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Container gap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SkeletonNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserved: Option<PreservedStyles>,
    /// Captured markup, passthrough nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

impl SkeletonNode {
    /// A bare node of `kind` covering `rect`.
    pub const fn new(kind: SkeletonKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            border_radius: None,
            lines: None,
            display: None,
            gap: None,
            children: Vec::new(),
            preserved: None,
            markup: None,
        }
    }

    /// A passthrough node reproducing `markup` verbatim.
    pub fn passthrough(rect: Rect, markup: String) -> Self {
        Self {
            markup: Some(markup),
            ..Self::new(SkeletonKind::Passthrough, rect)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk over this node and every descendant.
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Kinds in pre-order, handy for shape assertions.
    pub fn kinds(&self) -> Vec<SkeletonKind> {
        self.descendants().into_iter().map(|node| node.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if role names do not round-trip through their string form.
    #[test]
    fn role_names_parse_case_insensitively() {
        assert_eq!(" Text ".parse::<SkeletonKind>(), Ok(SkeletonKind::Text));
        assert_eq!("TFOOT".parse::<SkeletonKind>(), Ok(SkeletonKind::Tfoot));
        assert_eq!(
            "banner".parse::<SkeletonKind>(),
            Err(UnknownKind("banner".to_owned()))
        );
        assert_eq!(SkeletonKind::Passthrough.to_string(), "passthrough");
    }

    /// # Panics
    /// Panics if serialized blueprints drop the `type` tag or keep empty fields.
    #[test]
    fn serialized_leaf_is_compact() {
        let mut node = SkeletonNode::new(SkeletonKind::Text, Rect::new(0.0, 0.0, 120.0, 20.0));
        node.lines = Some(1);
        let json = serde_json::to_value(&node).unwrap_or_default();
        assert_eq!(json["type"], "text");
        assert_eq!(json["lines"], 1);
        assert!(json.get("children").is_none());
        assert!(json.get("markup").is_none());
    }

    /// # Panics
    /// Panics if the pre-order walk visits nodes out of order.
    #[test]
    fn descendants_are_pre_order() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut row = SkeletonNode::new(SkeletonKind::Tr, rect);
        row.children = vec![
            SkeletonNode::new(SkeletonKind::Td, rect),
            SkeletonNode::new(SkeletonKind::Th, rect),
        ];
        let mut table = SkeletonNode::new(SkeletonKind::Table, rect);
        table.children = vec![row, SkeletonNode::new(SkeletonKind::Tfoot, rect)];
        assert_eq!(
            table.kinds(),
            vec![
                SkeletonKind::Table,
                SkeletonKind::Tr,
                SkeletonKind::Td,
                SkeletonKind::Th,
                SkeletonKind::Tfoot,
            ]
        );
    }
}
