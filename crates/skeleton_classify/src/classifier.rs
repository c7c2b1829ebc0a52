//! Measurement tree to blueprint tree.

use crate::lines::line_count;
use crate::preserve;
use crate::scoring::RuleSet;
use crate::tags;
use skeleton_core::{
    MeasurementNode, PASSTHROUGH_ATTRIBUTE, ROLE_OVERRIDE_ATTRIBUTE, Rect, SkeletonConfig,
    SkeletonKind, SkeletonNode,
};

/// Elements smaller than this (px²) never collapse into a placeholder on
/// their own account; with children they stay containers.
pub const MIN_LEAF_AREA: f32 = 100.0;
/// Width of the placeholder inserted into an empty table cell, as a fraction
/// of the cell width.
pub const CELL_PLACEHOLDER_WIDTH: f32 = 0.8;
/// Height (px) of the placeholder inserted into an empty table cell.
pub const CELL_PLACEHOLDER_HEIGHT: f32 = 16.0;

/// Turns measurement nodes into blueprint nodes.
///
/// Pure: the same input always yields the same blueprint.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn classify(&self, node: &MeasurementNode, config: &SkeletonConfig) -> SkeletonNode {
        if let Some(markup) = &node.passthrough_markup {
            return SkeletonNode::passthrough(node.rect, markup.clone());
        }
        if let Some(kind) = override_kind(node) {
            log::debug!("<{}> role overridden to {kind}", node.tag);
            return self.classify_as(kind, node, config);
        }
        if let Some(kind) = SkeletonKind::table_structure(&node.tag) {
            return self.table_structure(kind, node, config);
        }
        if let Some(kind) = SkeletonKind::table_cell(&node.tag) {
            return self.table_cell(kind, node, config);
        }
        if collapses_to_leaf(node) {
            let kind = self.rules.infer(node, config);
            log::trace!("<{}> collapsed to {kind} leaf", node.tag);
            leaf(kind, node, config)
        } else {
            self.container(node, config)
        }
    }

    /// Build a node of a known `kind`, bypassing inference.
    fn classify_as(
        &self,
        kind: SkeletonKind,
        node: &MeasurementNode,
        config: &SkeletonConfig,
    ) -> SkeletonNode {
        match kind {
            SkeletonKind::Container => self.container(node, config),
            _ if kind.is_table_structure() => self.table_structure(kind, node, config),
            _ if kind.is_table_cell() => self.table_cell(kind, node, config),
            _ => leaf(kind, node, config),
        }
    }

    /// Classify children in order, dropping the ones that came out as skip.
    fn children(&self, node: &MeasurementNode, config: &SkeletonConfig) -> Vec<SkeletonNode> {
        node.children
            .iter()
            .map(|child| self.classify(child, config))
            .filter(|child| child.kind != SkeletonKind::Skip)
            .collect()
    }

    fn container(&self, node: &MeasurementNode, config: &SkeletonConfig) -> SkeletonNode {
        let mut out = SkeletonNode::new(SkeletonKind::Container, node.rect);
        out.display = non_empty(&node.style.display);
        out.gap = non_empty(&node.style.gap);
        out.border_radius = Some(node.style.border_radius_px().unwrap_or(0.0));
        out.preserved = Some(preserve::container(&node.style));
        out.children = self.children(node, config);
        out
    }

    fn table_structure(
        &self,
        kind: SkeletonKind,
        node: &MeasurementNode,
        config: &SkeletonConfig,
    ) -> SkeletonNode {
        let mut out = SkeletonNode::new(kind, node.rect);
        out.preserved = Some(preserve::table(&node.style));
        out.children = self.children(node, config);
        out
    }

    fn table_cell(
        &self,
        kind: SkeletonKind,
        node: &MeasurementNode,
        config: &SkeletonConfig,
    ) -> SkeletonNode {
        let mut out = SkeletonNode::new(kind, node.rect);
        out.preserved = Some(preserve::cell(&node.style));
        out.children = if node.children.is_empty() {
            vec![cell_placeholder(node.rect, config)]
        } else {
            self.children(node, config)
        };
        out
    }
}

/// The override attribute's role, when it names one that can be built
/// without host help.
fn override_kind(node: &MeasurementNode) -> Option<SkeletonKind> {
    let raw = node.attr(ROLE_OVERRIDE_ATTRIBUTE)?;
    match raw.parse::<SkeletonKind>() {
        Ok(SkeletonKind::Passthrough) => {
            log::warn!(
                "<{}> cannot be overridden to passthrough; mark it {} instead",
                node.tag,
                PASSTHROUGH_ATTRIBUTE
            );
            None
        }
        Ok(kind) => Some(kind),
        Err(err) => {
            log::warn!("<{}> ignoring role override: {err}", node.tag);
            None
        }
    }
}

/// Whether a non-structural element becomes a single placeholder.
///
/// A textless flex or grid box stays a container even when it has no
/// children, unless it is small enough to be scored as a spacer.
fn collapses_to_leaf(node: &MeasurementNode) -> bool {
    if tags::is_intrinsic_leaf(&node.tag) {
        return true;
    }
    match node.children.as_slice() {
        [] if node.has_text() || node.rect.area() < MIN_LEAF_AREA => true,
        [] => !is_layout_display(&node.style.display),
        _ if node.rect.area() < MIN_LEAF_AREA => false,
        [only] => node.has_text() && only.has_text() && only.children.is_empty(),
        _ => false,
    }
}

/// `flex`, `grid` and their inline forms.
fn is_layout_display(display: &str) -> bool {
    display.contains("flex") || display.contains("grid")
}

fn leaf(kind: SkeletonKind, node: &MeasurementNode, config: &SkeletonConfig) -> SkeletonNode {
    let mut out = SkeletonNode::new(kind, node.rect);
    out.border_radius = Some(node.style.border_radius_px().unwrap_or(config.border_radius));
    if kind == SkeletonKind::Text {
        out.lines = Some(line_count(node.rect.height, &node.style));
    }
    out.preserved = Some(preserve::leaf(&node.style));
    out
}

/// Stand-in text bar for a cell whose content measured to nothing.
fn cell_placeholder(cell: Rect, config: &SkeletonConfig) -> SkeletonNode {
    let rect = Rect::new(
        cell.x,
        cell.y,
        cell.width * CELL_PLACEHOLDER_WIDTH,
        cell.height.min(CELL_PLACEHOLDER_HEIGHT),
    );
    let mut out = SkeletonNode::new(SkeletonKind::Text, rect);
    out.border_radius = Some(config.border_radius);
    out.lines = Some(1);
    out
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
