//! Blueprint to placeholder visuals.
//!
//! A structural mapping only: every size comes from the blueprint, nothing
//! is measured or inferred here.

use crate::visual::VisualNode;
use skeleton_core::values::{parse_positive_px, parse_px};
use skeleton_core::{Animation, PreservedStyles, SkeletonConfig, SkeletonKind, SkeletonNode};

/// Class on every placeholder block.
pub const BLOCK_CLASS: &str = "skeleton-block";
/// Class on structure-preserving container boxes.
pub const CONTAINER_CLASS: &str = "skeleton-container";
/// Class on the spacing-only wrapper around a single leaf block.
pub const LEAF_CLASS: &str = "skeleton-leaf";
/// Class on the column of bars standing in for multi-line text.
pub const PARAGRAPH_CLASS: &str = "skeleton-paragraph";
/// Added to blocks when the highlight sweep is configured.
pub const SHIMMER_CLASS: &str = "skeleton-shimmer";
/// Inline animation for pulsing blocks.
pub const PULSE_ANIMATION: &str = "skeleton-pulse 2s ease-in-out infinite";
/// Width of the last bar of a paragraph.
pub const LAST_LINE_WIDTH: &str = "70%";
/// Smallest gap (px) between paragraph bars.
pub const MIN_LINE_GAP: f32 = 4.0;
/// Placeholder drawn in a cell that ended up with no children.
pub const EMPTY_CELL_WIDTH: &str = "80%";
pub const EMPTY_CELL_HEIGHT: &str = "16px";

pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// True for a border declaration that draws something.
pub fn is_visible_border(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let styled_away = value
        .split_whitespace()
        .any(|part| part == "none" || part == "hidden");
    !styled_away && parse_px(value).is_none_or(|width| width > 0.0)
}

/// Gap between paragraph bars: what is left of a line after the bar, at
/// least [`MIN_LINE_GAP`].
pub fn line_gap(line_height: Option<&str>, bar_height: f32) -> f32 {
    line_height
        .and_then(parse_positive_px)
        .map_or(MIN_LINE_GAP, |line| (line - bar_height).max(MIN_LINE_GAP))
}

/// Renders blueprints with one configuration.
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'config> {
    config: &'config SkeletonConfig,
}

impl<'config> Renderer<'config> {
    pub const fn new(config: &'config SkeletonConfig) -> Self {
        Self { config }
    }

    /// Visual for `node`; `None` for skip nodes.
    pub fn render(&self, node: &SkeletonNode) -> Option<VisualNode> {
        let visual = match node.kind {
            SkeletonKind::Skip => return None,
            SkeletonKind::Passthrough => {
                let Some(markup) = node.markup.as_deref() else {
                    log::warn!("passthrough node without markup, rendering nothing");
                    return None;
                };
                VisualNode::markup(markup)
            }
            SkeletonKind::Table
            | SkeletonKind::Thead
            | SkeletonKind::Tbody
            | SkeletonKind::Tfoot
            | SkeletonKind::Tr => self.table_structure(node),
            SkeletonKind::Th | SkeletonKind::Td => self.table_cell(node),
            SkeletonKind::Container if has_rendered_children(node) => self.container(node),
            SkeletonKind::Image => self.image(node),
            SkeletonKind::Button | SkeletonKind::Input => self.control(node),
            SkeletonKind::Text => match node.lines {
                Some(lines) if lines > 1 => self.paragraph(node, lines),
                _ => self.single(node),
            },
            SkeletonKind::Icon | SkeletonKind::Container => self.single(node),
        };
        Some(visual)
    }

    fn render_children(&self, node: &SkeletonNode, target: &mut VisualNode) {
        for child in &node.children {
            if let Some(visual) = self.render(child) {
                target.push_child(visual);
            }
        }
    }

    /// A bare placeholder block in the configured color and animation.
    /// Blocks standing in for a container keep [`CONTAINER_CLASS`] off.
    fn block(&self, kind: SkeletonKind, radius: f32) -> VisualNode {
        let mut block = VisualNode::element("div").with_class(BLOCK_CLASS);
        if kind != SkeletonKind::Container {
            block = block.with_class(&format!("skeleton-{kind}"));
        }
        block = block
            .with_style("background-color", &self.config.base_color)
            .with_style("border-radius", &px(radius));
        match self.config.animation {
            Animation::Pulse => block.set_style("animation", PULSE_ANIMATION),
            Animation::Shimmer => block = block.with_class(SHIMMER_CLASS),
            Animation::None => {}
        }
        block
    }

    /// A node's own positive radius, else the configured one.
    fn leaf_radius(&self, node: &SkeletonNode) -> f32 {
        node.border_radius
            .filter(|radius| *radius > 0.0)
            .unwrap_or(self.config.border_radius)
    }

    fn table_structure(&self, node: &SkeletonNode) -> VisualNode {
        let mut out = VisualNode::element(node.kind.as_str());
        let preserved = node.preserved.clone().unwrap_or_default();
        if node.kind == SkeletonKind::Table {
            let width = preserved.width.as_deref().filter(|width| *width != "auto");
            out.set_style("width", width.unwrap_or("100%"));
            set_if(&mut out, "border-collapse", preserved.border_collapse.as_deref());
            set_if(&mut out, "table-layout", preserved.table_layout.as_deref());
            set_if(&mut out, "margin", preserved.margin.as_deref());
            set_border_if_visible(&mut out, "border", preserved.border.as_deref());
        } else {
            set_border_if_visible(&mut out, "border-bottom", preserved.border_bottom.as_deref());
        }
        set_if(&mut out, "background-color", preserved.background_color.as_deref());
        self.render_children(node, &mut out);
        out
    }

    fn table_cell(&self, node: &SkeletonNode) -> VisualNode {
        let mut out = VisualNode::element(node.kind.as_str());
        let preserved = node.preserved.clone().unwrap_or_default();
        set_if(&mut out, "padding", preserved.padding.as_deref());
        set_border_if_visible(&mut out, "border-bottom", preserved.border_bottom.as_deref());
        set_if(&mut out, "background-color", preserved.background_color.as_deref());
        set_if(&mut out, "text-align", preserved.text_align.as_deref());
        set_if(&mut out, "vertical-align", preserved.vertical_align.as_deref());
        set_if(&mut out, "width", preserved.width.as_deref());
        self.render_children(node, &mut out);
        if out.children().is_empty() {
            out.push_child(
                self.block(SkeletonKind::Text, self.config.border_radius)
                    .with_style("display", "block")
                    .with_style("width", EMPTY_CELL_WIDTH)
                    .with_style("height", EMPTY_CELL_HEIGHT),
            );
        }
        out
    }

    /// Width is pinned to the measurement; height flows from the children.
    fn container(&self, node: &SkeletonNode) -> VisualNode {
        let preserved = node.preserved.clone().unwrap_or_default();
        let mut out = VisualNode::element("div")
            .with_class(CONTAINER_CLASS)
            .with_style("display", node.display.as_deref().unwrap_or("block"));
        if let Some(gap) = node.gap.as_deref().filter(|gap| *gap != "normal") {
            out.set_style("gap", gap);
        }
        out.set_style("box-sizing", "border-box");
        out.set_style("width", &px(node.rect.width));
        set_if(&mut out, "padding", preserved.padding.as_deref());
        set_if(&mut out, "flex-direction", preserved.flex_direction.as_deref());
        set_if(&mut out, "justify-content", preserved.justify_content.as_deref());
        set_if(&mut out, "align-items", preserved.align_items.as_deref());
        set_if(
            &mut out,
            "grid-template-columns",
            preserved.grid_template_columns.as_deref().filter(|value| *value != "none"),
        );
        set_if(
            &mut out,
            "grid-template-rows",
            preserved.grid_template_rows.as_deref().filter(|value| *value != "none"),
        );
        set_if(
            &mut out,
            "min-height",
            preserved
                .min_height
                .as_deref()
                .filter(|value| parse_positive_px(value).is_some()),
        );
        set_border_if_visible(&mut out, "border", preserved.border.as_deref());
        if let Some(radius) = node.border_radius.filter(|radius| *radius > 0.0) {
            out.set_style("border-radius", &px(radius));
        }
        apply_item_placement(&mut out, &preserved);
        self.render_children(node, &mut out);
        out
    }

    fn image(&self, node: &SkeletonNode) -> VisualNode {
        let preserved = node.preserved.clone().unwrap_or_default();
        let mut out = self
            .block(SkeletonKind::Image, self.leaf_radius(node))
            .with_style("display", flow_display(&preserved))
            .with_style("width", &px(node.rect.width))
            .with_style("height", &px(node.rect.height));
        apply_item_placement(&mut out, &preserved);
        out
    }

    /// Buttons and inputs: an inline box locked to its measured size.
    /// Baseline alignment becomes `middle`.
    fn control(&self, node: &SkeletonNode) -> VisualNode {
        let preserved = node.preserved.clone().unwrap_or_default();
        let width = px(node.rect.width);
        let height = px(node.rect.height);
        let mut out = self
            .block(node.kind, self.leaf_radius(node))
            .with_style("display", "inline-block")
            .with_style("width", &width)
            .with_style("height", &height)
            .with_style("min-width", &width)
            .with_style("min-height", &height)
            .with_style(
                "vertical-align",
                preserved
                    .vertical_align
                    .as_deref()
                    .filter(|align| *align != "baseline")
                    .unwrap_or("middle"),
            );
        apply_item_placement(&mut out, &preserved);
        out.set_style("flex-shrink", "0");
        out
    }

    /// Stack of `lines` bars; the last one is shorter.
    fn paragraph(&self, node: &SkeletonNode, lines: u32) -> VisualNode {
        let preserved = node.preserved.clone().unwrap_or_default();
        let bar_height = node.rect.height / lines as f32;
        let gap = line_gap(preserved.line_height.as_deref(), bar_height);
        let mut out = VisualNode::element("div")
            .with_class(PARAGRAPH_CLASS)
            .with_style("display", "flex")
            .with_style("flex-direction", "column")
            .with_style("gap", &px(gap))
            .with_style("width", &px(node.rect.width));
        apply_item_placement(&mut out, &preserved);
        let radius = self.leaf_radius(node);
        for index in 0..lines {
            let width = if index + 1 == lines { LAST_LINE_WIDTH } else { "100%" };
            out.push_child(
                self.block(SkeletonKind::Text, radius)
                    .with_style("display", "block")
                    .with_style("width", width)
                    .with_style("height", &px(bar_height)),
            );
        }
        out
    }

    /// Spacing-only wrapper around one block sized to the leaf. Also takes
    /// containers whose children all came out empty.
    fn single(&self, node: &SkeletonNode) -> VisualNode {
        let preserved = node.preserved.clone().unwrap_or_default();
        let block = self
            .block(node.kind, self.leaf_radius(node))
            .with_style("display", "block")
            .with_style("width", &px(node.rect.width))
            .with_style("height", &px(node.rect.height));
        let mut out = VisualNode::element("div")
            .with_class(LEAF_CLASS)
            .with_style("display", flow_display(&preserved))
            .with_child(block);
        set_if(&mut out, "vertical-align", preserved.vertical_align.as_deref());
        apply_item_placement(&mut out, &preserved);
        out
    }
}

/// True if any child draws something; skip children never do.
pub fn has_rendered_children(node: &SkeletonNode) -> bool {
    node.children
        .iter()
        .any(|child| child.kind != SkeletonKind::Skip)
}

/// `inline-block` for inline-flow elements, `block` otherwise.
fn flow_display(preserved: &PreservedStyles) -> &'static str {
    match preserved.display.as_deref() {
        Some(display) if display.starts_with("inline") => "inline-block",
        _ => "block",
    }
}

fn set_if(target: &mut VisualNode, property: &str, value: Option<&str>) {
    if let Some(value) = value {
        target.set_style(property, value);
    }
}

fn set_border_if_visible(target: &mut VisualNode, property: &str, value: Option<&str>) {
    set_if(target, property, value.filter(|border| is_visible_border(border)));
}

/// Margin plus flex and grid item placement.
fn apply_item_placement(target: &mut VisualNode, preserved: &PreservedStyles) {
    let properties = [
        ("margin", &preserved.margin),
        ("flex", &preserved.flex),
        ("flex-grow", &preserved.flex_grow),
        ("flex-shrink", &preserved.flex_shrink),
        ("flex-basis", &preserved.flex_basis),
        ("align-self", &preserved.align_self),
        ("justify-self", &preserved.justify_self),
        ("grid-column", &preserved.grid_column),
        ("grid-row", &preserved.grid_row),
        ("grid-area", &preserved.grid_area),
    ];
    for (property, value) in properties {
        set_if(target, property, value.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skeleton_core::Rect;

    fn leaf(kind: SkeletonKind, width: f32, height: f32) -> SkeletonNode {
        SkeletonNode::new(kind, Rect::new(0.0, 0.0, width, height))
    }

    fn render(node: &SkeletonNode) -> Option<VisualNode> {
        Renderer::new(&SkeletonConfig::default()).render(node)
    }

    /// # Panics
    /// Panics if border visibility is misjudged.
    #[test]
    fn border_visibility() {
        assert!(is_visible_border("1px solid rgb(0, 0, 0)"));
        assert!(!is_visible_border("0px none rgb(0, 0, 0)"));
        assert!(!is_visible_border("2px hidden red"));
        assert!(!is_visible_border("0px solid red"));
        assert!(!is_visible_border(""));
    }

    /// # Panics
    /// Panics if a multi-line text leaf does not become a ragged bar stack.
    #[test]
    fn paragraph_bars() {
        let mut node = leaf(SkeletonKind::Text, 300.0, 60.0);
        node.lines = Some(3);
        node.preserved = Some(PreservedStyles {
            line_height: Some("24px".to_owned()),
            ..PreservedStyles::default()
        });
        let visual = render(&node).unwrap_or_else(|| VisualNode::element("none"));
        assert!(visual.has_class(PARAGRAPH_CLASS));
        assert_eq!(visual.style("gap"), Some("4px"));
        assert_eq!(visual.style("width"), Some("300px"));
        let widths: Vec<Option<&str>> =
            visual.children().iter().map(|bar| bar.style("width")).collect();
        assert_eq!(widths, vec![Some("100%"), Some("100%"), Some("70%")]);
        assert!(visual
            .children()
            .iter()
            .all(|bar| bar.style("height") == Some("20px")));

        node.preserved = Some(PreservedStyles {
            line_height: Some("32px".to_owned()),
            ..PreservedStyles::default()
        });
        let visual = render(&node).unwrap_or_else(|| VisualNode::element("none"));
        assert_eq!(visual.style("gap"), Some("12px"));
    }

    /// # Panics
    /// Panics if controls are not locked against flex compression.
    #[test]
    fn controls_are_locked() {
        let mut node = leaf(SkeletonKind::Button, 120.0, 40.0);
        node.preserved = Some(PreservedStyles {
            flex_shrink: Some("1".to_owned()),
            ..PreservedStyles::default()
        });
        let visual = render(&node).unwrap_or_else(|| VisualNode::element("none"));
        assert!(visual.has_class("skeleton-button"));
        assert_eq!(visual.style("display"), Some("inline-block"));
        assert_eq!(visual.style("min-width"), Some("120px"));
        assert_eq!(visual.style("min-height"), Some("40px"));
        assert_eq!(visual.style("vertical-align"), Some("middle"));
        assert_eq!(visual.style("flex-shrink"), Some("0"));
        assert_eq!(visual.style("border-radius"), Some("4px"));
        assert_eq!(visual.style("animation"), Some(PULSE_ANIMATION));
    }

    /// # Panics
    /// Panics if container sizing or border filtering is wrong.
    #[test]
    fn container_pins_width_only() {
        let mut node = leaf(SkeletonKind::Container, 320.0, 180.0);
        node.display = Some("grid".to_owned());
        node.gap = Some("16px".to_owned());
        node.border_radius = Some(0.0);
        node.preserved = Some(PreservedStyles {
            border: Some("0px none rgb(0, 0, 0)".to_owned()),
            grid_template_columns: Some("100px 200px".to_owned()),
            ..PreservedStyles::default()
        });
        node.children = vec![leaf(SkeletonKind::Icon, 24.0, 24.0), leaf(SkeletonKind::Skip, 2.0, 2.0)];
        let visual = render(&node).unwrap_or_else(|| VisualNode::element("none"));
        assert_eq!(visual.style("display"), Some("grid"));
        assert_eq!(visual.style("gap"), Some("16px"));
        assert_eq!(visual.style("width"), Some("320px"));
        assert_eq!(visual.style("height"), None);
        assert_eq!(visual.style("border"), None);
        assert_eq!(visual.style("border-radius"), None);
        assert_eq!(visual.style("grid-template-columns"), Some("100px 200px"));
        assert_eq!(visual.children().len(), 1);
    }

    /// # Panics
    /// Panics if passthrough is wrapped or skip renders.
    #[test]
    fn passthrough_and_skip() {
        let node = SkeletonNode::passthrough(Rect::new(0.0, 0.0, 10.0, 10.0), "<i>x</i>".to_owned());
        assert_eq!(render(&node), Some(VisualNode::markup("<i>x</i>")));
        assert_eq!(render(&leaf(SkeletonKind::Skip, 10.0, 10.0)), None);
    }

    /// # Panics
    /// Panics if an emptied cell renders without its fallback block.
    #[test]
    fn empty_cell_gets_a_block() {
        let mut cell = leaf(SkeletonKind::Td, 100.0, 30.0);
        cell.children = vec![leaf(SkeletonKind::Skip, 1.0, 1.0)];
        let visual = render(&cell).unwrap_or_else(|| VisualNode::element("none"));
        assert_eq!(visual.tag(), Some("td"));
        let block = visual.children().first();
        assert_eq!(block.and_then(|child| child.style("width")), Some(EMPTY_CELL_WIDTH));
        assert_eq!(block.and_then(|child| child.style("height")), Some(EMPTY_CELL_HEIGHT));
    }

    /// # Panics
    /// Panics if inline leaves are not inline-level or animation mode leaks into layout.
    #[test]
    fn single_leaves_follow_flow_and_animation() {
        let mut node = leaf(SkeletonKind::Icon, 24.0, 24.0);
        node.preserved = Some(PreservedStyles {
            display: Some("inline".to_owned()),
            margin: Some("0px 8px".to_owned()),
            ..PreservedStyles::default()
        });
        let config = SkeletonConfig {
            animation: Animation::Shimmer,
            ..SkeletonConfig::default()
        };
        let visual = Renderer::new(&config)
            .render(&node)
            .unwrap_or_else(|| VisualNode::element("none"));
        assert_eq!(visual.style("display"), Some("inline-block"));
        assert_eq!(visual.style("margin"), Some("0px 8px"));
        let block = visual.children().first();
        assert!(block.is_some_and(|child| child.has_class(SHIMMER_CLASS)));
        assert_eq!(block.and_then(|child| child.style("animation")), None);
        assert_eq!(block.and_then(|child| child.style("width")), Some("24px"));
    }

    /// # Panics
    /// Panics if a container left without drawable children renders as a blank box.
    #[test]
    fn emptied_container_becomes_a_block() {
        let mut node = leaf(SkeletonKind::Container, 300.0, 40.0);
        node.border_radius = Some(0.0);
        node.preserved = Some(PreservedStyles {
            display: Some("flex".to_owned()),
            margin: Some("8px 0px".to_owned()),
            ..PreservedStyles::default()
        });
        node.children = vec![leaf(SkeletonKind::Skip, 300.0, 1.0)];
        for children in [node.children.clone(), Vec::new()] {
            node.children = children;
            let visual = render(&node).unwrap_or_else(|| VisualNode::element("none"));
            assert!(visual.has_class(LEAF_CLASS));
            assert!(!visual.has_class(CONTAINER_CLASS));
            assert_eq!(visual.style("display"), Some("block"));
            assert_eq!(visual.style("margin"), Some("8px 0px"));
            assert_eq!(visual.children().len(), 1);
            let block = visual.children().first();
            assert!(block.is_some_and(|block| block.has_class(BLOCK_CLASS)));
            assert!(!block.is_some_and(|block| block.has_class(CONTAINER_CLASS)));
            assert_eq!(block.and_then(|block| block.style("width")), Some("300px"));
            assert_eq!(block.and_then(|block| block.style("height")), Some("40px"));
            assert_eq!(block.and_then(|block| block.style("border-radius")), Some("4px"));
        }
    }
}
