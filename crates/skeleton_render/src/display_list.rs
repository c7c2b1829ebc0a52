//! Flat display list for surfaces that paint rectangles instead of markup.
//!
//! Every placeholder block of a blueprint becomes one [`DisplayItem::Rect`]
//! in viewport coordinates, in paint order. Passthrough regions are reported
//! so the host can leave its live content visible there.

use crate::renderer::{MIN_LINE_GAP, has_rendered_children, line_gap};
use serde::{Deserialize, Serialize};
use skeleton_core::{Rect, SkeletonConfig, SkeletonKind, SkeletonNode};

/// `#e0e0e0`, used when the configured base color does not parse.
const FALLBACK_COLOR: [f32; 4] = [224.0 / 255.0, 224.0 / 255.0, 224.0 / 255.0, 1.0];
const LAST_LINE_FRACTION: f32 = 0.7;
const EMPTY_CELL_FRACTION: f32 = 0.8;
const EMPTY_CELL_HEIGHT: f32 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DisplayItem {
    /// Placeholder block. Color is straight RGBA in [0, 1].
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [f32; 4],
        border_radius: f32,
    },
    /// Region reproduced from captured markup rather than painted.
    Passthrough {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Display items in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lower `blueprint` using the configured base color.
    pub fn from_blueprint(blueprint: &SkeletonNode, config: &SkeletonConfig) -> Self {
        let mut lowering = Lowering {
            list: Self::new(),
            color: parse_color(&config.base_color),
            default_radius: config.border_radius,
        };
        lowering.node(blueprint);
        lowering.list
    }

    #[inline]
    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    /// Bounds of every painted placeholder block.
    pub fn block_rects(&self) -> Vec<Rect> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DisplayItem::Rect {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => Some(Rect::new(*x, *y, *width, *height)),
                DisplayItem::Passthrough { .. } => None,
            })
            .collect()
    }
}

fn parse_color(value: &str) -> [f32; 4] {
    match value.parse::<csscolorparser::Color>() {
        Ok(color) => color.to_rgba8().map(|channel| f32::from(channel) / 255.0),
        Err(err) => {
            log::warn!("base color `{value}` is not a CSS color ({err}), using #e0e0e0");
            FALLBACK_COLOR
        }
    }
}

struct Lowering {
    list: DisplayList,
    color: [f32; 4],
    default_radius: f32,
}

impl Lowering {
    fn node(&mut self, node: &SkeletonNode) {
        match node.kind {
            SkeletonKind::Skip => {}
            SkeletonKind::Passthrough => self.list.push(DisplayItem::Passthrough {
                x: node.rect.x,
                y: node.rect.y,
                width: node.rect.width,
                height: node.rect.height,
            }),
            SkeletonKind::Container if !has_rendered_children(node) => self.leaf(node),
            SkeletonKind::Container
            | SkeletonKind::Table
            | SkeletonKind::Thead
            | SkeletonKind::Tbody
            | SkeletonKind::Tfoot
            | SkeletonKind::Tr => self.children(node),
            SkeletonKind::Th | SkeletonKind::Td => {
                let before = self.list.items.len();
                self.children(node);
                if self.list.items.len() == before {
                    let rect = node.rect;
                    let block = Rect::new(
                        rect.x,
                        rect.y,
                        rect.width * EMPTY_CELL_FRACTION,
                        rect.height.min(EMPTY_CELL_HEIGHT),
                    );
                    self.rect(block, self.default_radius);
                }
            }
            SkeletonKind::Text => match node.lines {
                Some(lines) if lines > 1 => self.paragraph(node, lines),
                _ => self.leaf(node),
            },
            SkeletonKind::Image | SkeletonKind::Icon | SkeletonKind::Button | SkeletonKind::Input => {
                self.leaf(node);
            }
        }
    }

    fn children(&mut self, node: &SkeletonNode) {
        for child in &node.children {
            self.node(child);
        }
    }

    fn leaf(&mut self, node: &SkeletonNode) {
        self.rect(node.rect, self.radius(node));
    }

    fn radius(&self, node: &SkeletonNode) -> f32 {
        node.border_radius
            .filter(|radius| *radius > 0.0)
            .unwrap_or(self.default_radius)
    }

    /// Bars stacked from the top of the box, spaced like the HTML rendering.
    fn paragraph(&mut self, node: &SkeletonNode, lines: u32) {
        let rect = node.rect;
        let bar_height = rect.height / lines as f32;
        let gap = node
            .preserved
            .as_ref()
            .map_or(MIN_LINE_GAP, |preserved| {
                line_gap(preserved.line_height.as_deref(), bar_height)
            });
        let radius = self.radius(node);
        for index in 0..lines {
            let width = if index + 1 == lines {
                rect.width * LAST_LINE_FRACTION
            } else {
                rect.width
            };
            let y = rect.y + index as f32 * (bar_height + gap);
            self.rect(Rect::new(rect.x, y, width, bar_height), radius);
        }
    }

    fn rect(&mut self, rect: Rect, border_radius: f32) {
        if rect.is_empty() {
            return;
        }
        self.list.push(DisplayItem::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: self.color,
            border_radius,
        });
    }
}
