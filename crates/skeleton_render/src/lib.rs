//! Placeholder rendering for skeleton blueprints.
//!
//! [`Renderer`] maps a blueprint onto a [`VisualNode`] tree that mirrors
//! the measured layout, [`stylesheet`] supplies the animation rules, and
//! [`DisplayList`] flattens a blueprint into painted rectangles for
//! surfaces without a DOM.

#![forbid(unsafe_code)]

mod display_list;
mod renderer;
mod stylesheet;
mod visual;

pub use display_list::{DisplayItem, DisplayList};
pub use renderer::{
    BLOCK_CLASS, CONTAINER_CLASS, LEAF_CLASS, PARAGRAPH_CLASS, PULSE_ANIMATION, Renderer,
    SHIMMER_CLASS, is_visible_border, line_gap, px,
};
pub use stylesheet::stylesheet;
pub use visual::VisualNode;

use skeleton_core::{SkeletonConfig, SkeletonNode};

/// Render `blueprint`; `None` when it is a skip node.
pub fn render(blueprint: &SkeletonNode, config: &SkeletonConfig) -> Option<VisualNode> {
    Renderer::new(config).render(blueprint)
}

/// Render straight to HTML. Empty for a skip node.
pub fn render_html(blueprint: &SkeletonNode, config: &SkeletonConfig) -> String {
    render(blueprint, config)
        .map(|visual| visual.to_html())
        .unwrap_or_default()
}
