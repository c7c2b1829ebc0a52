//! Shared CSS the rendered placeholders rely on.

use crate::renderer::{BLOCK_CLASS, SHIMMER_CLASS};
use skeleton_core::{Animation, SkeletonConfig};

/// Keyframes and class rules for the configured animation.
///
/// The pulse keyframes are always present so blocks rendered under another
/// configuration keep animating. The shimmer rule only affects paint.
pub fn stylesheet(config: &SkeletonConfig) -> String {
    let mut css = String::from(
        "@keyframes skeleton-pulse {\n  0%, 100% { opacity: 1; }\n  50% { opacity: 0.5; }\n}\n",
    );
    css.push_str(&format!(
        ".{BLOCK_CLASS} {{\n  background-color: {};\n}}\n",
        config.base_color
    ));
    if config.animation == Animation::Shimmer {
        css.push_str(
            "@keyframes skeleton-shimmer {\n  0% { background-position: 200% 0; }\n  100% { background-position: -200% 0; }\n}\n",
        );
        css.push_str(&format!(
            ".{SHIMMER_CLASS} {{\n  background: linear-gradient(90deg, {base} 25%, {highlight} 50%, {base} 75%);\n  background-size: 200% 100%;\n  animation: skeleton-shimmer 1.5s linear infinite;\n}}\n",
            base = config.base_color,
            highlight = config.highlight_color,
        ));
    }
    css
}
