//! Process-wide defaults, overridable per invocation.

use serde::{Deserialize, Serialize};

/// Attribute that keeps an element and its descendants out of skeleton
/// synthesis; the subtree is reproduced verbatim instead.
pub const PASSTHROUGH_ATTRIBUTE: &str = "data-no-skeleton";

/// Attribute naming an explicit blueprint role for one element.
pub const ROLE_OVERRIDE_ATTRIBUTE: &str = "data-skeleton-role";

/// Placeholder animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    /// Opacity oscillation, 1.0 to 0.5 and back over two seconds.
    #[default]
    Pulse,
    /// Highlight sweep. Styling only, layout is unaffected.
    Shimmer,
    None,
}

/// Skeleton generation settings.
///
/// Deserializing a partial object keeps the defaults for every field it
/// leaves out:
///
/// ```
/// # use skeleton_core::SkeletonConfig;
/// let config: SkeletonConfig = serde_json::from_str(r#"{"max-depth": 3}"#).unwrap();
/// assert_eq!(config.max_depth, 3);
/// assert_eq!(config.min_text_height, 12.0);
/// ```
///
/// No range validation happens here. Nonsensical thresholds only skew the
/// classification heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SkeletonConfig {
    pub animation: Animation,
    /// Placeholder fill color, any CSS color.
    pub base_color: String,
    /// Shimmer highlight color, any CSS color.
    pub highlight_color: String,
    /// Corner radius for leaves whose element has none.
    pub border_radius: f32,
    /// Smallest height considered a text line.
    pub min_text_height: f32,
    /// Side length above which an element's area suggests an image.
    pub min_image_size: f32,
    /// Side length below which a square-ish element suggests an icon.
    pub icon_max_size: f32,
    /// Deepest level measured; deeper content is silently omitted.
    pub max_depth: usize,
    /// Selectors whose matching elements are omitted with their subtrees.
    pub ignore_selectors: Vec<String>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            animation: Animation::Pulse,
            base_color: "#e0e0e0".to_owned(),
            highlight_color: "#f5f5f5".to_owned(),
            border_radius: 4.0,
            min_text_height: 12.0,
            min_image_size: 32.0,
            icon_max_size: 48.0,
            max_depth: 10,
            ignore_selectors: vec![
                ".no-skeleton".to_owned(),
                "[data-skeleton-ignore]".to_owned(),
            ],
        }
    }
}
