//! Snapshot of the resolved style properties the pipeline reads.

use crate::values::{parse_positive_px, parse_px};
use serde::{Deserialize, Serialize};

/// Multiplier applied to the font size when `line-height` is `normal`.
const NORMAL_LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Resolved (computed) style values, kept as the strings the host reports.
///
/// Field names serialize as CSS property names so host snapshots can be
/// written the way a style inspector shows them. Missing fields take the
/// CSS initial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleSnapshot {
    pub display: String,
    pub visibility: String,
    pub font_size: String,
    pub line_height: String,
    pub border_radius: String,
    pub cursor: String,
    pub background_image: String,
    pub background_color: String,
    pub margin: String,
    pub padding: String,
    pub padding_left: String,
    pub padding_right: String,
    pub border: String,
    pub border_bottom: String,
    pub box_sizing: String,
    pub width: String,
    pub height: String,
    pub min_height: String,
    pub gap: String,
    pub flex: String,
    pub flex_grow: String,
    pub flex_shrink: String,
    pub flex_basis: String,
    pub flex_direction: String,
    pub align_self: String,
    pub justify_self: String,
    pub justify_content: String,
    pub align_items: String,
    pub grid_template_columns: String,
    pub grid_template_rows: String,
    pub grid_column: String,
    pub grid_row: String,
    pub grid_area: String,
    pub vertical_align: String,
    pub text_align: String,
    pub border_collapse: String,
    pub table_layout: String,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            display: "block".to_owned(),
            visibility: "visible".to_owned(),
            font_size: "16px".to_owned(),
            line_height: "normal".to_owned(),
            border_radius: "0px".to_owned(),
            cursor: "auto".to_owned(),
            background_image: "none".to_owned(),
            background_color: "rgba(0, 0, 0, 0)".to_owned(),
            margin: "0px".to_owned(),
            padding: "0px".to_owned(),
            padding_left: "0px".to_owned(),
            padding_right: "0px".to_owned(),
            border: "0px none rgb(0, 0, 0)".to_owned(),
            border_bottom: "0px none rgb(0, 0, 0)".to_owned(),
            box_sizing: "content-box".to_owned(),
            width: "auto".to_owned(),
            height: "auto".to_owned(),
            min_height: "auto".to_owned(),
            gap: "normal".to_owned(),
            flex: "0 1 auto".to_owned(),
            flex_grow: "0".to_owned(),
            flex_shrink: "1".to_owned(),
            flex_basis: "auto".to_owned(),
            flex_direction: "row".to_owned(),
            align_self: "auto".to_owned(),
            justify_self: "auto".to_owned(),
            justify_content: "normal".to_owned(),
            align_items: "normal".to_owned(),
            grid_template_columns: "none".to_owned(),
            grid_template_rows: "none".to_owned(),
            grid_column: "auto".to_owned(),
            grid_row: "auto".to_owned(),
            grid_area: "auto".to_owned(),
            vertical_align: "baseline".to_owned(),
            text_align: "start".to_owned(),
            border_collapse: "separate".to_owned(),
            table_layout: "auto".to_owned(),
        }
    }
}

impl StyleSnapshot {
    /// `display: none` or `visibility: hidden`.
    pub fn is_hidden(&self) -> bool {
        self.display.trim() == "none" || self.visibility.trim() == "hidden"
    }

    /// Flex or grid formatting context, inline variants included.
    pub fn is_flex_or_grid(&self) -> bool {
        self.display.contains("flex") || self.display.contains("grid")
    }

    pub fn is_inline(&self) -> bool {
        self.display.trim() == "inline"
    }

    pub fn has_background_image(&self) -> bool {
        let value = self.background_image.trim();
        !value.is_empty() && value != "none"
    }

    pub fn has_pointer_cursor(&self) -> bool {
        self.cursor.trim() == "pointer"
    }

    pub fn font_size_px(&self) -> Option<f32> {
        parse_px(&self.font_size)
    }

    /// Resolved border radius when it is positive.
    pub fn border_radius_px(&self) -> Option<f32> {
        parse_positive_px(&self.border_radius)
    }

    /// Line height used for line counting: the resolved `line-height` when
    /// positive, else `font-size * 1.2`. `None` when neither is usable.
    pub fn effective_line_height(&self) -> Option<f32> {
        parse_positive_px(&self.line_height)
            .or_else(|| self.font_size_px().map(|size| size * NORMAL_LINE_HEIGHT_FACTOR))
            .filter(|height| *height > 0.0)
    }

    /// Horizontal padding, used to derive a content-box width.
    pub fn horizontal_padding_px(&self) -> f32 {
        parse_px(&self.padding_left).unwrap_or(0.0) + parse_px(&self.padding_right).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if line height resolution ignores the `normal` fallback.
    #[test]
    fn effective_line_height_falls_back_to_font_size() {
        let mut style = StyleSnapshot::default();
        let normal = style.effective_line_height().unwrap_or_default();
        assert!((normal - 19.2).abs() < 0.001);

        style.line_height = "24px".to_owned();
        assert_eq!(style.effective_line_height(), Some(24.0));

        style.line_height = "0px".to_owned();
        style.font_size = "garbage".to_owned();
        assert_eq!(style.effective_line_height(), None);
    }

    /// # Panics
    /// Panics if hidden or layout-mode checks misread the display value.
    #[test]
    fn display_predicates() {
        let mut style = StyleSnapshot::default();
        assert!(!style.is_hidden());
        style.display = "inline-flex".to_owned();
        assert!(style.is_flex_or_grid());
        style.display = "none".to_owned();
        assert!(style.is_hidden());
        style.display = "block".to_owned();
        style.visibility = "hidden".to_owned();
        assert!(style.is_hidden());
    }

    /// # Panics
    /// Panics if partial JSON does not keep CSS initial values for omitted fields.
    #[test]
    fn partial_snapshot_deserializes_with_initial_values() {
        let style: StyleSnapshot =
            serde_json::from_str(r#"{"display":"grid","padding-left":"12px","padding-right":"8px"}"#)
                .unwrap_or_default();
        assert_eq!(style.display, "grid");
        assert_eq!(style.background_image, "none");
        assert!((style.horizontal_padding_px() - 20.0).abs() < f32::EPSILON);
    }
}
