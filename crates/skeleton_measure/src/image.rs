//! Sizing for images whose source has not resolved yet.
//!
//! Without a loaded source the host lays the `img` out around its alt text,
//! so the measured box says nothing about the eventual image. The authored
//! CSS and HTML attributes are a better guide.

use crate::style_attr::InlineStyle;
use crate::view::ElementView;
use skeleton_core::{LengthOrPercentage, Rect, StyleSnapshot, parse_length_or_percentage, parse_px};

/// Computed heights at or below this are assumed to come from alt-text line
/// boxes rather than an authored height.
pub const COMPUTED_HEIGHT_THRESHOLD: f32 = 50.0;

/// True for an `img` with zero natural size, an empty `src`, or a `src` that
/// resolved to the page itself (what an empty `src` resolves to).
pub fn is_unloaded_image<V: ElementView>(view: &V, element: V::Handle) -> bool {
    if view.tag_name(element) != "img" {
        return false;
    }
    let src_missing = view
        .attr(element, "src")
        .is_none_or(|src| src.trim().is_empty());
    let Some(state) = view.image_state(element) else {
        return true;
    };
    let no_natural_size = state.natural_width == 0 || state.natural_height == 0;
    let src_is_page = view
        .location()
        .is_some_and(|location| state.current_src == location);
    src_missing || no_natural_size || src_is_page
}

/// Effective box for an unloaded image.
///
/// Height comes from a pixel inline `height`, else a computed height above
/// [`COMPUTED_HEIGHT_THRESHOLD`]. Width comes from the inline `width` (pixels,
/// or a percentage of the parent's content width), else the parent's content
/// width. The `width`/`height` attributes are the last resort for either.
/// Returns `measured` unchanged when no positive finite size can be derived.
pub fn effective_image_box<V: ElementView>(
    view: &V,
    element: V::Handle,
    style: &StyleSnapshot,
    measured: Rect,
) -> Rect {
    let inline = view
        .attr(element, "style")
        .map(InlineStyle::parse)
        .unwrap_or_default();
    let parent_content_width = parent_content_width(view, element);

    let height = inline_pixels(&inline, "height")
        .or_else(|| {
            parse_px(&style.height)
                .filter(|height| height.is_finite() && *height > COMPUTED_HEIGHT_THRESHOLD)
        })
        .or_else(|| attribute_pixels(view, element, "height"));

    let width = inline_width(&inline, parent_content_width)
        .or_else(|| parent_content_width.filter(|width| *width > 0.0))
        .or_else(|| attribute_pixels(view, element, "width"));

    match (width, height) {
        (Some(width), Some(height)) => {
            log::trace!("unloaded image sized from CSS to {width}x{height}");
            measured.with_size(width, height)
        }
        _ => measured,
    }
}

fn inline_pixels(inline: &InlineStyle, property: &str) -> Option<f32> {
    match parse_length_or_percentage(inline.get(property)?)? {
        LengthOrPercentage::Pixels(value) if is_usable(value) => Some(value),
        LengthOrPercentage::Pixels(_) | LengthOrPercentage::Percentage(_) => None,
    }
}

fn inline_width(inline: &InlineStyle, parent_content_width: Option<f32>) -> Option<f32> {
    match parse_length_or_percentage(inline.get("width")?)? {
        LengthOrPercentage::Pixels(value) => Some(value),
        LengthOrPercentage::Percentage(fraction) => {
            parent_content_width.filter(|width| *width > 0.0).map(|width| width * fraction)
        }
    }
    .filter(|value| is_usable(*value))
}

fn attribute_pixels<V: ElementView>(view: &V, element: V::Handle, name: &str) -> Option<f32> {
    view.attr(element, name)
        .and_then(parse_px)
        .filter(|value| is_usable(*value))
}

/// Parent border-box width minus its horizontal padding.
fn parent_content_width<V: ElementView>(view: &V, element: V::Handle) -> Option<f32> {
    let parent = view.parent(element)?;
    let rect = view.bounding_box(parent).ok()?;
    let padding = view
        .computed_style(parent)
        .map(|style| style.horizontal_padding_px())
        .unwrap_or(0.0);
    Some(rect.width - padding)
}

fn is_usable(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
