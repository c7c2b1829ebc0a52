//! Element-kind groups the heuristics care about. Tags are lowercase.

/// Kinds that usually carry a run of text.
pub fn is_text_bearing(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "span" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "label" | "a" | "div"
    )
}

pub fn is_image(tag: &str) -> bool {
    tag == "img"
}

pub fn is_vector_graphic(tag: &str) -> bool {
    tag == "svg"
}

pub fn is_button(tag: &str) -> bool {
    tag == "button"
}

pub fn is_form_field(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

/// Replaced and interactive kinds that become one placeholder whatever
/// their children (an `svg` with `path`s, a `button` with an icon and label).
pub fn is_intrinsic_leaf(tag: &str) -> bool {
    is_image(tag) || is_vector_graphic(tag) || is_button(tag) || is_form_field(tag)
}
