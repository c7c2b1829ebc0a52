use skeleton_core::StyleSnapshot;

/// Number of placeholder bars a text box of `height` should show.
///
/// One line whenever the box fits a single effective line height (or that
/// height cannot be resolved), else `ceil(height / line_height)`.
pub fn line_count(height: f32, style: &StyleSnapshot) -> u32 {
    let Some(line_height) = style.effective_line_height() else {
        return 1;
    };
    if !height.is_finite() || height <= line_height {
        return 1;
    }
    let lines = (height / line_height).ceil() as u32;
    lines.max(1)
}
