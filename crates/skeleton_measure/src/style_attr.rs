//! Inline `style="..."` attribute reading.
//!
//! Computed styles lose the authored form of a value (`100%` becomes a pixel
//! width), so image sizing looks at the inline declarations directly.

/// Last-wins view over the declarations of one `style` attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parse a `style` attribute value.
    ///
    /// Splits on `;`, then on the first `:`. Property names are lowercased,
    /// values trimmed. Items without a colon, property or value are skipped.
    /// No `!important` handling.
    pub fn parse(input: &str) -> Self {
        let declarations = input
            .split(';')
            .filter_map(|item| {
                let (property, value) = item.split_once(':')?;
                let property = property.trim_matches(is_css_whitespace);
                let value = value.trim_matches(is_css_whitespace);
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property.to_ascii_lowercase(), value.to_owned()))
            })
            .collect();
        Self { declarations }
    }

    /// Value of the last declaration of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

/// CSS whitespace: TAB, LF, FF, CR, SPACE.
const fn is_css_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}
