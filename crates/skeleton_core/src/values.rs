//! Numeric readers for resolved CSS values.
//!
//! Computed styles arrive as strings (`"16px"`, `"normal"`, `"50%"`). The
//! classifier and measurer only ever need a leading number out of them, so
//! these helpers tokenize with `cssparser` and look at the first token.

use cssparser::{Parser, ParserInput, Token};

/// A `<length>` restricted to pixels, or a `<percentage>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthOrPercentage {
    /// Absolute pixels. Unitless numbers are read as pixels.
    Pixels(f32),
    /// Stored as a fraction, `50%` is `0.5`.
    Percentage(f32),
}

/// Read the first token of `text` as a pixel length or percentage.
///
/// Other units (`em`, `vh`, ...) and keywords yield `None`; callers fall back
/// to the next sizing source instead of guessing a conversion.
pub fn parse_length_or_percentage(text: &str) -> Option<LengthOrPercentage> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let token = parser.next().ok()?.clone();
    match token {
        Token::Dimension {
            value, ref unit, ..
        } if unit.eq_ignore_ascii_case("px") => Some(LengthOrPercentage::Pixels(value)),
        Token::Number { value, .. } => Some(LengthOrPercentage::Pixels(value)),
        Token::Percentage { unit_value, .. } => Some(LengthOrPercentage::Percentage(unit_value)),
        _ => None,
    }
}

/// Leading numeric value of a resolved style string, whatever its unit.
///
/// `"16px"` is `16`, `"8px 4px"` is `8`, `"50%"` is `50`, `"normal"` and
/// `""` are `None`.
pub fn parse_px(text: &str) -> Option<f32> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    match *parser.next().ok()? {
        Token::Dimension { value, .. } | Token::Number { value, .. } => Some(value),
        Token::Percentage { unit_value, .. } => Some(unit_value * 100.0),
        _ => None,
    }
}

/// Leading value if it is strictly positive.
pub fn parse_positive_px(text: &str) -> Option<f32> {
    parse_px(text).filter(|value| *value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if leading-number extraction differs from resolved-style expectations.
    #[test]
    fn leading_numbers() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px("  8px 4px"), Some(8.0));
        assert_eq!(parse_px("1.5"), Some(1.5));
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_positive_px("0px"), None);
        assert_eq!(parse_positive_px("-3px"), None);
    }

    /// # Panics
    /// Panics if percentages and pixel lengths are not told apart.
    #[test]
    fn length_or_percentage() {
        assert_eq!(
            parse_length_or_percentage("100%"),
            Some(LengthOrPercentage::Percentage(1.0))
        );
        assert_eq!(
            parse_length_or_percentage("200px"),
            Some(LengthOrPercentage::Pixels(200.0))
        );
        assert_eq!(
            parse_length_or_percentage("300"),
            Some(LengthOrPercentage::Pixels(300.0))
        );
        assert_eq!(parse_length_or_percentage("12em"), None);
        assert_eq!(parse_length_or_percentage("auto"), None);
    }
}
