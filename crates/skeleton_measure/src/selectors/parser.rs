//! Selector tokenizing and parsing.

use super::{Combinator, ComplexSelector, CompoundSelector, SimpleSelector};
use core::mem::take;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWS,
    Simple(SimpleSelector),
}

/// Tokenizer over one complex selector.
struct SelectorTokenizer<'src> {
    input: &'src [u8],
    index: usize,
    pending_whitespace: bool,
}

impl<'src> SelectorTokenizer<'src> {
    const fn new(input: &'src str) -> Self {
        Self {
            input: input.as_bytes(),
            index: 0,
            pending_whitespace: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.index).copied()
    }

    fn bump(&mut self) {
        self.index = self.index.saturating_add(1);
    }

    fn next_token(&mut self) -> Option<Tok> {
        loop {
            if self.pending_whitespace {
                self.pending_whitespace = false;
                return Some(Tok::DescendantWS);
            }
            self.skip_whitespace_descendant();
            if self.pending_whitespace {
                self.pending_whitespace = false;
                // Trailing whitespace implies nothing.
                self.peek()?;
                return Some(Tok::DescendantWS);
            }
            let token = match self.peek()? {
                b'*' => {
                    self.bump();
                    Tok::Simple(SimpleSelector::Universal)
                }
                b'.' => {
                    self.bump();
                    Tok::Simple(SimpleSelector::Class(self.consume_ident()))
                }
                b'#' => {
                    self.bump();
                    Tok::Simple(SimpleSelector::Id(self.consume_ident()))
                }
                b'[' => self.consume_attr(),
                b'>' => self.combinator(Combinator::Child),
                b'+' => self.combinator(Combinator::AdjacentSibling),
                b'~' => self.combinator(Combinator::GeneralSibling),
                _ => {
                    let ident = self.consume_ident();
                    if ident.is_empty() {
                        // Unknown byte: skip it so parsing always makes progress.
                        self.bump();
                        continue;
                    }
                    Tok::Simple(SimpleSelector::Type(ident.to_ascii_lowercase()))
                }
            };
            return Some(token);
        }
    }

    fn combinator(&mut self, combinator: Combinator) -> Tok {
        self.bump();
        self.skip_spaces();
        Tok::Combinator(combinator)
    }

    /// Skip whitespace and mark that a descendant combinator may follow.
    fn skip_whitespace_descendant(&mut self) {
        let start = self.index;
        self.skip_spaces();
        if self.index > start {
            self.pending_whitespace = true;
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// ASCII alphanumerics, `-` and `_`.
    fn consume_ident(&mut self) -> String {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
        {
            self.bump();
        }
        let slice = self.input.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// `[name]` or `[name=value]` with the value quoted or unquoted.
    fn consume_attr(&mut self) -> Tok {
        self.bump();
        self.skip_spaces();
        let name = self.consume_ident().to_ascii_lowercase();
        self.skip_spaces();
        let value = if self.peek() == Some(b'=') {
            self.bump();
            self.skip_spaces();
            Some(match self.peek() {
                Some(quote @ (b'"' | b'\'')) => {
                    self.bump();
                    self.consume_until(|byte| byte == quote, true)
                }
                _ => self.consume_until(|byte| byte.is_ascii_whitespace() || byte == b']', false),
            })
        } else {
            None
        };
        self.skip_spaces();
        if self.peek() == Some(b']') {
            self.bump();
        }
        Tok::Simple(match value {
            Some(value) => SimpleSelector::AttrEquals { name, value },
            None => SimpleSelector::AttrExists(name),
        })
    }

    fn consume_until(&mut self, stop: impl Fn(u8) -> bool, eat_stop: bool) -> String {
        let start = self.index;
        while self.peek().is_some_and(|byte| !stop(byte)) {
            self.bump();
        }
        let slice = self.input.get(start..self.index).unwrap_or(&[]);
        let out = String::from_utf8_lossy(slice).into_owned();
        if eat_stop && self.peek().is_some() {
            self.bump();
        }
        out
    }
}

/// Parse a comma-separated selector list. Empty groups are dropped.
pub fn parse_selector_list(input: &str) -> Vec<ComplexSelector> {
    input
        .split(',')
        .map(|part| parse_complex_selector(part.trim()))
        .filter(|selector| !selector.compounds.is_empty())
        .collect()
}

/// Parse one complex selector, permissively.
pub fn parse_complex_selector(input: &str) -> ComplexSelector {
    let mut tokens = SelectorTokenizer::new(input.trim());
    let mut current = CompoundSelector::default();
    let mut selector = ComplexSelector::default();
    let mut pending: Option<Combinator> = None;

    while let Some(token) = tokens.next_token() {
        match token {
            Tok::Combinator(combinator) => {
                if !current.simples.is_empty() {
                    selector.compounds.push(take(&mut current));
                }
                pending = Some(combinator);
            }
            Tok::DescendantWS => {
                if !current.simples.is_empty() {
                    selector.compounds.push(take(&mut current));
                    pending = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                if current.simples.is_empty() && !selector.compounds.is_empty() {
                    selector
                        .combinators
                        .push(pending.take().unwrap_or(Combinator::Descendant));
                }
                current.simples.push(simple);
            }
        }
    }
    if !current.simples.is_empty() {
        selector.compounds.push(current);
    }
    // A dangling combinator has no right-hand compound to relate.
    selector
        .combinators
        .truncate(selector.compounds.len().saturating_sub(1));
    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(simples: Vec<SimpleSelector>) -> CompoundSelector {
        CompoundSelector { simples }
    }

    /// # Panics
    /// Panics if attribute presence and equality are not distinguished.
    #[test]
    fn attribute_forms() {
        let selector = parse_complex_selector("[data-skeleton-ignore]");
        assert_eq!(
            selector.compounds,
            vec![compound(vec![SimpleSelector::AttrExists(
                "data-skeleton-ignore".to_owned()
            )])]
        );
        let selector = parse_complex_selector("input[type='hidden']");
        assert_eq!(
            selector.compounds,
            vec![compound(vec![
                SimpleSelector::Type("input".to_owned()),
                SimpleSelector::AttrEquals {
                    name: "type".to_owned(),
                    value: "hidden".to_owned()
                },
            ])]
        );
    }

    /// # Panics
    /// Panics if combinators are not placed between the right compounds.
    #[test]
    fn combinators_between_compounds() {
        let selector = parse_complex_selector("ul > li  .badge ~ span");
        assert_eq!(selector.compounds.len(), 4);
        assert_eq!(
            selector.combinators,
            vec![
                Combinator::Child,
                Combinator::Descendant,
                Combinator::GeneralSibling,
            ]
        );
    }

    /// # Panics
    /// Panics if class names are case-folded or empty groups survive.
    #[test]
    fn list_splits_and_keeps_class_case() {
        let list = parse_selector_list(".MyCard, , #Main");
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.first().map(|selector| selector.compounds.clone()),
            Some(vec![compound(vec![SimpleSelector::Class("MyCard".to_owned())])])
        );
    }

    /// # Panics
    /// Panics if a trailing combinator is kept without a right-hand side.
    #[test]
    fn dangling_combinator_is_dropped() {
        let selector = parse_complex_selector("div >");
        assert_eq!(selector.compounds.len(), 1);
        assert!(selector.combinators.is_empty());
    }

    /// # Panics
    /// Panics if a long run of unknown bytes is not skipped.
    #[test]
    fn long_runs_of_unknown_bytes_are_skipped() {
        let noisy = format!("{}nav", ":".repeat(100_000));
        assert_eq!(
            parse_complex_selector(&noisy).compounds,
            vec![compound(vec![SimpleSelector::Type("nav".to_owned())])]
        );
        assert!(parse_complex_selector(&"!".repeat(100_000)).compounds.is_empty());
    }
}
