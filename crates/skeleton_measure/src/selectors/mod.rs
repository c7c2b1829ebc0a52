//! Selector predicates for excluding subtrees from measurement.
//!
//! A small Selectors Level 3 subset: type, class, id, attribute presence and
//! attribute equality, the universal selector, and the four combinators.
//! Anything the tokenizer does not understand is read permissively rather
//! than rejected, so a bad ignore selector only fails to match.

mod matcher;
mod parser;

pub use matcher::{matches_complex, matches_compound};
pub use parser::{parse_complex_selector, parse_selector_list};

use crate::view::ElementView;

/// Simple selectors (subset).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// `div`, compared against the lowercased tag name.
    Type(String),
    /// `.name`, case-sensitive.
    Class(String),
    /// `#name`, case-sensitive.
    Id(String),
    /// `[name]`
    AttrExists(String),
    /// `[name=value]`, value quoted or unquoted.
    AttrEquals { name: String, value: String },
    /// `*`
    Universal,
}

/// A sequence of simple selectors with no combinator in between.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

/// Combinators between compounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// Compounds left to right; `combinators[index]` sits between
/// `compounds[index]` and `compounds[index + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// The configured ignore selectors, parsed once per measurement pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList {
    selectors: Vec<ComplexSelector>,
}

impl IgnoreList {
    /// Parse every configured selector. Comma-separated groups are split.
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Self {
        let selectors = sources
            .iter()
            .flat_map(|source| parse_selector_list(source.as_ref()))
            .collect();
        Self { selectors }
    }

    /// True if `element` itself matches any selector.
    pub fn matches<V: ElementView>(&self, view: &V, element: V::Handle) -> bool {
        self.selectors
            .iter()
            .any(|selector| matches_complex(view, element, selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureTree;
    use skeleton_core::Rect;

    /// `<nav id="top"><ul class="menu"><li/><li class="active"/></ul></nav>`
    fn menu() -> (FixtureTree, [usize; 4]) {
        let mut tree = FixtureTree::default();
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let nav = tree.add(None, "nav", rect);
        tree.set_attr(nav, "id", "top");
        let list = tree.add(Some(nav), "ul", rect);
        tree.set_attr(list, "class", "menu wide");
        let first = tree.add(Some(list), "li", rect);
        let active = tree.add(Some(list), "li", rect);
        tree.set_attr(active, "class", "active");
        (tree, [nav, list, first, active])
    }

    /// # Panics
    /// Panics if combinator matching disagrees with the tree relationships.
    #[test]
    fn combinators_follow_tree_relationships() {
        let (tree, [nav, list, first, active]) = menu();
        let check = |source: &str, element: usize| IgnoreList::compile(&[source]).matches(&tree, element);

        assert!(check("#top .active", active));
        assert!(check("nav > ul.wide", list));
        assert!(!check("nav > li", active));
        assert!(check("li + li", active));
        assert!(!check("li + li", first));
        assert!(check("li ~ .active", active));
        assert!(check("*", nav));
        assert!(check("[class=active]", active));
        assert!(!check("[class=menu]", list));
    }

    /// # Panics
    /// Panics if an empty list matches anything.
    #[test]
    fn empty_list_matches_nothing() {
        let (tree, [nav, ..]) = menu();
        let list = IgnoreList::compile::<&str>(&[]);
        assert_eq!(list, IgnoreList::default());
        assert!(!list.matches(&tree, nav));
    }
}
