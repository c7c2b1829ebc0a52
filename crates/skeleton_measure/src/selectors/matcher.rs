//! Right-to-left selector matching against an [`ElementView`].

use super::{Combinator, ComplexSelector, CompoundSelector, SimpleSelector};
use crate::view::ElementView;

/// Match a complex selector against an element.
pub fn matches_complex<V: ElementView>(
    view: &V,
    element: V::Handle,
    selector: &ComplexSelector,
) -> bool {
    selector
        .compounds
        .len()
        .checked_sub(1)
        .is_some_and(|last| matches_at(view, element, selector, last))
}

/// Match a compound selector against a single element.
pub fn matches_compound<V: ElementView>(
    view: &V,
    element: V::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(name) => name.is_empty() || view.tag_name(element) == name.as_str(),
        SimpleSelector::Class(class) => view.has_class(element, class),
        SimpleSelector::Id(id) => view.element_id(element) == Some(id.as_str()),
        SimpleSelector::AttrExists(name) => view.attr(element, name).is_some(),
        SimpleSelector::AttrEquals { name, value } => {
            view.attr(element, name) == Some(value.as_str())
        }
    })
}

/// Does `element` match `compounds[index]`, with everything to its left
/// matched through the combinators? Backtracks over ancestor/sibling chains.
fn matches_at<V: ElementView>(
    view: &V,
    element: V::Handle,
    selector: &ComplexSelector,
    index: usize,
) -> bool {
    let Some(compound) = selector.compounds.get(index) else {
        return false;
    };
    if !matches_compound(view, element, compound) {
        return false;
    }
    let Some(left) = index.checked_sub(1) else {
        return true;
    };
    let Some(&combinator) = selector.combinators.get(left) else {
        return false;
    };
    match combinator {
        Combinator::Child => view
            .parent(element)
            .is_some_and(|parent| matches_at(view, parent, selector, left)),
        Combinator::AdjacentSibling => view
            .previous_sibling_element(element)
            .is_some_and(|sibling| matches_at(view, sibling, selector, left)),
        Combinator::Descendant => {
            let mut current = view.parent(element);
            while let Some(ancestor) = current {
                if matches_at(view, ancestor, selector, left) {
                    return true;
                }
                current = view.parent(ancestor);
            }
            false
        }
        Combinator::GeneralSibling => {
            let mut current = view.previous_sibling_element(element);
            while let Some(sibling) = current {
                if matches_at(view, sibling, selector, left) {
                    return true;
                }
                current = view.previous_sibling_element(sibling);
            }
            false
        }
    }
}
