//! Selector matching and classification against an [`ElementAdapter`].

use crate::{
    Combinator, ComplexSelector, CompoundSelector, ElementAdapter, MatchStrength, SelectorList,
    SimpleSelector,
};
use anyhow::{Result, bail};
use core::iter;

/// Match a selector list against an element.
pub fn matches_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> bool {
    list.selectors
        .iter()
        .any(|selector_item| matches_complex(adapter, element, selector_item))
}

/// Match a complex selector against an element, right to left.
pub fn matches_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> bool {
    let mut target = element;
    if sel.rest.is_empty() {
        return matches_compound(adapter, target, &sel.first);
    }

    if !matches_compound(adapter, target, sel.subject()) {
        return false;
    }

    // Pair i holds the combinator to the left of compound i; walk leftwards,
    // relating each compound to the one on its left.
    let mut pairs = sel.rest.iter().rev().peekable();
    while let Some(pair) = pairs.next() {
        let combinator = pair.0;
        let left_compound = pairs.peek().map_or(&sel.first, |left_pair| &left_pair.1);
        if let Some(next_target) = match_combinator_find(adapter, combinator, left_compound, target)
        {
            target = next_target;
        } else {
            return false;
        }
    }
    true
}

/// Match a compound selector against a single element.
pub fn matches_compound<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    compound: &CompoundSelector,
) -> bool {
    compound
        .simples
        .iter()
        .all(|simple| matches_simple(adapter, element, simple))
}

fn matches_simple<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    simple: &SimpleSelector,
) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => adapter.tag_name(element) == type_name.as_str(),
        SimpleSelector::Class(class_name) => adapter.has_class(element, class_name),
        SimpleSelector::IdSelector(id_value) => adapter
            .element_id(element)
            .is_some_and(|value| value == id_value.as_str()),
        SimpleSelector::AttrEquals { name, value } => adapter
            .attr(element, name)
            .is_some_and(|attr_value| attr_value == value.as_str()),
        SimpleSelector::PseudoClass(pseudo_class) => {
            adapter.has_pseudo_class(element, pseudo_class)
        }
    }
}

/// Evaluate a combinator from `right_element`, returning the element matched by `left_comp`.
fn match_combinator_find<A: ElementAdapter>(
    adapter: &A,
    comb: Combinator,
    left_comp: &CompoundSelector,
    right_element: A::Handle,
) -> Option<A::Handle> {
    match comb {
        Combinator::Descendant => {
            let mut current_parent = adapter.parent(right_element);
            while let Some(ancestor_element) = current_parent {
                if matches_compound(adapter, ancestor_element, left_comp) {
                    return Some(ancestor_element);
                }
                current_parent = adapter.parent(ancestor_element);
            }
            None
        }
        Combinator::Child => adapter
            .parent(right_element)
            .filter(|&parent_el| matches_compound(adapter, parent_el, left_comp)),
        Combinator::AdjacentSibling => adapter
            .previous_sibling_element(right_element)
            .filter(|&prev_el| matches_compound(adapter, prev_el, left_comp)),
        Combinator::GeneralSibling => {
            let mut current_sibling = adapter.previous_sibling_element(right_element);
            while let Some(sibling_element) = current_sibling {
                if matches_compound(adapter, sibling_element, left_comp) {
                    return Some(sibling_element);
                }
                current_sibling = adapter.previous_sibling_element(sibling_element);
            }
            None
        }
    }
}

/// Classify how strongly a complex selector can apply to `element`.
///
/// Only the element's type is consulted for `NeverMatches`, so the answer holds for
/// every element sharing its style key:
/// - `NeverMatches` if the subject compound requires a different type
/// - `AlwaysMatches` if the selector is a lone compound of type/universal selectors
/// - `SometimesMatches` otherwise, since the outcome depends on instance state
///
/// Elements without a style key all share `TypeKey::UNKNOWN` whatever their tag, so
/// nothing about them holds type-wide and they always classify as `SometimesMatches`.
pub fn classify_complex<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    sel: &ComplexSelector,
) -> MatchStrength {
    if adapter.style_key(element).is_none() {
        return MatchStrength::SometimesMatches;
    }
    let subject = sel.subject();
    let type_mismatch = subject.simples.iter().any(|simple| {
        matches!(simple, SimpleSelector::Type(_)) && !matches_simple(adapter, element, simple)
    });
    if type_mismatch {
        return MatchStrength::NeverMatches;
    }
    if sel.rest.is_empty() && is_type_only(subject) {
        return MatchStrength::AlwaysMatches;
    }
    MatchStrength::SometimesMatches
}

/// Strongest classification across the selectors of a list.
pub fn classify_selector_list<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    list: &SelectorList,
) -> MatchStrength {
    MatchStrength::strongest(
        list.selectors
            .iter()
            .map(|selector_item| classify_complex(adapter, element, selector_item)),
    )
}

fn is_type_only(compound: &CompoundSelector) -> bool {
    compound
        .simples
        .iter()
        .all(|simple| matches!(simple, SimpleSelector::Type(_) | SimpleSelector::Universal))
}

/// Reject selector lists that cannot be evaluated meaningfully.
///
/// # Errors
/// Returns an error for an empty list, an empty compound, or an empty identifier.
pub fn check_selector_list(list: &SelectorList) -> Result<()> {
    if list.selectors.is_empty() {
        bail!("selector list is empty");
    }
    for (selector_index, sel) in list.selectors.iter().enumerate() {
        let compounds = iter::once(&sel.first).chain(sel.rest.iter().map(|pair| &pair.1));
        for compound in compounds {
            if compound.simples.is_empty() {
                bail!("selector {selector_index} has an empty compound");
            }
            if let Some(simple) = compound.simples.iter().find(|simple| has_empty_ident(simple)) {
                bail!("selector {selector_index} has an empty identifier in {simple:?}");
            }
        }
    }
    Ok(())
}

fn has_empty_ident(simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Type(ident)
        | SimpleSelector::Class(ident)
        | SimpleSelector::IdSelector(ident)
        | SimpleSelector::PseudoClass(ident)
        | SimpleSelector::AttrEquals { name: ident, .. } => ident.is_empty(),
        SimpleSelector::Universal => false,
    }
}
