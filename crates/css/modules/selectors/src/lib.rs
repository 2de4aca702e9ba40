//! Style selector matching and per-type match caching.
//!
//! This crate holds the pieces a styling pass needs to decide which rules of a
//! rule set can apply to an element:
//! - A selector model (type, class, id, attribute equals, pseudo-class, universal)
//!   and a right-to-left matcher over an [`ElementAdapter`]
//! - [`MatchStrength`] and the [`StyleRule`] capability every rule implements
//! - [`MatchCache`], which remembers per [`TypeKey`] which rules are candidates at all
//! - [`MatchEngine`], the single matching entrypoint that drives the cache
//!
//! A cache is scoped to one generation of a [`RuleSet`]. Replacing the rules means
//! dropping the engine and starting a fresh one.

mod cache;
mod engine;
mod matcher;
mod rule;
mod strength;
mod type_key;

pub use cache::{CandidateList, MatchCache};
pub use engine::{MatchEngine, MatchStats};
pub use matcher::{
    check_selector_list, classify_complex, classify_selector_list, matches_complex,
    matches_compound, matches_selector_list,
};
pub use rule::{RuleSet, StyleRule};
pub use strength::MatchStrength;
pub use type_key::{StyleKeys, TypeKey};

/// An adapter that abstracts element access for selector matching.
/// Implement this for your element tree.
///
/// Elements that report equal, resolved [`ElementAdapter::style_key`] values must
/// also report equal tag names; the match cache relies on it. Elements whose key
/// is `None` may carry any tag.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Unique, stable key per element. Rules use it to track subscriptions.
    fn unique_key(&self, element: Self::Handle) -> u64;

    /// Style type of the element, or `None` if it has no identifiable type.
    fn style_key(&self, element: Self::Handle) -> Option<TypeKey>;

    /// Parent element if any.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element (skip non-elements if your tree has mixed nodes).
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Type name used by type selectors, in ASCII lowercase.
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Returns Some(id) if the element has a name/id, else None.
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element has the given class token.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// Returns the attribute value if present.
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;

    /// True if the element is currently in the given pseudo-class state
    /// (`pointerover`, `focus`, `pressed`, ...).
    fn has_pseudo_class(&self, element: Self::Handle, pseudo_class: &str) -> bool;
}

/// Simple selectors (subset).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Type selector, e.g. `button`.
    Type(String),
    /// Class selector, e.g. `.primary`.
    Class(String),
    /// Id selector, e.g. `#ok`.
    IdSelector(String),
    /// Attribute selector `[attr=value]`.
    AttrEquals { name: String, value: String },
    /// Pseudo-class selector, e.g. `:pointerover`. Depends on live element state.
    PseudoClass(String),
    /// Universal selector '*'.
    Universal,
}

/// A compound selector is a sequence of simple selectors (no combinators).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Compound consisting of a single type selector.
    pub fn of_type(type_name: &str) -> Self {
        Self {
            simples: vec![SimpleSelector::Type(type_name.to_owned())],
        }
    }

    /// Compound consisting of the universal selector.
    pub fn universal() -> Self {
        Self {
            simples: vec![SimpleSelector::Universal],
        }
    }

    /// Append a simple selector.
    #[must_use]
    pub fn with(mut self, simple: SimpleSelector) -> Self {
        self.simples.push(simple);
        self
    }

    /// Append a class selector.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.with(SimpleSelector::Class(class.to_owned()))
    }

    /// Append a pseudo-class selector.
    #[must_use]
    pub fn with_pseudo_class(self, pseudo_class: &str) -> Self {
        self.with(SimpleSelector::PseudoClass(pseudo_class.to_owned()))
    }

    /// The type name this compound requires, if it has a type selector.
    pub fn required_type(&self) -> Option<&str> {
        self.simples.iter().find_map(|simple| match simple {
            SimpleSelector::Type(type_name) => Some(type_name.as_str()),
            _ => None,
        })
    }
}

/// Combinators between compounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector is one or more compounds separated by combinators.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// Selector made of a single compound.
    pub const fn compound(first: CompoundSelector) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Extend the selector to the right, e.g. `first` + `Child` + `next`.
    #[must_use]
    pub fn then(mut self, combinator: Combinator, next: CompoundSelector) -> Self {
        self.rest.push((combinator, next));
        self
    }

    /// The right-most compound, i.e. the one that must match the element itself.
    pub fn subject(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |pair| &pair.1)
    }
}

/// A selector list separated by commas.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl From<ComplexSelector> for SelectorList {
    fn from(selector: ComplexSelector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }
}

impl From<CompoundSelector> for SelectorList {
    fn from(compound: CompoundSelector) -> Self {
        Self::from(ComplexSelector::compound(compound))
    }
}
