//! The rule capability consumed by the match engine, and ordered rule sets.

use crate::{ElementAdapter, MatchStrength};
use anyhow::Result;
use core::slice::Iter;
use std::rc::Rc;

/// A selector + setter bundle that can be attached to elements.
///
/// Rules are immutable and shared between many elements. Attaching may register
/// the element as an observer of the rule's dynamic triggers, so callers must
/// invoke it every time they need a result, even if an aggregate is already known.
pub trait StyleRule<A: ElementAdapter> {
    /// Attach this rule to `element`. `host` is an opaque context (e.g. the
    /// logical owner of the rule set) and is passed through unexamined.
    ///
    /// # Errors
    /// Returns an error if the rule is malformed. Callers must not retry.
    fn try_attach(
        &self,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength>;
}

impl<A: ElementAdapter, R: StyleRule<A> + ?Sized> StyleRule<A> for Box<R> {
    #[inline]
    fn try_attach(
        &self,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength> {
        (**self).try_attach(adapter, element, host)
    }
}

impl<A: ElementAdapter, R: StyleRule<A> + ?Sized> StyleRule<A> for Rc<R> {
    #[inline]
    fn try_attach(
        &self,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength> {
        (**self).try_attach(adapter, element, host)
    }
}

/// Ordered, immutable collection of rules. Declaration order is significant.
#[derive(Clone, Debug)]
pub struct RuleSet<R> {
    rules: Vec<R>,
}

impl<R> RuleSet<R> {
    pub const fn new(rules: Vec<R>) -> Self {
        Self { rules }
    }

    /// Number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule at declaration index `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rules.get(index)
    }

    /// Rules in declaration order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, R> {
        self.rules.iter()
    }
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<R> FromIterator<R> for RuleSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'set, R> IntoIterator for &'set RuleSet<R> {
    type Item = &'set R;
    type IntoIter = Iter<'set, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
