//! Selector + setter style rules.

use anyhow::{Context as _, Result};
use core::cell::RefCell;
use css_selectors::{
    ElementAdapter, MatchStrength, SelectorList, StyleRule, check_selector_list,
    classify_selector_list, matches_selector_list,
};
use std::collections::BTreeMap;

/// A property assignment applied by a style when it is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setter {
    pub property: String,
    pub value: String,
}

impl Setter {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// An element's registration with a style, refreshed every time the style is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    /// `ElementAdapter::unique_key` of the subscribed element.
    pub element: u64,
    /// `ElementAdapter::unique_key` of the host passed on the latest attach.
    pub host: Option<u64>,
    /// Strength reported on the latest attach.
    pub strength: MatchStrength,
    /// Whether the selector matched the element on the latest attach.
    pub active: bool,
    /// How many times the element has been attached.
    pub attach_count: u64,
}

/// A selector and the setters it applies to matching elements.
///
/// Attaching a style to an element subscribes that element, so that a later change
/// in its dynamic state (classes, pseudo-classes, attributes) can re-evaluate it.
#[derive(Debug)]
pub struct Style {
    selector: SelectorList,
    setters: Vec<Setter>,
    subscriptions: RefCell<BTreeMap<u64, Subscription>>,
}

impl Style {
    pub fn new(selector: impl Into<SelectorList>, setters: Vec<Setter>) -> Self {
        Self {
            selector: selector.into(),
            setters,
            subscriptions: RefCell::new(BTreeMap::new()),
        }
    }

    #[inline]
    pub const fn selector(&self) -> &SelectorList {
        &self.selector
    }

    #[inline]
    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }

    /// Current subscription of the element with unique key `element`.
    pub fn subscription(&self, element: u64) -> Option<Subscription> {
        self.subscriptions.borrow().get(&element).copied()
    }

    /// Number of subscribed elements.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Sum of attach calls over all subscribed elements.
    pub fn total_attach_count(&self) -> u64 {
        self.subscriptions
            .borrow()
            .values()
            .fold(0, |total, subscription| {
                total.saturating_add(subscription.attach_count)
            })
    }

    /// Drop the subscription of `element`, e.g. when it leaves the tree.
    pub fn detach(&self, element: u64) -> bool {
        self.subscriptions.borrow_mut().remove(&element).is_some()
    }

    fn subscribe(&self, element: u64, host: Option<u64>, strength: MatchStrength, active: bool) {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let subscription = subscriptions.entry(element).or_insert(Subscription {
            element,
            host,
            strength,
            active,
            attach_count: 0,
        });
        subscription.host = host;
        subscription.strength = strength;
        subscription.active = active;
        subscription.attach_count = subscription.attach_count.saturating_add(1);
    }
}

impl<A: ElementAdapter> StyleRule<A> for Style {
    fn try_attach(
        &self,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength> {
        check_selector_list(&self.selector).context("cannot attach malformed style")?;

        let strength = classify_selector_list(adapter, element, &self.selector);
        if strength.is_never() {
            return Ok(strength);
        }

        let active = matches_selector_list(adapter, element, &self.selector);
        self.subscribe(
            adapter.unique_key(element),
            host.map(|host_element| adapter.unique_key(host_element)),
            strength,
            active,
        );
        Ok(strength)
    }
}
