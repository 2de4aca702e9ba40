//! Styling sessions: one rule set generation and its match cache.

use crate::{Setter, Style};
use anyhow::Result;
use css_selectors::{ElementAdapter, MatchEngine, MatchStats, MatchStrength, RuleSet, StyleRule};
use log::{debug, info};
use tracing::info_span;

/// Tuning knobs for a [`StyleSession`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleSessionOptions {
    /// Number of style types to reserve room for in each generation's cache.
    pub cache_capacity: usize,
}

/// Outcome of one styling pass, in visiting order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylePass<H> {
    pub outcomes: Vec<(H, MatchStrength)>,
}

impl<H: Copy> StylePass<H> {
    /// Elements the rule set may apply to; their setters need applying.
    pub fn applied(&self) -> impl Iterator<Item = H> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.1.may_match())
            .map(|outcome| outcome.0)
    }

    /// Elements no rule can apply to.
    pub fn skipped(&self) -> impl Iterator<Item = H> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.1.is_never())
            .map(|outcome| outcome.0)
    }
}

/// Owns the active rule set and the match engine built for it.
///
/// The engine's cache is only valid for the rules it was built against, so
/// [`StyleSession::replace_rules`] throws it away instead of patching it.
#[derive(Debug)]
pub struct StyleSession<R> {
    rules: RuleSet<R>,
    engine: MatchEngine,
    options: StyleSessionOptions,
    /// Increments whenever the rule set is replaced.
    rules_epoch: u64,
}

impl<R> StyleSession<R> {
    pub fn new(rules: RuleSet<R>) -> Self {
        Self::with_options(rules, StyleSessionOptions::default())
    }

    pub fn with_options(rules: RuleSet<R>, options: StyleSessionOptions) -> Self {
        Self {
            rules,
            engine: MatchEngine::with_capacity(options.cache_capacity),
            options,
            rules_epoch: 0,
        }
    }

    #[inline]
    pub const fn rules(&self) -> &RuleSet<R> {
        &self.rules
    }

    /// Current rules epoch value.
    #[inline]
    pub const fn current_rules_epoch(&self) -> u64 {
        self.rules_epoch
    }

    /// Match engine of the current generation.
    #[inline]
    pub const fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[inline]
    pub const fn stats(&self) -> MatchStats {
        self.engine.stats()
    }

    /// Install a new rule set and start a fresh cache for it.
    pub fn replace_rules(&mut self, rules: RuleSet<R>) {
        debug!(
            "StyleSession: discarding cache with {} style type(s) from epoch {}",
            self.engine.cache().len(),
            self.rules_epoch
        );
        self.rules = rules;
        self.engine = MatchEngine::with_capacity(self.options.cache_capacity);
        self.rules_epoch = self.rules_epoch.wrapping_add(1);
        info!(
            "StyleSession: replaced rules (rules={}, epoch={})",
            self.rules.len(),
            self.rules_epoch
        );
    }

    /// Match the current rules against a single element.
    ///
    /// # Errors
    /// Returns the error of the first rule that fails to attach.
    pub fn match_element<A>(
        &mut self,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength>
    where
        A: ElementAdapter,
        R: StyleRule<A>,
    {
        self.engine.try_attach(&self.rules, adapter, element, host)
    }

    /// Match the current rules against `elements`, in the order given.
    ///
    /// # Errors
    /// Stops at and returns the error of the first rule that fails to attach.
    pub fn run_pass<A, I>(
        &mut self,
        adapter: &A,
        elements: I,
        host: Option<A::Handle>,
    ) -> Result<StylePass<A::Handle>>
    where
        A: ElementAdapter,
        R: StyleRule<A>,
        I: IntoIterator<Item = A::Handle>,
    {
        let _span = info_span!("style_pass", epoch = self.rules_epoch).entered();
        let mut outcomes = Vec::new();
        for element in elements {
            let strength = self.engine.try_attach(&self.rules, adapter, element, host)?;
            outcomes.push((element, strength));
        }
        debug!(
            "StyleSession: pass visited {} element(s), cache holds {} style type(s)",
            outcomes.len(),
            self.engine.cache().len()
        );
        Ok(StylePass { outcomes })
    }
}

impl StyleSession<Style> {
    /// Setters of every style that matched the element with unique key `element`
    /// on its latest attach, in declaration order. Conflicts are left to the cascade.
    pub fn matched_setters(&self, element: u64) -> Vec<&Setter> {
        self.rules
            .iter()
            .filter(|style| {
                style
                    .subscription(element)
                    .is_some_and(|subscription| subscription.active)
            })
            .flat_map(Style::setters)
            .collect()
    }
}
