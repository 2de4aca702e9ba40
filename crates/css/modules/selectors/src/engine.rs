//! The matching entrypoint used by the styling pass.

use crate::{
    CandidateList, ElementAdapter, MatchCache, MatchStrength, RuleSet, StyleRule, TypeKey,
};
use anyhow::{Result, anyhow};

/// Counters describing how the cache has been used. Useful for perf assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Calls answered from an existing cache entry.
    pub cache_hits: u64,
    /// Calls that scanned the full rule set.
    pub cache_misses: u64,
    /// Hits whose cached candidate list was empty, answered without calling any rule.
    pub empty_fast_paths: u64,
    /// Total number of `StyleRule::try_attach` calls made.
    pub rule_evaluations: u64,
}

/// Matches rule sets against elements, caching candidate rules per style type.
///
/// An engine belongs to exactly one rule set generation: always pass the same
/// [`RuleSet`], and build a new engine when the rules change.
#[derive(Debug, Default)]
pub struct MatchEngine {
    cache: MatchCache,
    stats: MatchStats,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose cache has room for `capacity` style types.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: MatchCache::with_capacity(capacity),
            stats: MatchStats::default(),
        }
    }

    /// Read-only access to the per-type candidate cache.
    #[inline]
    pub const fn cache(&self) -> &MatchCache {
        &self.cache
    }

    #[inline]
    pub const fn stats(&self) -> MatchStats {
        self.stats
    }

    /// Attach `rule_set` to `element` and report how strongly it applies.
    ///
    /// The first element of a style type scans every rule, caches the rules that
    /// did not report `NeverMatches`, and returns `AlwaysMatches` if any were found.
    /// Later elements of the same type only re-evaluate the cached candidates and
    /// return the strongest result among them. Every candidate is evaluated even when
    /// the strongest possible result is already known, because attaching a rule also
    /// subscribes the element to that rule's dynamic triggers.
    ///
    /// # Errors
    /// Returns the first error raised by a rule, unchanged. If that happens while
    /// scanning for a new style type, nothing is cached for it. Also fails if a cached
    /// candidate does not exist in `rule_set`, which means the rules were replaced
    /// without discarding this engine.
    pub fn try_attach<A, R>(
        &mut self,
        rule_set: &RuleSet<R>,
        adapter: &A,
        element: A::Handle,
        host: Option<A::Handle>,
    ) -> Result<MatchStrength>
    where
        A: ElementAdapter,
        R: StyleRule<A>,
    {
        let key = adapter.style_key(element).unwrap_or(TypeKey::UNKNOWN);

        if let Some(candidates) = self.cache.lookup(&key) {
            self.stats.cache_hits = self.stats.cache_hits.saturating_add(1);
            if candidates.is_empty() {
                self.stats.empty_fast_paths = self.stats.empty_fast_paths.saturating_add(1);
                return Ok(MatchStrength::NeverMatches);
            }

            let mut result = MatchStrength::NeverMatches;
            for rule_index in candidates.iter() {
                let rule = rule_set.get(rule_index).ok_or_else(|| {
                    log::error!(
                        "MatchEngine: cached candidate {rule_index} for {key:?} is outside a rule set of {} rule(s)",
                        rule_set.len()
                    );
                    anyhow!("cached candidate {rule_index} does not exist in the rule set")
                })?;
                let strength = rule.try_attach(adapter, element, host)?;
                self.stats.rule_evaluations = self.stats.rule_evaluations.saturating_add(1);
                result = result.max(strength);
            }
            return Ok(result);
        }

        self.stats.cache_misses = self.stats.cache_misses.saturating_add(1);
        let mut candidates = CandidateList::new();
        for (rule_index, rule) in rule_set.iter().enumerate() {
            let strength = rule.try_attach(adapter, element, host)?;
            self.stats.rule_evaluations = self.stats.rule_evaluations.saturating_add(1);
            if strength.may_match() {
                candidates.push(rule_index);
            }
        }

        log::trace!(
            "MatchEngine: {key:?} has {} candidate(s) out of {} rule(s)",
            candidates.len(),
            rule_set.len()
        );
        // A miss reports any candidate as AlwaysMatches, unlike the max taken on hits.
        let found = !candidates.is_empty();
        self.cache.store(key, candidates)?;
        Ok(if found {
            MatchStrength::AlwaysMatches
        } else {
            MatchStrength::NeverMatches
        })
    }
}
