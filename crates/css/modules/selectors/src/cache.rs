//! Per-type selector candidate caching.
//!
//! Only "which rules can ever apply to elements of this type" is cached. Whether a
//! candidate applies to a particular element right now is recomputed on every pass.

use crate::TypeKey;
use anyhow::{Result, bail};
use core::iter::Copied;
use core::slice::Iter;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Candidate rules for one type key, as declaration indices into the rule set the
/// list was built from. Always in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateList {
    rule_indices: SmallVec<[usize; 4]>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule index. Indices must be pushed in increasing order.
    #[inline]
    pub(crate) fn push(&mut self, rule_index: usize) {
        debug_assert!(
            self.rule_indices
                .last()
                .is_none_or(|&previous| previous < rule_index),
            "candidates must stay in declaration order"
        );
        self.rule_indices.push(rule_index);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rule_indices.len()
    }

    /// True if no rule of the rule set can ever apply to this type.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rule_indices.is_empty()
    }

    /// Candidate rule indices in declaration order.
    #[inline]
    pub fn iter(&self) -> Copied<Iter<'_, usize>> {
        self.rule_indices.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.rule_indices
    }
}

/// Collects indices in any order; the list is sorted and duplicates are dropped.
impl FromIterator<usize> for CandidateList {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut rule_indices: SmallVec<[usize; 4]> = iter.into_iter().collect();
        rule_indices.sort_unstable();
        rule_indices.dedup();
        Self { rule_indices }
    }
}

/// Maps a [`TypeKey`] to its [`CandidateList`].
///
/// A missing entry means the type has not been evaluated yet; an empty list means
/// it was evaluated and no rule can apply. Entries are write-once for the lifetime
/// of the cache, which is one rule set generation.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: HashMap<TypeKey, CandidateList>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache with room for `capacity` type keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Cached candidates for `key`, if the type has been evaluated.
    #[inline]
    pub fn lookup(&self, key: &TypeKey) -> Option<&CandidateList> {
        self.entries.get(key)
    }

    /// Store the candidates for a type evaluated for the first time.
    ///
    /// # Errors
    /// Returns an error if `key` already has an entry. That is a caller bug; the
    /// existing entry is left untouched.
    pub fn store(&mut self, key: TypeKey, candidates: CandidateList) -> Result<()> {
        match self.entries.entry(key) {
            Entry::Occupied(_) => {
                log::error!("MatchCache: refusing to overwrite entry for {key:?}");
                bail!("match cache already holds candidates for {key:?}");
            }
            Entry::Vacant(slot) => {
                log::trace!(
                    "MatchCache: stored {} candidate(s) for {key:?}",
                    candidates.len()
                );
                slot.insert(candidates);
                Ok(())
            }
        }
    }

    /// Whether `key` has been evaluated.
    #[inline]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of evaluated type keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
