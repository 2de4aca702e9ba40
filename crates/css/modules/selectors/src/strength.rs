//! How strongly a rule is known to apply to an element.

/// Result of attaching a rule to an element, ordered from weakest to strongest.
///
/// `NeverMatches` means the rule structurally cannot apply to elements of this
/// type. The other two mean the rule may or does apply, depending on per-instance
/// state such as pseudo-classes, attributes or siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchStrength {
    #[default]
    NeverMatches,
    SometimesMatches,
    AlwaysMatches,
}

impl MatchStrength {
    /// True for [`MatchStrength::NeverMatches`].
    #[inline]
    pub const fn is_never(self) -> bool {
        matches!(self, Self::NeverMatches)
    }

    /// True unless the rule can never apply to this type.
    #[inline]
    pub const fn may_match(self) -> bool {
        !self.is_never()
    }

    /// Strongest of all strengths yielded by `strengths`; `NeverMatches` when empty.
    pub fn strongest<I>(strengths: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        strengths.into_iter().max().unwrap_or_default()
    }
}
