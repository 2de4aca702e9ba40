//! Style type keys.

use core::fmt;
use lasso::{Rodeo, Spur};

/// Identifies an element's style-relevant type.
///
/// Two elements of the same style type must produce equal keys. Elements without
/// an identifiable type share [`TypeKey::UNKNOWN`], which is cached like any other key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey(Option<Spur>);

impl TypeKey {
    /// Key shared by every element whose type could not be resolved.
    pub const UNKNOWN: Self = Self(None);

    /// Whether this is the [`TypeKey::UNKNOWN`] sentinel.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0.is_none()
    }
}

impl From<Spur> for TypeKey {
    #[inline]
    fn from(symbol: Spur) -> Self {
        Self(Some(symbol))
    }
}

/// Interner that mints [`TypeKey`]s from type names.
///
/// Element models keep one of these so that every `button` maps to the same key.
#[derive(Default)]
pub struct StyleKeys {
    names: Rodeo,
}

impl fmt::Debug for StyleKeys {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StyleKeys")
            .field("interned", &self.names.len())
            .finish()
    }
}

impl StyleKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for `type_name`, interning it on first use.
    pub fn intern(&mut self, type_name: &str) -> TypeKey {
        TypeKey::from(self.names.get_or_intern(type_name))
    }

    /// Key for `type_name` if it was interned before.
    pub fn get(&self, type_name: &str) -> Option<TypeKey> {
        self.names.get(type_name).map(TypeKey::from)
    }

    /// Type name behind `key`; `None` for [`TypeKey::UNKNOWN`] or foreign keys.
    pub fn name_of(&self, key: TypeKey) -> Option<&str> {
        key.0.and_then(|symbol| self.names.try_resolve(&symbol))
    }
}
