//! Component signatures.
//!
//! A [`Signature`] is a fixed-size bitset over [`ComponentKind`]s. Every live
//! entity has one recording which components it owns, and every system
//! declares one recording which components it requires. An entity matches a
//! system when its signature is a superset of the system's.

use crate::component::ComponentKind;

/// A bitset with bit `k` set iff component kind `k` is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u32);

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self(0);

    /// Maximum number of component kinds a signature can describe.
    pub const CAPACITY: usize = u32::BITS as usize;

    /// Create an empty signature.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Add a component kind, builder style.
    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Set the bit for `kind`.
    pub fn insert(&mut self, kind: ComponentKind) {
        self.0 |= kind.bit();
    }

    /// Clear the bit for `kind`.
    pub fn remove(&mut self, kind: ComponentKind) {
        self.0 &= !kind.bit();
    }

    /// Returns `true` if the bit for `kind` is set.
    #[must_use]
    pub const fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns `true` if every bit of `required` is also set here.
    #[must_use]
    pub const fn matches(self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns `true` if no bits are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the kinds whose bits are set, in kind order.
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ComponentKind> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$b}", self.0, width = ComponentKind::COUNT)
    }
}
