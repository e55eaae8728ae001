#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// An opaque reference to a node slot inside a tree.
///
/// [`Handle::NIL`] is the sentinel: it stands for every absent child and for the
/// parent of the root. Any other handle names exactly one live entry of the tree it
/// was obtained from. Handles are only meaningful while the tree is not mutated
/// structurally, which is why they only surface through [`crate::Augment`] hooks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Handle(RawHandle);

impl Handle {
    /// The sentinel handle.
    pub const NIL: Self = Self(0);

    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero (reserved for NIL) and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self((index + 1) as RawHandle)
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        assert!(!self.is_nil(), "`Handle::to_index()` - called on `Handle::NIL`!");
        (self.0 - 1) as usize
    }

    /// Returns `true` if this is the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// A dense slot number suitable for indexing side tables.
    ///
    /// The sentinel is slot `0`; live entries use `1..`. Slots are reused after removal.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::NIL
    }
}
