//! Key ordering supplied at construction time.
//!
//! The ordering is the only configuration a tree accepts. [`Natural`] defers to [`Ord`] and is
//! the default type parameter everywhere; any `Fn(&T, &T) -> Ordering` closure may be used
//! instead through [`TreeMap::with_comparator`](crate::TreeMap::with_comparator).

use core::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent for the lifetime of a tree: changing the answer for a
/// pair of keys already stored is a logic error, with the same consequences as violating
/// [`Ord`] for a standard `BTreeMap`.
pub trait Compare<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The ordering given by the key type's [`Ord`] implementation.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use rubi_tree::{Compare, Natural};
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
/// assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
