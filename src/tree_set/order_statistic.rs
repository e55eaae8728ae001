use core::borrow::Borrow;
use core::ops::Index;

use super::TreeSet;
use crate::compare::Compare;
use crate::error::Result;
use crate::order_statistic::SubtreeSizes;
use crate::Rank;

impl<T, C> TreeSet<T, C, SubtreeSizes> {
    /// Returns the `index`-th smallest element (zero-based).
    ///
    /// # Errors
    ///
    /// [`TreeError::IndexOutOfRange`](crate::TreeError::IndexOutOfRange) if
    /// `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([30, 10, 20]);
    /// assert_eq!(set.select(0), Ok(&10));
    /// assert!(set.select(3).is_err());
    /// ```
    pub fn select(&self, index: usize) -> Result<&T> {
        self.map.select(index).map(|(k, ())| k)
    }

    /// Returns the number of elements strictly smaller than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.rank(&20), 1);
    /// assert_eq!(set.rank(&25), 2);
    /// ```
    pub fn rank<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.rank(value).0
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if the
    /// value is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeSet;
    ///
    /// let set = OSRBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&25), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.rank_of(value)
    }

    /// Returns a reference to the element at position `rank` in sorted order, or `None` if
    /// `rank` is out of bounds.
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(k, ())| k)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rubi_tree::{OSRBTreeSet, Rank};
///
/// let set = OSRBTreeSet::from(['c', 'a', 'b']);
/// assert_eq!(set[Rank(0)], 'a');
/// assert_eq!(set[Rank(2)], 'c');
/// ```
impl<T, C> Index<Rank> for TreeSet<T, C, SubtreeSizes> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
