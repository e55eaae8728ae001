use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{BitAnd, BitOr, BitXor, RangeBounds, Sub};

use tracing::debug;

use crate::augment::{Augment, NoAugment};
use crate::compare::{Compare, Natural};
use crate::error::Result;
use crate::order_statistic::SubtreeSizes;
use crate::tree_map::{self, Keys, OSRBTreeMap, RBTreeMap, TreeMap};

mod order_statistic;

/// An ordered set based on a red-black tree.
///
/// The set is a [`TreeMap`] with a `()` payload, so it shares the map's comparator and
/// augmentation parameters. See [`TreeMap`]'s documentation for a discussion of the ordering
/// and complexity guarantees.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item changes while it is in the set. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior resulting from such a
/// logic error is not specified, but will be encapsulated to the `TreeSet` that observed the
/// logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeSet;
///
/// // Type inference lets us omit an explicit type signature (which
/// // would be `RBTreeSet<&str>` in this example).
/// let mut books = RBTreeSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything.
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `RBTreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use rubi_tree::RBTreeSet;
///
/// let set = RBTreeSet::from([1, 2, 3]);
/// ```
pub struct TreeSet<T, C = Natural, A = NoAugment> {
    map: TreeMap<T, (), C, A>,
}

/// An ordered set without augmentation.
pub type RBTreeSet<T, C = Natural> = TreeSet<T, C, NoAugment>;

/// An ordered set that also answers rank and select queries in O(log n).
pub type OSRBTreeSet<T, C = Natural> = TreeSet<T, C, SubtreeSizes>;

/// An iterator over the items of a `TreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`TreeSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeSet;
///
/// let set = RBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: TreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `TreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: TreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: tree_map::IntoIter<T, ()>,
}

/// An iterator over a sub-range of items in a `TreeSet`.
///
/// This `struct` is created by the [`range`] method on [`TreeSet`].
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeSet;
///
/// let set = RBTreeSet::from([1, 2, 3, 4]);
/// let mut range = set.range(2..=3);
/// assert_eq!(range.next(), Some(&2));
/// assert_eq!(range.next_back(), Some(&3));
/// assert_eq!(range.next(), None);
/// ```
///
/// [`range`]: TreeSet::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T: 'a> {
    inner: tree_map::Range<'a, T, ()>,
}

impl<T> TreeSet<T> {
    /// Makes a new, empty `RBTreeSet` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        TreeSet { map: RBTreeMap::new() }
    }
}

impl<T> TreeSet<T, Natural, SubtreeSizes> {
    /// Makes a new, empty `OSRBTreeSet` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeSet;
    ///
    /// let mut set = OSRBTreeSet::new();
    /// set.insert('b');
    /// set.insert('a');
    /// assert_eq!(set.select(1), Ok(&'b'));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        TreeSet { map: OSRBTreeMap::new() }
    }
}

impl<T, C, A: Augment + Default> TreeSet<T, C, A> {
    /// Makes a new, empty set ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 3, 2]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(compare: C) -> Self {
        TreeSet {
            map: TreeMap::with_comparator(compare),
        }
    }

    /// Makes a new, empty set with room for at least `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self
    where
        C: Default,
    {
        TreeSet {
            map: TreeMap::with_capacity(capacity),
        }
    }
}

impl<T, C, A: Augment> TreeSet<T, C, A> {
    /// Makes a new, empty set with an explicit comparator and augmentation.
    #[must_use]
    pub fn with_augment(compare: C, augment: A) -> Self {
        TreeSet {
            map: TreeMap::with_augment(compare, augment),
        }
    }
}

impl<T, C, A> TreeSet<T, C, A> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut v = RBTreeSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of items the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the comparator that orders this set.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the augmentation attached to this set.
    #[must_use]
    pub const fn augment(&self) -> &A {
        self.map.augment()
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Gets an iterator that visits the elements in the set in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the set.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::Bound::Included;
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(3);
    /// set.insert(5);
    /// set.insert(8);
    /// for &elem in set.range((Included(&4), Included(&8))) {
    ///     println!("{elem}");
    /// }
    /// assert_eq!(Some(&5), set.range(4..).next());
    /// ```
    pub fn range<K, R>(&self, range: R) -> Range<'_, T>
    where
        K: ?Sized,
        T: Borrow<K>,
        C: Compare<K>,
        R: RangeBounds<K>,
    {
        Range {
            inner: self.map.range(range),
        }
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns the first (minimum) element in the set.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`](crate::TreeError::EmptyContainer) if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(set.first(), Ok(&1));
    /// assert_eq!(set.last(), Ok(&9));
    /// ```
    pub fn first(&self) -> Result<&T> {
        self.map.first().map(|(k, ())| k)
    }

    /// Returns the last (maximum) element in the set.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`](crate::TreeError::EmptyContainer) if the set is empty.
    pub fn last(&self) -> Result<&T> {
        self.map.last().map(|(k, ())| k)
    }

    /// Returns the smallest element strictly greater than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(set.strict_successor_of(&5), Some(&7));
    /// assert_eq!(set.strict_successor_of(&9), None);
    /// ```
    pub fn strict_successor_of<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.strict_successor_of(value).map(|(k, ())| k)
    }

    /// Returns the largest element strictly less than `value`.
    pub fn strict_predecessor_of<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.strict_predecessor_of(value).map(|(k, ())| k)
    }

    /// Returns `value` itself if present, otherwise the smallest greater element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([5, 3, 8]);
    /// assert_eq!(set.weak_successor_of(&5), Some(&5));
    /// assert_eq!(set.weak_successor_of(&6), Some(&8));
    /// ```
    pub fn weak_successor_of<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.weak_successor_of(value).map(|(k, ())| k)
    }

    /// Returns `value` itself if present, otherwise the largest smaller element.
    pub fn weak_predecessor_of<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.weak_predecessor_of(value).map(|(k, ())| k)
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    ///
    /// `other` may be any sequence of values that borrow as `T`, including another set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let mut b = RBTreeSet::new();
    /// b.insert(4);
    ///
    /// assert_eq!(a.is_disjoint(&b), true);
    /// b.insert(1);
    /// assert_eq!(a.is_disjoint(&b), false);
    /// assert_eq!(a.is_disjoint([7, 8, 9]), true);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log n) for `m` elements in `other`.
    #[must_use]
    pub fn is_disjoint<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        !self.overlaps(other)
    }

    /// Returns `true` if `self` and `other` share at least one element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert!(set.overlaps(&[9, 3]));
    /// assert!(!set.overlaps(vec![4, 5]));
    /// ```
    #[must_use]
    pub fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        other.into_iter().any(|value| {
            let value: &T = value.borrow();
            self.contains(value)
        })
    }

    /// Returns `true` if `other` contains at least all the values in `self`.
    ///
    /// Repeated values in `other` are counted once.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let sup = RBTreeSet::from([1, 2, 3]);
    /// let mut sub = RBTreeSet::new();
    ///
    /// assert_eq!(sub.is_subset_of(&sup), true);
    /// sub.insert(2);
    /// assert_eq!(sub.is_subset_of(&sup), true);
    /// sub.insert(4);
    /// assert_eq!(sub.is_subset_of(&sup), false);
    /// assert_eq!(sub.is_subset_of([4, 4, 2]), true);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log n) for `m` elements in `other`.
    #[must_use]
    pub fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        let compare = self.comparator();
        let mut matched = RBTreeSet::with_comparator(|a: &&T, b: &&T| compare.compare(*a, *b));
        for value in other {
            let value: &T = value.borrow();
            if let Some(found) = self.get(value) {
                matched.insert(found);
                if matched.len() == self.len() {
                    break;
                }
            }
        }
        matched.len() == self.len()
    }

    /// Returns `true` if `self` contains at least all the values in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert!(set.is_superset_of(&RBTreeSet::from([3, 1])));
    /// assert!(set.is_superset_of([2, 2, 2]));
    /// assert!(!set.is_superset_of([2, 5]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log n) for `m` elements in `other`.
    #[must_use]
    pub fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        other.into_iter().all(|value| {
            let value: &T = value.borrow();
            self.contains(value)
        })
    }
}

impl<T, C, A: Augment> TreeSet<T, C, A> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. An equal element already in the set is
    /// left untouched and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        C: Compare<T>,
    {
        self.map.try_insert(value, ())
    }

    /// Adds a value to the set, replacing and returning an existing equal element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(Vec::<i32>::new());
    ///
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
    /// set.replace(Vec::with_capacity(10));
    /// assert_eq!(set.get(&[][..]).unwrap().capacity(), 10);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T>
    where
        C: Compare<T>,
    {
        let old = self.map.remove_entry(&value).map(|(k, ())| k);
        self.map.try_insert(value, ());
        old
    }

    /// If the set contains an element equal to the value, removes it from the set and drops it.
    /// Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to the value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`](crate::TreeError::EmptyContainer) if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(set.pop_first(), Ok(1));
    /// assert_eq!(set.len(), 6);
    /// assert_eq!(set.first(), Ok(&3));
    /// ```
    pub fn pop_first(&mut self) -> Result<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`](crate::TreeError::EmptyContainer) if the set is empty.
    pub fn pop_last(&mut self) -> Result<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3, 4, 5, 6]);
    /// // Keep only the even numbers.
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, ()| f(k));
    }

    /// Adds every element of `other` to the set.
    ///
    /// # Complexity
    ///
    /// O(m log(n + m)) for `m` elements in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2]);
    /// set.union_with([2, 3]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn union_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
        C: Compare<T>,
    {
        let before = self.len();
        for value in other {
            self.insert(value);
        }
        debug!(before, after = self.len(), "union_with");
    }

    /// Keeps only the elements that also occur in `other`.
    ///
    /// # Complexity
    ///
    /// O(m log n + n) for `m` elements in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3, 4]);
    /// set.intersect_with(&[4, 2, 9]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2, 4]);
    /// ```
    pub fn intersect_with<I>(&mut self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        let before = self.len();
        let mut kept = alloc::vec::Vec::new();
        for value in other {
            let value: &T = value.borrow();
            if let Some(found) = self.take(value) {
                kept.push(found);
            }
        }
        self.clear();
        for value in kept {
            self.insert(value);
        }
        debug!(before, after = self.len(), "intersect_with");
    }

    /// Removes every element that occurs in `other`.
    ///
    /// # Complexity
    ///
    /// O(m log n) for `m` elements in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3, 4]);
    /// set.except_with(&[4, 2, 9]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn except_with<I>(&mut self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
        C: Compare<T>,
    {
        let before = self.len();
        for value in other {
            let value: &T = value.borrow();
            self.remove(value);
        }
        debug!(before, after = self.len(), "except_with");
    }

    /// Keeps the elements found in exactly one of `self` and `other`.
    ///
    /// Repeated values in `other` count once.
    ///
    /// # Complexity
    ///
    /// O(m log(n + m)) for `m` elements in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3]);
    /// set.symmetric_except_with([3, 4, 4]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 4]);
    /// ```
    pub fn symmetric_except_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
        C: Compare<T>,
    {
        let before = self.len();
        let distinct: alloc::vec::Vec<T> = {
            let compare = self.comparator();
            let mut distinct = RBTreeSet::with_comparator(|a: &T, b: &T| compare.compare(a, b));
            for value in other {
                distinct.insert(value);
            }
            distinct.into_iter().collect()
        };
        for value in distinct {
            if !self.remove(&value) {
                self.insert(value);
            }
        }
        debug!(before, after = self.len(), "symmetric_except_with");
    }
}

impl<T, C: Clone, A: Augment + Default> TreeSet<T, C, A> {
    fn empty_like(&self) -> Self {
        TreeSet::with_augment(self.comparator().clone(), A::default())
    }
}

impl<T: Clone, C: Clone, A: Clone> Clone for TreeSet<T, C, A> {
    fn clone(&self) -> Self {
        TreeSet { map: self.map.clone() }
    }
}

impl<T: PartialEq, C, A> PartialEq for TreeSet<T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq, C, A> Eq for TreeSet<T, C, A> {}

impl<T: fmt::Debug, C, A> fmt::Debug for TreeSet<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default, A: Augment + Default> Default for TreeSet<T, C, A> {
    fn default() -> Self {
        TreeSet { map: TreeMap::default() }
    }
}

impl<T, C: Compare<T> + Default, A: Augment + Default> FromIterator<T> for TreeSet<T, C, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Compare<T>, A: Augment> Extend<T> for TreeSet<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>, A: Augment> Extend<&'a T> for TreeSet<T, C, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: Augment + Default, const N: usize> From<[T; N]> for TreeSet<T, Natural, A>
where
    Natural: Compare<T>,
{
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C, A> BitOr<&TreeSet<T, C, A>> for &TreeSet<T, C, A>
where
    T: Clone,
    C: Compare<T> + Clone,
    A: Augment + Clone,
{
    type Output = TreeSet<T, C, A>;

    /// Returns the union of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let b = RBTreeSet::from([3, 4, 5]);
    /// let result = &a | &b;
    /// assert_eq!(result.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    /// ```
    fn bitor(self, rhs: &TreeSet<T, C, A>) -> TreeSet<T, C, A> {
        let mut out = self.clone();
        out.union_with(rhs.iter().cloned());
        out
    }
}

impl<T, C, A> BitAnd<&TreeSet<T, C, A>> for &TreeSet<T, C, A>
where
    T: Clone,
    C: Compare<T> + Clone,
    A: Augment + Default,
{
    type Output = TreeSet<T, C, A>;

    /// Returns the intersection of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let b = RBTreeSet::from([2, 3, 4]);
    /// let result = &a & &b;
    /// assert_eq!(result.iter().copied().collect::<Vec<_>>(), [2, 3]);
    /// ```
    fn bitand(self, rhs: &TreeSet<T, C, A>) -> TreeSet<T, C, A> {
        let (small, large) = if self.len() <= rhs.len() { (self, rhs) } else { (rhs, self) };
        let mut out = self.empty_like();
        out.extend(small.iter().filter(|v| large.contains(*v)).cloned());
        out
    }
}

impl<T, C, A> Sub<&TreeSet<T, C, A>> for &TreeSet<T, C, A>
where
    T: Clone,
    C: Compare<T> + Clone,
    A: Augment + Default,
{
    type Output = TreeSet<T, C, A>;

    /// Returns the difference of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let b = RBTreeSet::from([2]);
    /// let diff = &a - &b;
    /// assert_eq!(diff.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    fn sub(self, rhs: &TreeSet<T, C, A>) -> TreeSet<T, C, A> {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|v| !rhs.contains(*v)).cloned());
        out
    }
}

impl<T, C, A> BitXor<&TreeSet<T, C, A>> for &TreeSet<T, C, A>
where
    T: Clone,
    C: Compare<T> + Clone,
    A: Augment + Clone,
{
    type Output = TreeSet<T, C, A>;

    /// Returns the symmetric difference of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let b = RBTreeSet::from([2, 3, 4]);
    /// let result = &a ^ &b;
    /// assert_eq!(result.iter().copied().collect::<Vec<_>>(), [1, 4]);
    /// ```
    fn bitxor(self, rhs: &TreeSet<T, C, A>) -> TreeSet<T, C, A> {
        let mut out = self.clone();
        out.symmetric_except_with(rhs.iter().cloned());
        out
    }
}

impl<T, C, A> IntoIterator for TreeSet<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the set's contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, C, A> IntoIterator for &'a TreeSet<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, ())| k)
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back().map(|(k, ())| k)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::TreeError;
    use alloc::vec::Vec;

    #[test]
    fn scenario_from_sorted_insertions() {
        let mut set = RBTreeSet::new();
        for k in [5, 3, 8, 1, 4, 7, 9] {
            assert!(set.insert(k));
        }
        assert_eq!(set.first(), Ok(&1));
        assert_eq!(set.last(), Ok(&9));
        assert_eq!(set.strict_successor_of(&5), Some(&7));
        assert_eq!(set.weak_successor_of(&5), Some(&5));
        assert_eq!(set.pop_first(), Ok(1));
        assert_eq!(set.len(), 6);
        assert_eq!(set.first(), Ok(&3));
        set.map.validate();
    }

    #[test]
    fn empty_set_errors() {
        let mut set: RBTreeSet<u8> = RBTreeSet::new();
        assert_eq!(set.first(), Err(TreeError::EmptyContainer));
        assert_eq!(set.pop_last(), Err(TreeError::EmptyContainer));
    }

    #[test]
    fn replace_swaps_the_stored_element() {
        #[derive(Debug)]
        struct Tagged(i32, &'static str);

        let mut set = RBTreeSet::with_comparator(|a: &Tagged, b: &Tagged| a.0.cmp(&b.0));
        assert!(set.insert(Tagged(1, "old")));
        assert!(!set.insert(Tagged(1, "ignored")));
        assert_eq!(set.first().map(|t| t.1), Ok("old"));

        let previous = set.replace(Tagged(1, "new"));
        assert_eq!(previous.map(|t| t.1), Some("old"));
        assert_eq!(set.first().map(|t| t.1), Ok("new"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn predicates_across_augmentations() {
        let plain = RBTreeSet::from([1, 2, 3]);
        let ranked: OSRBTreeSet<i32> = [1, 2, 3, 4].into_iter().collect();
        assert!(plain.is_subset_of(&ranked));
        assert!(ranked.is_superset_of(&plain));
        assert!(plain.overlaps(&ranked));
        assert!(!plain.is_disjoint(&ranked));
        assert!(!ranked.is_subset_of(&plain));
    }

    #[test]
    fn algebra_keeps_tree_valid() {
        let mut set: RBTreeSet<i32> = (0..100).collect();
        set.intersect_with((50..150).collect::<Vec<_>>());
        set.map.validate();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), (50..100).collect::<Vec<_>>());

        set.except_with(&[60, 70, 80]);
        set.symmetric_except_with([99, 100]);
        set.map.validate();
        assert_eq!(set.len(), 47);
        assert!(set.contains(&100));
        assert!(!set.contains(&99));
    }

    #[test]
    fn symmetric_difference_counts_repeated_values_once() {
        let mut set = RBTreeSet::from([1]);
        set.symmetric_except_with([2, 2]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2]);

        let mut set = RBTreeSet::from([1, 3]);
        set.symmetric_except_with([3, 3, 3]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1]);
        set.map.validate();
    }

    #[test]
    fn predicates_accept_plain_sequences() {
        let set = RBTreeSet::from([2, 4, 6]);
        assert!(set.overlaps([5, 6]));
        assert!(set.is_disjoint(&[1, 3, 5]));
        assert!(set.is_superset_of(alloc::vec![4, 4, 2]));
        assert!(set.is_subset_of([6, 6, 4, 2, 9]));
        assert!(!set.is_subset_of([2, 2, 4, 4]));
        assert!(RBTreeSet::<i32>::new().is_subset_of(core::iter::empty::<i32>()));
    }
}
