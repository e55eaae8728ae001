use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Bound, Index, RangeBounds};

use crate::augment::{Augment, NoAugment, TreeView};
use crate::compare::{Compare, Natural};
use crate::error::{Result, TreeError};
use crate::order_statistic::SubtreeSizes;
use crate::raw::{Arena, Entry, Handle, InsertResult, Links, RawRBTree, next_in, prev_in};

mod order_statistic;

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
fn validate_range_bounds<T, C, R>(compare: &C, range: &R)
where
    T: ?Sized,
    C: Compare<T>,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let ordering = compare.compare(start, end);
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                ordering == Ordering::Less
            } else {
                ordering != Ordering::Greater
            };
        assert!(valid, "range start is greater than range end in TreeMap");
    }
}

/// An ordered map based on a [red-black tree].
///
/// Keys are kept in the order given by the map's comparator `C`: [`Natural`] (the key's [`Ord`])
/// unless another [`Compare`] implementation is supplied through
/// [`with_comparator`](TreeMap::with_comparator). The augmentation `A` is notified of every
/// structural change through the [`Augment`] hooks; the two ready-made instantiations are
/// [`RBTreeMap`] (no augmentation) and [`OSRBTreeMap`] (subtree sizes, adding rank and select).
///
/// Lookups, insertions, removals and the successor/predecessor queries take O(log n).
/// Iterators produce entries in ascending key order and take amortized constant time per item.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the map. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `TreeMap` that observed it and will not
/// result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeMap;
///
/// let mut movie_reviews = RBTreeMap::new();
///
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// movie_reviews.remove("The Blues Brothers");
///
/// // The closest title at or after "P".
/// let (title, _) = movie_reviews.weak_successor_of("P").unwrap();
/// assert_eq!(*title, "Pulp Fiction");
///
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A custom ordering:
///
/// ```
/// use rubi_tree::RBTreeMap;
///
/// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.extend([(1, "one"), (3, "three"), (2, "two")]);
/// assert_eq!(map.first().unwrap(), (&3, &"three"));
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct TreeMap<K, V, C = Natural, A = NoAugment> {
    raw: RawRBTree<K, V, C, A>,
}

/// An ordered map without augmentation.
pub type RBTreeMap<K, V, C = Natural> = TreeMap<K, V, C, NoAugment>;

/// An ordered map that also answers rank and select queries in O(log n).
pub type OSRBTreeMap<K, V, C = Natural> = TreeMap<K, V, C, SubtreeSizes>;

/// An iterator over the entries of a `TreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: TreeView<'a, K, V>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

/// A mutable iterator over the entries of a `TreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`TreeMap`]. See its
/// documentation for more.
///
/// [`iter_mut`]: TreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    links: &'a [Links],
    entries: *mut Option<Entry<K, V>>,
    front: Handle,
    back: Handle,
    remaining: usize,
    _marker: PhantomData<&'a mut Entry<K, V>>,
}

// SAFETY: IterMut behaves as `&mut [(K, V)]`, so it is Send/Sync when K and V are.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a `TreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`].
///
/// [`keys`]: TreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`].
///
/// [`values`]: TreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`TreeMap`].
///
/// [`values_mut`]: TreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An iterator over a sub-range of entries in a `TreeMap`.
///
/// This `struct` is created by the [`range`] method on [`TreeMap`].
///
/// # Examples
///
/// ```
/// use rubi_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
/// let mut range = map.range(2..4);
/// assert_eq!(range.next(), Some((&2, &"b")));
/// assert_eq!(range.next_back(), Some((&3, &"c")));
/// assert_eq!(range.next(), None);
/// ```
///
/// [`range`]: TreeMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    tree: TreeView<'a, K, V>,
    front: Handle,
    back: Handle,
    done: bool,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own beyond the sentinel slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_augment(Natural, NoAugment)
    }
}

impl<K, V> TreeMap<K, V, Natural, SubtreeSizes> {
    /// Makes a new, empty `OSRBTreeMap` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.select(0).unwrap(), (&1, &"a"));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_augment(Natural, SubtreeSizes::default())
    }
}

impl<K, V, C, A: Augment + Default> TreeMap<K, V, C, A> {
    /// Makes a new, empty map ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut by_length = RBTreeMap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// by_length.insert("ccc", 3);
    /// by_length.insert("a", 1);
    /// assert_eq!(by_length.keys().copied().collect::<Vec<_>>(), ["a", "ccc"]);
    /// ```
    #[must_use]
    pub fn with_comparator(compare: C) -> Self {
        Self::with_augment(compare, A::default())
    }

    /// Makes a new, empty map with room for at least `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self
    where
        C: Default,
    {
        TreeMap {
            raw: RawRBTree::with_capacity(capacity, C::default(), A::default()),
        }
    }
}

impl<K, V, C, A: Augment> TreeMap<K, V, C, A> {
    /// Makes a new, empty map with an explicit comparator and augmentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::{NoAugment, TreeMap};
    ///
    /// let mut map = TreeMap::with_augment(|a: &i32, b: &i32| b.cmp(a), NoAugment);
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.first(), Ok((&2, &"b")));
    /// ```
    #[must_use]
    pub fn with_augment(compare: C, augment: A) -> Self {
        TreeMap {
            raw: RawRBTree::new(compare, augment),
        }
    }
}

impl<K, V, C, A> TreeMap<K, V, C, A> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the comparator that orders this map.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the augmentation attached to this map.
    #[must_use]
    pub const fn augment(&self) -> &A {
        self.raw.augment()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.pair(self.raw.find(key))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let h = self.raw.find(key);
        if h.is_nil() {
            None
        } else {
            Some(self.raw.key_value_mut(h).1)
        }
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        !self.raw.find(key).is_nil()
    }

    /// Returns the first key-value pair in the map.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::{RBTreeMap, TreeError};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.first(), Err(TreeError::EmptyContainer));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first(), Ok((&1, &"a")));
    /// ```
    pub fn first(&self) -> Result<(&K, &V)> {
        self.pair(self.raw.first()).ok_or(TreeError::EmptyContainer)
    }

    /// Returns the last key-value pair in the map.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`] if the map is empty.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.pair(self.raw.last()).ok_or(TreeError::EmptyContainer)
    }

    /// Returns the first key-value pair in the map, or `None` if it is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.pair(self.raw.first())
    }

    /// Returns the last key-value pair in the map, or `None` if it is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.pair(self.raw.last())
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a"), (3, "c"), (5, "e")]);
    /// assert_eq!(map.strict_successor_of(&3), Some((&5, &"e")));
    /// assert_eq!(map.strict_successor_of(&4), Some((&5, &"e")));
    /// assert_eq!(map.strict_successor_of(&5), None);
    /// ```
    pub fn strict_successor_of<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.pair(self.raw.strict_successor(key))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    pub fn strict_predecessor_of<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.pair(self.raw.strict_predecessor(key))
    }

    /// Returns the entry for `key` if present, otherwise the one with the smallest greater key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(1, "a"), (3, "c")]);
    /// assert_eq!(map.weak_successor_of(&3), Some((&3, &"c")));
    /// assert_eq!(map.weak_successor_of(&2), Some((&3, &"c")));
    /// assert_eq!(map.weak_successor_of(&4), None);
    /// ```
    pub fn weak_successor_of<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.pair(self.raw.weak_successor(key))
    }

    /// Returns the entry for `key` if present, otherwise the one with the largest smaller key.
    pub fn weak_predecessor_of<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.pair(self.raw.weak_predecessor(key))
    }

    /// Constructs a double-ended iterator over a sub-range of entries in the map.
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
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<T>,
        T: ?Sized,
        C: Compare<T>,
        R: RangeBounds<T>,
    {
        let compare = self.raw.comparator();
        validate_range_bounds(compare, &range);

        let front = match range.start_bound() {
            Bound::Included(key) => self.raw.weak_successor(key),
            Bound::Excluded(key) => self.raw.strict_successor(key),
            Bound::Unbounded => self.raw.first(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.raw.weak_predecessor(key),
            Bound::Excluded(key) => self.raw.strict_predecessor(key),
            Bound::Unbounded => self.raw.last(),
        };
        let done = front.is_nil() || back.is_nil() || {
            let (lo, hi): (&T, &T) = (self.raw.key(front).borrow(), self.raw.key(back).borrow());
            compare.compare(lo, hi) == Ordering::Greater
        };

        Range {
            tree: self.raw.view(),
            front,
            back,
            done,
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self.raw.view(),
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let front = self.raw.first();
        let back = self.raw.last();
        let remaining = self.raw.len();
        let (links, entries) = self.raw.split_for_iter_mut();
        IterMut {
            links,
            entries,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    fn pair(&self, h: Handle) -> Option<(&K, &V)> {
        (!h.is_nil()).then(|| self.raw.key_value(h))
    }

    #[cfg(test)]
    pub(crate) fn validate(&self)
    where
        C: Compare<K>,
    {
        self.raw.validate_invariants();
    }
}

impl<K, V, C, A: Augment> TreeMap<K, V, C, A> {
    /// Inserts a key-value pair into the map, overwriting the value of an equal key.
    ///
    /// If the map did not have this key present, `None` is returned. Otherwise the value is
    /// updated, the old value is returned, and the stored key is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Compare<K>,
    {
        match self.raw.insert(key, value, true) {
            InsertResult::Replaced(old) => Some(old),
            InsertResult::Inserted | InsertResult::Rejected => None,
        }
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// Returns `true` if the pair was inserted. An existing entry is left unchanged and the
    /// supplied pair is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert!(map.try_insert(37, "a"));
    /// assert!(!map.try_insert(37, "b"));
    /// assert_eq!(map[&37], "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> bool
    where
        C: Compare<K>,
    {
        matches!(self.raw.insert(key, value, false), InsertResult::Inserted)
    }

    /// Removes a key from the map, returning its value if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.remove_entry(key)
    }

    /// Removes and returns the first element in the map.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.pop_first(), Ok((1, "a")));
    /// assert_eq!(map.pop_first(), Ok((2, "b")));
    /// assert!(map.pop_first().is_err());
    /// ```
    pub fn pop_first(&mut self) -> Result<(K, V)> {
        self.raw.pop_first().ok_or(TreeError::EmptyContainer)
    }

    /// Removes and returns the last element in the map.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyContainer`] if the map is empty.
    pub fn pop_last(&mut self) -> Result<(K, V)> {
        self.raw.pop_last().ok_or(TreeError::EmptyContainer)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let mut map: RBTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }
}

impl<K: Clone, V: Clone, C: Clone, A: Clone> Clone for TreeMap<K, V, C, A> {
    fn clone(&self) -> Self {
        TreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq, C, A> PartialEq for TreeMap<K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C, A> Eq for TreeMap<K, V, C, A> {}

impl<K: fmt::Debug, V: fmt::Debug, C, A> fmt::Debug for TreeMap<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default, A: Augment + Default> Default for TreeMap<K, V, C, A> {
    fn default() -> Self {
        Self::with_augment(C::default(), A::default())
    }
}

impl<K, V, C: Compare<K> + Default, A: Augment + Default> FromIterator<(K, V)> for TreeMap<K, V, C, A> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Compare<K>, A: Augment> Extend<(K, V)> for TreeMap<K, V, C, A> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, A: Augment + Default, const N: usize> From<[(K, V); N]> for TreeMap<K, V, Natural, A>
where
    Natural: Compare<K>,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, Q, V, C, A> Index<&Q> for TreeMap<K, V, C, A>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `TreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a TreeMap<K, V, C, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a mut TreeMap<K, V, C, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C, A> IntoIterator for TreeMap<K, V, C, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let v: Vec<_> = map.into_iter().collect();
    /// assert_eq!(v, [(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

// ─── Iter ───────────────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.front;
        self.front = next_in(self.tree.links, h);
        self.remaining -= 1;
        self.tree.entry(h)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.back;
        self.back = prev_in(self.tree.links, h);
        self.remaining -= 1;
        self.tree.entry(h)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree.clone(),
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── IterMut ────────────────────────────────────────────────────────────────

impl<'a, K, V> IterMut<'a, K, V> {
    fn entry(&mut self, h: Handle) -> (&'a K, &'a mut V) {
        // SAFETY: `entries` points into the arena borrowed mutably for `'a`, the arena is not
        // touched while the iterator lives, and the front/back cursors visit every live handle
        // at most once, so no two returned references alias.
        let entry = unsafe { Arena::get_mut_ptr(self.entries, h) };
        (&entry.key, &mut entry.value)
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.front;
        self.front = next_in(self.links, h);
        self.remaining -= 1;
        Some(self.entry(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.back;
        self.back = prev_in(self.links, h);
        self.remaining -= 1;
        Some(self.entry(h))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

// ─── IntoIter ───────────────────────────────────────────────────────────────

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

// ─── Keys / Values / ValuesMut ──────────────────────────────────────────────

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish()
    }
}

// ─── Range ──────────────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let h = self.front;
        if h == self.back {
            self.done = true;
        } else {
            self.front = next_in(self.tree.links, h);
        }
        self.tree.entry(h)
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let h = self.back;
        if h == self.front {
            self.done = true;
        } else {
            self.back = prev_in(self.tree.links, h);
        }
        self.tree.entry(h)
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree.clone(),
            front: self.front,
            back: self.back,
            done: self.done,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
