use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::{Index, IndexMut};

use super::TreeMap;
use crate::compare::Compare;
use crate::error::{Result, TreeError};
use crate::order_statistic::SubtreeSizes;
use crate::raw::Handle;
use crate::Rank;

impl<K, V, C> TreeMap<K, V, C, SubtreeSizes> {
    /// Node holding the `index`-th smallest key, or `NIL` if out of range.
    fn handle_at(&self, index: usize) -> Handle {
        if index >= self.len() {
            return Handle::NIL;
        }

        let sizes = self.raw.augment();
        let mut x = self.raw.root();
        let mut k = index;
        while !x.is_nil() {
            let left = sizes.size(self.raw.left(x));
            match k.cmp(&left) {
                Ordering::Less => x = self.raw.left(x),
                Ordering::Equal => return x,
                Ordering::Greater => {
                    k -= left + 1;
                    x = self.raw.right(x);
                }
            }
        }
        Handle::NIL
    }

    /// Returns the entry with the `index`-th smallest key (zero-based).
    ///
    /// # Errors
    ///
    /// [`TreeError::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::{OSRBTreeMap, TreeError};
    ///
    /// let map = OSRBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.select(0), Ok((&10, &"a")));
    /// assert_eq!(map.select(2), Ok((&30, &"c")));
    /// assert_eq!(map.select(3), Err(TreeError::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn select(&self, index: usize) -> Result<(&K, &V)> {
        self.get_by_rank(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the number of keys strictly smaller than `key`, together with the value stored
    /// under `key` if it is present.
    ///
    /// The count is meaningful for absent keys too: it is the position `key` would take if it
    /// were inserted.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&20), (1, Some(&"b")));
    /// assert_eq!(map.rank(&25), (2, None));
    /// assert_eq!(map.rank(&99), (3, None));
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> (usize, Option<&V>)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let sizes = self.raw.augment();
        let compare = self.raw.comparator();
        let mut x = self.raw.root();
        let mut rank = 0;
        while !x.is_nil() {
            match compare.compare(key, self.raw.key(x).borrow()) {
                Ordering::Less => x = self.raw.left(x),
                Ordering::Equal => {
                    let (_, value) = self.raw.key_value(x);
                    return (rank + sizes.size(self.raw.left(x)), Some(value));
                }
                Ordering::Greater => {
                    rank += sizes.size(self.raw.left(x)) + 1;
                    x = self.raw.right(x);
                }
            }
        }
        (rank, None)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeMap` API.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.rank(key) {
            (rank, Some(_)) => Some(rank),
            (_, None) => None,
        }
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.pair(self.handle_at(rank))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use rubi_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let h = self.handle_at(rank);
        if h.is_nil() {
            None
        } else {
            Some(self.raw.key_value_mut(h))
        }
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rubi_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for TreeMap<K, V, C, SubtreeSizes> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rubi_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for TreeMap<K, V, C, SubtreeSizes> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{OSRBTreeMap, Rank, TreeError};
    use proptest::prelude::*;

    #[test]
    fn select_and_rank_on_small_map() {
        let map: OSRBTreeMap<i32, i32> = [10, 20, 30, 40, 50].into_iter().map(|k| (k, k / 10)).collect();
        assert_eq!(map.select(0), Ok((&10, &1)));
        assert_eq!(map.select(4), Ok((&50, &5)));
        assert_eq!(map.rank(&30), (2, Some(&3)));
        assert_eq!(map.select(5), Err(TreeError::IndexOutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn empty_map_has_nothing_to_select() {
        let map: OSRBTreeMap<u8, ()> = OSRBTreeMap::new();
        assert_eq!(map.select(0), Err(TreeError::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(map.rank(&7), (0, None));
        assert_eq!(map.get_by_rank(0), None);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_by_rank_out_of_bounds_panics() {
        let map = OSRBTreeMap::from([(1, 'a')]);
        let _ = map[Rank(1)];
    }

    #[test]
    fn sizes_track_map_level_mutations() {
        let mut map: OSRBTreeMap<i32, i32> = (0..40).map(|k| (k, k)).collect();
        map.retain(|k, _| k % 3 != 0);
        assert_eq!(map.pop_first(), Ok((1, 1)));
        assert_eq!(map.remove(&20), Some(20));
        map.raw.validate_sizes();

        for (index, (key, _)) in map.iter().enumerate() {
            assert_eq!(map.rank_of(key), Some(index));
        }
        map.clear();
        map.insert(7, 7);
        map.raw.validate_sizes();
        assert_eq!(map[Rank(0)], 7);
    }

    proptest! {
        #[test]
        fn select_and_rank_are_inverse(keys in prop::collection::btree_set(-1000i32..1000, 0..300)) {
            let map: OSRBTreeMap<i32, ()> = keys.iter().map(|&k| (k, ())).collect();

            for (index, key) in keys.iter().enumerate() {
                let (selected, ()) = map.select(index).unwrap();
                prop_assert_eq!(selected, key);
                prop_assert_eq!(map.rank(key).0, index);
                prop_assert_eq!(map.rank_of(key), Some(index));
            }
        }

        #[test]
        fn rank_counts_smaller_keys(
            keys in prop::collection::btree_set(0i32..500, 0..200),
            probe in -10i32..510,
        ) {
            let map: OSRBTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
            let expected = keys.range(..probe).count();
            let (rank, value) = map.rank(&probe);
            prop_assert_eq!(rank, expected);
            prop_assert_eq!(value.copied(), keys.contains(&probe).then_some(probe));
        }
    }
}
