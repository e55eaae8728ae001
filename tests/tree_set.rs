use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rubi_tree::{RBTreeSet, TreeError};

/// The number of elements to generate for each proptest case.
const TEST_SIZE: usize = 1_000;

fn value_strategy() -> impl Strategy<Value = i32> {
    -800i32..800i32
}

fn values_strategy() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(value_strategy(), 0..TEST_SIZE)
}

fn build(values: &[i32]) -> (RBTreeSet<i32>, BTreeSet<i32>) {
    (values.iter().copied().collect(), values.iter().copied().collect())
}

fn contents(set: &RBTreeSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i32),
    Replace(i32),
    Remove(i32),
    Take(i32),
    Contains(i32),
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        1 => value_strategy().prop_map(SetOp::Replace),
        3 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random operation sequence on both `RBTreeSet` and `BTreeSet`.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i32> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i32> = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(rb_set.insert(v), bt_set.insert(v), "insert({})", v);
                }
                SetOp::Replace(v) => {
                    prop_assert_eq!(rb_set.replace(v), bt_set.replace(v), "replace({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(&v), bt_set.remove(&v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(rb_set.take(&v), bt_set.take(&v), "take({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(&v), bt_set.contains(&v), "contains({})", v);
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(rb_set.pop_first().ok(), bt_set.pop_first(), "pop_first");
                }
                SetOp::PopLast => {
                    prop_assert_eq!(rb_set.pop_last().ok(), bt_set.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_set.first().ok(), bt_set.first(), "first mismatch after {:?}", op);
            prop_assert_eq!(rb_set.last().ok(), bt_set.last(), "last mismatch after {:?}", op);
        }

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
    }

    /// Tests the strict/weak neighbour queries against BTreeSet ranges.
    #[test]
    fn neighbours_match_btreeset(values in values_strategy(), probe in value_strategy()) {
        let (rb_set, bt_set) = build(&values);

        prop_assert_eq!(rb_set.strict_successor_of(&probe), bt_set.range(probe + 1..).next());
        prop_assert_eq!(rb_set.weak_successor_of(&probe), bt_set.range(probe..).next());
        prop_assert_eq!(rb_set.strict_predecessor_of(&probe), bt_set.range(..probe).next_back());
        prop_assert_eq!(rb_set.weak_predecessor_of(&probe), bt_set.range(..=probe).next_back());
    }

    /// Tests the in-place algebra against BTreeSet's set operations.
    #[test]
    fn in_place_algebra_matches_btreeset(a in values_strategy(), b in values_strategy()) {
        let (rb_a, bt_a) = build(&a);
        let (rb_b, bt_b) = build(&b);

        let mut union = rb_a.clone();
        union.union_with(b.iter().copied());
        prop_assert_eq!(contents(&union), bt_a.union(&bt_b).copied().collect::<Vec<_>>());

        let mut intersection = rb_a.clone();
        intersection.intersect_with(&b);
        prop_assert_eq!(contents(&intersection), bt_a.intersection(&bt_b).copied().collect::<Vec<_>>());

        let mut difference = rb_a.clone();
        difference.except_with(&b);
        prop_assert_eq!(contents(&difference), bt_a.difference(&bt_b).copied().collect::<Vec<_>>());

        let mut symmetric = rb_a.clone();
        symmetric.symmetric_except_with(b.iter().copied());
        prop_assert_eq!(contents(&symmetric), bt_a.symmetric_difference(&bt_b).copied().collect::<Vec<_>>());

        prop_assert_eq!(contents(&(&rb_a | &rb_b)), contents(&union));
        prop_assert_eq!(contents(&(&rb_a & &rb_b)), contents(&intersection));
        prop_assert_eq!(contents(&(&rb_a - &rb_b)), contents(&difference));
        prop_assert_eq!(contents(&(&rb_a ^ &rb_b)), contents(&symmetric));
    }

    /// Tests the subset/superset/overlap predicates.
    #[test]
    fn predicates_match_btreeset(a in values_strategy(), b in values_strategy()) {
        let (rb_a, bt_a) = build(&a);
        let (rb_b, bt_b) = build(&b);

        prop_assert_eq!(rb_a.is_subset_of(&rb_b), bt_a.is_subset(&bt_b));
        prop_assert_eq!(rb_a.is_superset_of(&rb_b), bt_a.is_superset(&bt_b));
        prop_assert_eq!(rb_a.is_disjoint(&rb_b), bt_a.is_disjoint(&bt_b));
        prop_assert_eq!(rb_a.overlaps(&rb_b), !bt_a.is_disjoint(&bt_b));

        let union = &rb_a | &rb_b;
        prop_assert!(rb_a.is_subset_of(&union));
        prop_assert!(union.is_superset_of(&rb_b));

        // The raw vectors repeat values; the predicates must not care.
        prop_assert_eq!(rb_a.is_subset_of(&b), bt_a.is_subset(&bt_b));
        prop_assert_eq!(rb_a.is_superset_of(&b), bt_a.is_superset(&bt_b));
        prop_assert_eq!(rb_a.overlaps(&b), !bt_a.is_disjoint(&bt_b));
    }

    /// Tests range and retain against BTreeSet.
    #[test]
    fn range_and_retain_match_btreeset(values in values_strategy(), lo in value_strategy(), hi in value_strategy()) {
        let (mut rb_set, mut bt_set) = build(&values);
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        prop_assert!(rb_set.range(lo..hi).eq(bt_set.range(lo..hi)));
        prop_assert!(rb_set.range(lo..=hi).rev().eq(bt_set.range(lo..=hi).rev()));

        rb_set.retain(|v| v % 3 != 0);
        bt_set.retain(|v| v % 3 != 0);
        prop_assert!(rb_set.into_iter().eq(bt_set));
    }
}

#[test]
fn concrete_scenario() {
    let mut set = RBTreeSet::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        set.insert(k);
    }

    assert_eq!(set.first(), Ok(&1));
    assert_eq!(set.last(), Ok(&9));
    assert_eq!(set.strict_successor_of(&5), Some(&7));
    assert_eq!(set.weak_successor_of(&5), Some(&5));

    assert_eq!(set.pop_first(), Ok(1));
    assert_eq!(set.len(), 6);
    assert_eq!(set.first(), Ok(&3));
}

#[test]
fn empty_set_reports_empty_container() {
    let mut set: RBTreeSet<char> = RBTreeSet::default();
    assert_eq!(set.first(), Err(TreeError::EmptyContainer));
    assert_eq!(set.last(), Err(TreeError::EmptyContainer));
    assert_eq!(set.pop_first(), Err(TreeError::EmptyContainer));
    assert_eq!(set.pop_last(), Err(TreeError::EmptyContainer));
    assert_eq!(set.strict_successor_of(&'a'), None);
}

#[test]
fn set_algebra_with_custom_order() {
    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut set: RBTreeSet<&str, _> = RBTreeSet::with_comparator(by_len);
    set.extend(["ccc", "a", "bb"]);

    // "zz" compares equal to "bb" under this order.
    assert!(set.contains(&"zz"));
    set.except_with(["zz"]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["a", "ccc"]);
}

#[test]
fn debug_formats_as_set() {
    let set = RBTreeSet::from([3, 1, 2]);
    assert_eq!(format!("{set:?}"), "{1, 2, 3}");
}
