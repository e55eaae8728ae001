use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rubi_tree::{OSRBTreeMap, OSRBTreeSet, Rank, TreeError};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    -1_500i64..1_500i64
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i64, i64),
    Remove(i64),
    PopFirst,
    PopLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        4 => key_strategy().prop_map(Op::Remove),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Tests select/get_by_rank against the sorted entries of a BTreeMap.
    #[test]
    fn select_matches_sorted_order(entries in proptest::collection::vec((key_strategy(), any::<i64>()), 0..TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<_> = bt_map.iter().collect();

        for (index, expected) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.select(index).ok(), Some(*expected), "select({})", index);
            prop_assert_eq!(os_map.get_by_rank(index), Some(*expected), "get_by_rank({})", index);
            prop_assert_eq!(&os_map[Rank(index)], expected.1);
        }
        prop_assert_eq!(
            os_map.select(sorted.len()),
            Err(TreeError::IndexOutOfRange { index: sorted.len(), len: sorted.len() })
        );
    }

    /// Tests rank for present and absent keys.
    #[test]
    fn rank_counts_strictly_smaller_keys(
        entries in proptest::collection::vec((key_strategy(), any::<i64>()), 0..TEST_SIZE),
        probes in proptest::collection::vec(key_strategy(), 1..64),
    ) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for probe in probes {
            let expected_rank = bt_map.range(..probe).count();
            prop_assert_eq!(os_map.rank(&probe), (expected_rank, bt_map.get(&probe)), "rank({})", probe);
            prop_assert_eq!(
                os_map.rank_of(&probe),
                bt_map.contains_key(&probe).then_some(expected_rank),
                "rank_of({})",
                probe
            );
        }
    }

    /// Tests that rank and select stay inverse through arbitrary mutations.
    #[test]
    fn rank_select_duality_after_mutations(ops in proptest::collection::vec(op_strategy(), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = OSRBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(os_map.insert(k, v), bt_map.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(os_map.remove(&k), bt_map.remove(&k));
                }
                Op::PopFirst => {
                    prop_assert_eq!(os_map.pop_first().ok(), bt_map.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(os_map.pop_last().ok(), bt_map.pop_last());
                }
            }
        }

        prop_assert_eq!(os_map.len(), bt_map.len());
        for index in 0..os_map.len() {
            let (key, _) = os_map.select(index).unwrap();
            prop_assert_eq!(os_map.rank(key).0, index);
        }
    }

    /// Tests that mutation by rank writes through to the right entry.
    #[test]
    fn get_by_rank_mut_updates_value(keys in proptest::collection::btree_set(key_strategy(), 1..TEST_SIZE), pick in any::<prop::sample::Index>()) {
        let mut os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, 0)).collect();
        let index = pick.index(keys.len());
        let key = *keys.iter().nth(index).unwrap();

        os_map[Rank(index)] = 7;
        if let Some((k, v)) = os_map.get_by_rank_mut(index) {
            prop_assert_eq!(*k, key);
            *v += 1;
        }
        prop_assert_eq!(os_map.get(&key), Some(&8));
        prop_assert_eq!(os_map.values().filter(|&&v| v != 0).count(), 1);
    }

    /// Tests the set's order-statistic surface against a sorted vector.
    #[test]
    fn set_select_and_rank(values in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let os_set: OSRBTreeSet<i64> = values.iter().copied().collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        sorted.dedup();

        for (index, value) in sorted.iter().enumerate() {
            prop_assert_eq!(os_set.select(index), Ok(value));
            prop_assert_eq!(os_set.rank(value), index);
            prop_assert_eq!(os_set.rank_of(value), Some(index));
            prop_assert_eq!(&os_set[Rank(index)], value);
        }
        prop_assert!(os_set.get_by_rank(sorted.len()).is_none());
    }
}

#[test]
fn concrete_scenario() {
    let map: OSRBTreeMap<i32, char> = [(10, 'a'), (20, 'b'), (30, 'c'), (40, 'd'), (50, 'e')].into_iter().collect();

    assert_eq!(map.select(0), Ok((&10, &'a')));
    assert_eq!(map.select(4), Ok((&50, &'e')));
    assert_eq!(map.rank(&30), (2, Some(&'c')));
    assert_eq!(map.select(5), Err(TreeError::IndexOutOfRange { index: 5, len: 5 }));
}

#[test]
fn ranks_stay_dense_while_removing_the_median() {
    let mut map: OSRBTreeMap<i32, ()> = (0..64).map(|k| (k, ())).collect();

    while let Ok((&middle, ())) = map.select(map.len() / 2) {
        assert_eq!(map.remove(&middle), Some(()));
        for index in 0..map.len() {
            let (key, ()) = map.select(index).unwrap();
            assert_eq!(map.rank_of(key), Some(index));
        }
    }
    assert!(map.is_empty());
}

#[test]
fn custom_order_ranks_follow_comparator() {
    let mut map = OSRBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    map.extend([(1, ()), (2, ()), (3, ())]);

    assert_eq!(map.select(0), Ok((&3, &())));
    assert_eq!(map.rank_of(&1), Some(2));
}
