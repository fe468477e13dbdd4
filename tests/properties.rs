use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;

use grove::{OrderedMap, OrderedSet, RingBuffer};

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, u16),
    Remove(u8),
    Replace(u8, u16),
    Clear,
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        8 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        4 => any::<u8>().prop_map(MapOp::Remove),
        2 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| MapOp::Replace(k, v)),
        1 => Just(MapOp::Clear),
    ]
}

proptest! {
    #[test]
    fn map_matches_btreemap_model(ops in proptest::collection::vec(map_op(), 0..256)) {
        let mut map = OrderedMap::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Insert(k, v) => {
                    let vacant = !model.contains_key(&k);
                    if vacant {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(map.insert(k, v), vacant);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k).is_some());
                }
                MapOp::Replace(k, v) => {
                    let present = model.contains_key(&k);
                    if present {
                        model.insert(k, v);
                    }
                    prop_assert_eq!(map.replace(&k, v), present);
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            map.check_invariants();
            prop_assert_eq!(map.len(), model.len());
        }

        let entries: Vec<(u8, u16)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u8, u16)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn iteration_is_always_sorted(keys in proptest::collection::vec(any::<u16>(), 0..512)) {
        let map: OrderedMap<u16, ()> = keys.iter().map(|k| (*k, ())).collect();
        map.check_invariants();

        let seen: Vec<u16> = map.keys().copied().collect();
        prop_assert!(seen.windows(2).all(|w| w[0] < w[1]));

        let mut expected: Vec<u16> = keys.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn removal_in_any_order_leaves_a_valid_tree(
        keys in proptest::collection::vec(any::<u8>(), 1..128),
        victims in proptest::collection::vec(any::<u8>(), 1..128),
    ) {
        let mut map: OrderedMap<u8, u8> = keys.iter().map(|k| (*k, *k)).collect();
        let mut model: BTreeMap<u8, u8> = keys.iter().map(|k| (*k, *k)).collect();

        for victim in victims {
            prop_assert_eq!(map.remove(&victim), model.remove(&victim).is_some());
            map.check_invariants();
        }

        prop_assert_eq!(map.to_vec(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn set_algebra_matches_retain(
        left in proptest::collection::btree_set(any::<u8>(), 0..64),
        right in proptest::collection::btree_set(any::<u8>(), 0..64),
    ) {
        let other: OrderedSet<u8> = right.iter().copied().collect();

        let mut union: OrderedSet<u8> = left.iter().copied().collect();
        union.union_with(&other);
        prop_assert_eq!(
            union.to_vec(),
            left.union(&right).copied().collect::<Vec<_>>()
        );

        let mut inter: OrderedSet<u8> = left.iter().copied().collect();
        inter.intersect_with(&other);
        prop_assert_eq!(
            inter.to_vec(),
            left.intersection(&right).copied().collect::<Vec<_>>()
        );

        let mut diff: OrderedSet<u8> = left.iter().copied().collect();
        diff.difference_with(&other);
        prop_assert_eq!(
            diff.to_vec(),
            left.difference(&right).copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn ring_matches_vecdeque_model(
        capacity in 1_usize..16,
        ops in proptest::collection::vec(any::<Option<u8>>(), 0..256),
    ) {
        let mut ring = RingBuffer::new(capacity).unwrap();
        let mut model: VecDeque<u8> = VecDeque::new();

        // Some(x) is a put, None is a get
        for op in ops {
            match op {
                Some(item) => {
                    if model.len() == capacity {
                        prop_assert_eq!(ring.try_put(item), Err(item));
                    } else {
                        prop_assert_eq!(ring.try_put(item), Ok(()));
                        model.push_back(item);
                    }
                }
                None => {
                    prop_assert_eq!(ring.try_get(), model.pop_front());
                }
            }

            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.peek(), model.front());
            prop_assert_eq!(ring.to_vec(), model.iter().copied().collect::<Vec<_>>());
        }
    }
}
