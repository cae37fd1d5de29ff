// Facade property tests (consolidated).
//
// Property 1: OpenHashMap matches a std::collections::HashMap model under
//  random insert/remove/get/contains sequences, with len/capacity
//  post-conditions after every op.
//
// Property 2: OpenHashSet insert is idempotent and presence matches a
//  HashSet model.
//
// Property 3: OpenHashMultiset count(v) equals inserts-since-last-removal
//  of v, where removal drops the whole slot.
use open_hash::{OpenHashMap, OpenHashMultiset, OpenHashSet};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i64),
    Remove(u8),
    Get(u8),
    Contains(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (any::<u8>(), any::<i64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Remove),
        any::<u8>().prop_map(Op::Get),
        any::<u8>().prop_map(Op::Contains),
    ];
    proptest::collection::vec(op, 1..200)
}

proptest! {
    #[test]
    fn prop_map_matches_std_model(ops in arb_ops()) {
        let mut sut: OpenHashMap<u8, i64> = OpenHashMap::new();
        let mut model: HashMap<u8, i64> = HashMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(sut.remove(&k), model.remove(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
                Op::Contains(k) => {
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.capacity() >= 2 * sut.len());
        }
        // Final sweep: full parity in both directions.
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(v));
        }
        for (k, v) in sut.iter() {
            prop_assert_eq!(model.get(k), Some(v));
        }
    }

    #[test]
    fn prop_set_presence_matches_std_model(ops in proptest::collection::vec((any::<bool>(), any::<u8>()), 1..200)) {
        let mut sut: OpenHashSet<u8> = OpenHashSet::new();
        let mut model: HashSet<u8> = HashSet::new();
        for (is_insert, v) in ops {
            if is_insert {
                prop_assert_eq!(sut.insert(v), model.insert(v));
            } else {
                prop_assert_eq!(sut.remove(&v), model.remove(&v));
            }
            prop_assert_eq!(sut.len(), model.len());
        }
        for v in 0..=u8::MAX {
            prop_assert_eq!(sut.contains(&v), model.contains(&v));
        }
    }

    #[test]
    fn prop_multiset_count_tracks_inserts_since_removal(ops in proptest::collection::vec((any::<bool>(), any::<u8>()), 1..200)) {
        let mut sut: OpenHashMultiset<u8> = OpenHashMultiset::new();
        let mut model: HashMap<u8, usize> = HashMap::new();
        for (is_insert, v) in ops {
            if is_insert {
                let n = sut.insert(v);
                let m = model.entry(v).or_insert(0);
                *m += 1;
                prop_assert_eq!(n, *m, "insert must return the new multiplicity");
            } else {
                // Whole-slot removal on both sides.
                prop_assert_eq!(sut.remove(&v), model.remove(&v));
            }
            prop_assert_eq!(sut.len(), model.len());
        }
        for v in 0..=u8::MAX {
            prop_assert_eq!(sut.count(&v), model.get(&v).copied().unwrap_or(0));
        }
    }
}
