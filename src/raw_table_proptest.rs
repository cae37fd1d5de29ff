#![cfg(test)]

// Property tests for RawTable kept inside the crate so they can drive the
// engine directly, below the facades.

use crate::raw_table::{EntryPolicy, RawTable};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pair policy mirroring the map facade, local to the tests.
#[derive(Default)]
struct PairPolicy;
impl EntryPolicy for PairPolicy {
    type Element = (String, i32);
    type Key = String;
    fn key_of<'a>(&self, element: &'a (String, i32)) -> &'a String {
        &element.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Find),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine<S: BuildHasher>(pool: Vec<String>, ops: Vec<OpI>, hasher: S) -> Result<(), TestCaseError> {
    let mut sut: RawTable<PairPolicy, S> = RawTable::new(0, PairPolicy, hasher);
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let displaced = sut.insert((k.clone(), v));
                let prev = model.insert(k.clone(), v);
                // Upsert parity: displaced element iff the model had the key.
                prop_assert_eq!(displaced.map(|e| e.1), prev);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k.as_str());
                let model_removed = model.remove(k);
                match (removed, model_removed) {
                    (Some((rk, rv)), Some(mv)) => {
                        prop_assert_eq!(&rk, k);
                        prop_assert_eq!(rv, mv);
                    }
                    (None, None) => {}
                    other => prop_assert!(false, "remove mismatch: {:?}", other.0.is_some()),
                }
            }
            OpI::Find(i) => {
                let k = &pool[i];
                let found = sut.find(k.as_str()).map(|e| e.1);
                prop_assert_eq!(found, model.get(k).copied());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(e) = sut.find_mut(k.as_str()) {
                    e.1 = e.1.saturating_add(d);
                    let mv = model.get_mut(k).expect("model has every live key");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Iterate => {
                let mut visited = 0usize;
                let s_keys: BTreeSet<String> = sut
                    .iter()
                    .inspect(|_| visited += 1)
                    .map(|e| e.0.clone())
                    .collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                // Each live element exactly once: distinct keys, count == len.
                prop_assert_eq!(visited, sut.len());
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(
            sut.capacity() >= 2 * sut.len(),
            "capacity invariant violated: {} slots for {} entries",
            sut.capacity(),
            sut.len()
        );
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Upsert parity: insert displaces exactly when the model had the key.
// - `find`/`contains` parity for present and absent keys, borrowed lookups.
// - `remove` returns the owned element matching the model; absent is a no-op.
// - Iteration visits each live element exactly once.
// - `capacity >= 2 * len` after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(pool, ops, crate::DefaultHashBuilder::default())?;
    }
}

// Collision variant using a constant hasher: every key probes from slot 0,
// so long collision chains, tombstone skipping, and tombstone reuse are all
// on the hot path of every operation.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(pool, ops, ConstBuildHasher)?;
    }
}
