// Table property tests (consolidated).
//
// Property 1: a dynamic map agrees with a model map.
//  - Model: hashbrown::HashMap<String, u32>.
//  - Operations: insert (new or existing key), find.
//  - Invariant after every step: size == model.len(); find(k) == model[k];
//    load < 0.5 (the sequence never runs out).
//
// Property 2: a dynamic set agrees with a model set, and duplicate inserts
// never change the size.
//
// Property 3: rehash preserves the exact set of (key, value) pairs.
//
// Keys are drawn from a small pool so that duplicates and collisions are
// frequent. Double hashing uses c2 = 5 with prime capacities, so every
// probe step is coprime with the capacity.
use hashbrown::{HashMap as ModelMap, HashSet as ModelSet};
use probe_table::{
    CapacitySequencer, DynamicHashMap, DynamicHashSet, HashTable, OnDuplicate,
    Strategy as Collision,
};
use proptest::prelude::*;

fn strategies() -> impl Strategy<Value = Collision> {
    prop_oneof![
        Just(Collision::Chaining),
        Just(Collision::LinearProbing),
        Just(Collision::DoubleHashing),
    ]
}

fn key_pool() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z0-9]{1,5}", 1..40)
}

proptest! {
    #[test]
    fn prop_dynamic_map_matches_model(
        strategy in strategies(),
        pool in key_pool(),
        ops in proptest::collection::vec((any::<bool>(), 0usize..64, any::<u32>()), 1..200),
    ) {
        let seq = CapacitySequencer::primes(11, 4000);
        let mut m = DynamicHashMap::new(strategy, &[31, 37, 5, 7], seq).unwrap();
        let mut model: ModelMap<String, u32> = ModelMap::new();

        for (is_insert, raw, value) in ops {
            let key = &pool[raw % pool.len()];
            if is_insert {
                let old = m.insert(key.as_str(), value).unwrap();
                prop_assert_eq!(old, model.insert(key.clone(), value));
            } else {
                prop_assert_eq!(m.find(key), model.get(key));
            }
            prop_assert_eq!(m.size(), model.len());
            prop_assert!(m.load() < 0.5);
        }

        for (k, v) in &model {
            prop_assert_eq!(m.find(k), Some(v));
        }
        prop_assert_eq!(m.iter().count(), model.len());
    }
}

proptest! {
    #[test]
    fn prop_dynamic_set_matches_model(
        strategy in strategies(),
        pool in key_pool(),
        picks in proptest::collection::vec(0usize..64, 1..200),
    ) {
        let seq = CapacitySequencer::primes(11, 4000);
        let mut s = DynamicHashSet::new(strategy, &[31, 37, 5, 7], seq).unwrap();
        let mut model: ModelSet<String> = ModelSet::new();

        for raw in picks {
            let key = &pool[raw % pool.len()];
            let before = s.size();
            let added = s.insert(key.as_str()).unwrap();
            prop_assert_eq!(added, model.insert(key.clone()));
            prop_assert_eq!(s.size(), before + usize::from(added));
            prop_assert_eq!(s.find(key), Some(key.as_str()));
        }

        let stored: ModelSet<String> = s.iter().map(str::to_string).collect();
        prop_assert_eq!(stored, model);
    }
}

proptest! {
    #[test]
    fn prop_rehash_preserves_pairs(
        strategy in strategies(),
        pool in key_pool(),
        grow_to in prop_oneof![Just(53usize), Just(89), Just(101), Just(257)],
    ) {
        // capacity 47 holds any pool (< 40 keys) without filling
        let mut t: HashTable<usize> = HashTable::new(strategy, &[31, 37, 5, 47]).unwrap();
        for (i, k) in pool.iter().enumerate() {
            t.insert(k.clone(), i, OnDuplicate::Replace).unwrap();
        }
        let before: ModelMap<String, usize> =
            t.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let size = t.size();

        t.rehash(grow_to).unwrap();

        let after: ModelMap<String, usize> =
            t.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(after, before);
        prop_assert_eq!(t.size(), size);
        prop_assert_eq!(t.capacity(), grow_to);
    }
}
