// ChainTable property tests against the public API.
//
// Property 1: growth round trip.
//  - Model: distinct keys inserted into a table of arbitrary initial
//    capacity.
//  - Invariant: len == successful inserts; every key maps to its value
//    after any number of rehashes; capacity only ever doubles, and only
//    when (len + 1) / capacity would exceed 0.75.
//
// Property 2: removal.
//  - Model: std HashMap built from the same pairs.
//  - Invariant: removing an absent key is a no-op; removing a present key
//    decrements len and makes get() return None; capacity is unchanged.
use chain_table::{ChainTable, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Property 1: growth schedule and round trip through rehash.
proptest! {
    #[test]
    fn prop_growth_round_trip(cap in 1usize..40, pairs in proptest::collection::btree_map(any::<i64>(), any::<i32>(), 0..300)) {
        let mut t: ChainTable<i64, i32> = ChainTable::with_capacity(cap).unwrap();
        let mut expected_cap = cap;
        for (n, (&k, &v)) in pairs.iter().enumerate() {
            let before = t.capacity();
            if (n + 1) as f64 / expected_cap as f64 > MAX_LOAD_FACTOR {
                expected_cap *= 2;
            }
            t.insert(k, v).unwrap();
            prop_assert_eq!(t.capacity(), expected_cap);
            prop_assert!(t.capacity() == before || t.capacity() == before * 2);
        }
        prop_assert_eq!(t.len(), pairs.len());
        for (k, v) in &pairs {
            prop_assert_eq!(t.get(k), Some(v));
        }
        let collected: BTreeMap<i64, i32> = t.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(collected, pairs);
    }
}

// Property 2: removal of present and absent keys.
proptest! {
    #[test]
    fn prop_remove(pairs in proptest::collection::hash_map(0u16..500, any::<u8>(), 0..120), probes in proptest::collection::vec(0u16..500, 0..120)) {
        let mut t: ChainTable<u16, u8> = pairs.iter().map(|(k, v)| (*k, *v)).collect();
        let mut model: HashMap<u16, u8> = pairs.clone();
        let cap = t.capacity();
        for k in probes {
            let len_before = t.len();
            let removed = t.remove(&k);
            prop_assert_eq!(removed, model.remove(&k).is_some());
            if removed {
                prop_assert_eq!(t.len(), len_before - 1);
            } else {
                prop_assert_eq!(t.len(), len_before);
            }
            prop_assert!(t.get(&k).is_none());
            prop_assert_eq!(t.capacity(), cap);
        }
        for (k, v) in &model {
            prop_assert_eq!(t.get(k), Some(v));
        }
        prop_assert_eq!(t.len(), model.len());
    }
}
