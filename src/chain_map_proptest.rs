#![cfg(test)]

// Property tests for ChainMap kept inside the crate so they can watch the
// bucket geometry (bucket_count) alongside the public surface.

use crate::chain_map::{ChainMap, InsertError, MapConfig};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length. The pool allows
// the empty string so the rejection path is part of every scenario.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
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
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives one scenario against std's HashMap as the model. Invariants
// checked at every step:
// - insert agrees with the model on fresh-vs-replace and on the handed-back
//   value; the empty key errors exactly when the key is empty.
// - get/contains_key/remove parity with the model.
// - iter yields each live entry exactly once with the model's values.
// - len/is_empty parity; the bucket count never shrinks.
fn run_against_model(
    mut sut: ChainMap<i32>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut buckets_seen = sut.bucket_count();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let key = &pool[i];
                match sut.insert(key, v) {
                    Ok(old) => {
                        prop_assert!(!key.is_empty());
                        prop_assert_eq!(old, model.insert(key.clone(), v));
                    }
                    Err(InsertError::EmptyKey) => {
                        prop_assert!(key.is_empty(), "only the empty key is rejected");
                    }
                }
            }
            OpI::Remove(i) => {
                let key = &pool[i];
                prop_assert_eq!(sut.remove(key), model.remove(key));
            }
            OpI::Get(i) => {
                let key = &pool[i];
                prop_assert_eq!(sut.get(key), model.get(key.as_str()));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Iterate => {
                let mut seen: HashMap<String, i32> = HashMap::new();
                for (k, v) in sut.iter() {
                    let k = String::from_utf8(k.to_vec()).expect("pool keys are ascii");
                    let dup = seen.insert(k, *v);
                    prop_assert!(dup.is_none(), "iter must yield each key once");
                }
                prop_assert_eq!(&seen, &model);
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(
            sut.bucket_count() >= buckets_seen,
            "bucket count must never shrink"
        );
        buckets_seen = sut.bucket_count();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    // Property: state-machine equivalence with the default geometry.
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(ChainMap::new(), &pool, ops)?;
    }

    // Property: same invariants when every entry shares one chain. One
    // capped bucket stresses the walk-and-compare path the way a constant
    // hasher would.
    #[test]
    fn prop_state_machine_single_chain((pool, ops) in arb_scenario()) {
        let caged = MapConfig {
            initial_buckets: 1,
            max_buckets: 1,
            ..MapConfig::default()
        };
        run_against_model(ChainMap::with_config(caged), &pool, ops)?;
    }

    // Property: same invariants starting from a one-bucket table that is
    // free to double, so relinking runs constantly during the scenario.
    #[test]
    fn prop_state_machine_under_growth((pool, ops) in arb_scenario()) {
        let tiny = MapConfig {
            initial_buckets: 1,
            ..MapConfig::default()
        };
        run_against_model(ChainMap::with_config(tiny), &pool, ops)?;
    }
}

proptest! {
    // Property: after n distinct fresh inserts the map holds exactly those
    // entries, the load factor sits below the threshold again (growth is
    // uncapped here), and every key reads back its own value.
    #[test]
    fn prop_growth_restores_load_factor(n in 1usize..300, buckets in 1usize..=8) {
        let mut m = ChainMap::with_buckets(buckets);
        for i in 0..n {
            m.insert(format!("key-{i}"), i).expect("keys are non-empty");
        }
        prop_assert_eq!(m.len(), n);
        prop_assert!(m.len() / m.bucket_count() < crate::chain_map::DEFAULT_MAX_LOAD);
        if n >= buckets * crate::chain_map::DEFAULT_MAX_LOAD {
            prop_assert!(m.bucket_count() > buckets, "threshold reached, must have grown");
        } else {
            prop_assert_eq!(m.bucket_count(), buckets);
        }
        for i in 0..n {
            prop_assert_eq!(m.get(format!("key-{i}")), Some(&i));
        }
    }
}
