// Property tests for ConcurrentMap and HashSet.
//
// Map model: a std HashMap<i64, i64> driven by the same operation stream.
//  - Operations: put (valid), put with a foreign key type, put with a foreign
//    value type, remove, clear.
//  - Invariant after every step: len() and contains()/get() agree with the model.
//
// Set model: a std HashSet<i64>.
//  - add returns true exactly when the model gains the element.
//  - same() agrees with model equality and is symmetric and reflexive.
use proptest::prelude::*;
use sovran_containers::{AnyKey, AnyValue, ConcurrentMap, HashSet, TypeDescriptor};
use std::collections::{HashMap, HashSet as StdHashSet};

fn new_map() -> ConcurrentMap {
    ConcurrentMap::new(TypeDescriptor::of::<i64>(), TypeDescriptor::of::<i64>())
}

proptest! {
    #[test]
    fn prop_map_matches_model(ops in proptest::collection::vec((0u8..=5u8, 0i64..16, any::<i64>()), 1..200)) {
        let map = new_map();
        let mut model: HashMap<i64, i64> = HashMap::new();

        for (op, k, v) in ops {
            let key = AnyKey::new(k);
            match op {
                // Valid put returns the model's previous value.
                0 | 1 => {
                    let prev = map.put(key.clone(), AnyValue::new(v)).unwrap();
                    prop_assert_eq!(prev.and_then(|p| p.downcast::<i64>()), model.insert(k, v));
                    prop_assert_eq!(map.get_as::<i64>(&key).unwrap(), Some(v));
                }
                // Wrong key type never changes anything.
                2 => {
                    let before = map.len().unwrap();
                    let err = map.put(AnyKey::new(k as i32), AnyValue::new(v)).unwrap_err();
                    prop_assert!(err.is_type_mismatch());
                    prop_assert_eq!(map.len().unwrap(), before);
                }
                // Wrong value type never changes anything, even for a present key.
                3 => {
                    let before = map.len().unwrap();
                    let err = map.put(key.clone(), AnyValue::new(v.to_string())).unwrap_err();
                    prop_assert!(err.is_type_mismatch());
                    prop_assert_eq!(map.len().unwrap(), before);
                    prop_assert_eq!(map.get_as::<i64>(&key).unwrap(), model.get(&k).copied());
                }
                4 => {
                    let before = map.len().unwrap();
                    let removed = map.remove(&key).unwrap();
                    prop_assert_eq!(removed.as_ref().and_then(|p| p.downcast::<i64>()), model.remove(&k));
                    if removed.is_some() {
                        prop_assert!(!map.contains(&key).unwrap());
                        prop_assert_eq!(map.len().unwrap(), before - 1);
                    }
                }
                _ => {
                    if k == 0 {
                        map.clear().unwrap();
                        model.clear();
                        prop_assert!(map.keys().unwrap().is_empty());
                    }
                }
            }
            prop_assert_eq!(map.len().unwrap(), model.len());
        }

        let snapshot = map.to_map().unwrap();
        prop_assert_eq!(snapshot.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(snapshot.get(&AnyKey::new(*k)), Some(&AnyValue::new(*v)));
        }
    }

    #[test]
    fn prop_overwrite_keeps_len(k in any::<i64>(), v1 in any::<i64>(), v2 in any::<i64>()) {
        let map = new_map();
        map.put(AnyKey::new(k), AnyValue::new(v1)).unwrap();
        map.put(AnyKey::new(k), AnyValue::new(v2)).unwrap();
        prop_assert_eq!(map.len().unwrap(), 1);
        prop_assert_eq!(map.get(&AnyKey::new(k)).unwrap(), Some(AnyValue::new(v2)));
    }

    #[test]
    fn prop_set_add_once(ops in proptest::collection::vec((any::<bool>(), 0i64..20), 1..200)) {
        let set = HashSet::new();
        let mut model: StdHashSet<i64> = StdHashSet::new();

        for (add, e) in ops {
            let element = AnyKey::new(e);
            if add {
                let before = set.len().unwrap();
                let added = set.add(element).unwrap();
                prop_assert_eq!(added, model.insert(e));
                if !added {
                    prop_assert_eq!(set.len().unwrap(), before);
                }
            } else {
                set.remove(&element).unwrap();
                model.remove(&e);
                prop_assert!(!set.contains(&element).unwrap());
            }
            prop_assert_eq!(set.len().unwrap(), model.len());
        }
    }

    #[test]
    fn prop_same_is_set_equality(
        xs in proptest::collection::vec(0i64..10, 0..12),
        ys in proptest::collection::vec(0i64..10, 0..12),
    ) {
        let a = HashSet::new();
        let b = HashSet::new();
        for x in &xs {
            a.add(AnyKey::new(*x)).unwrap();
        }
        for y in &ys {
            b.add(AnyKey::new(*y)).unwrap();
        }

        let expected = xs.iter().collect::<StdHashSet<_>>() == ys.iter().collect::<StdHashSet<_>>();
        prop_assert_eq!(a.same(&b).unwrap(), expected);
        prop_assert_eq!(b.same(&a).unwrap(), expected);
        prop_assert!(a.same(&a).unwrap());
        prop_assert!(b.same(&b).unwrap());
    }
}
