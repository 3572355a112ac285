use proptest::prelude::*;
use rmi_core::storage::{from_record, write_table};
use rmi_core::{full_scan_lookup, IndexConfig, LearnedIndex, SortedTable, Store};

/// Small integer keys, so datasets are dense with duplicates.
fn dataset() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((-50i32..50).prop_map(f64::from), 0..300)
}

fn config() -> impl Strategy<Value = IndexConfig> {
    prop_oneof![
        Just(IndexConfig::default()),
        (1usize..20).prop_map(IndexConfig::piecewise),
    ]
}

proptest! {
    #[test]
    fn table_is_a_sorted_permutation(dataset in dataset()) {
        let table = SortedTable::build(&dataset);

        prop_assert!(table.is_sorted());
        let mut offsets = table.offsets().to_vec();
        offsets.sort_unstable();
        prop_assert_eq!(offsets, (0..dataset.len()).collect::<Vec<_>>());
        for entry in table.iter() {
            prop_assert_eq!(dataset[entry.offset], entry.key);
        }
    }

    #[test]
    fn lookup_matches_full_scan(dataset in dataset(), config in config(), probe in -60i32..60) {
        let idx = LearnedIndex::build_with(&dataset, &config);
        let key = f64::from(probe);

        match full_scan_lookup(key, &dataset[..]) {
            Ok(mut expected) => {
                expected.sort_unstable();
                prop_assert_eq!(idx.lookup(key).unwrap(), expected);
            }
            Err(_) => prop_assert!(idx.lookup(key).unwrap_err().is_not_found()),
        }
    }

    #[test]
    fn window_is_ordered_and_in_range(dataset in dataset(), config in config(), key in -1e3f64..1e3) {
        let idx = LearnedIndex::build_with(&dataset, &config);

        match idx.guess_index(key) {
            Some(w) => {
                prop_assert!(w.lower <= w.guess && w.guess <= w.upper);
                prop_assert!(w.upper < idx.len());
            }
            None => prop_assert!(idx.is_empty()),
        }
    }

    #[test]
    fn store_returns_what_was_put(dataset in dataset()) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::create(dir.path().join("prop.rmi")).unwrap();
        let table = SortedTable::build(&dataset);

        write_table(&mut store, &table).unwrap();

        prop_assert_eq!(store.record_count(), dataset.len() as u64);
        for (i, entry) in table.iter().enumerate() {
            let (key, value) = from_record(&store.get(i as u64).unwrap());
            prop_assert_eq!(key, entry.key);
            prop_assert_eq!(value, entry.offset as u64);
        }
        // the record after the last one is not there
        prop_assert!(store.get(dataset.len() as u64).is_err());
    }
}
