#[cfg(test)]
mod proptests;

#[cfg(test)]
mod tests {
    use rand::{thread_rng, Rng};
    use rand_distr::{Distribution, LogNormal, Normal, Uniform};
    use rmi_core::{
        binary_search_lookup, full_scan_lookup, Error, IndexConfig, LearnedIndex, Result,
    };
    use tempfile::tempdir;

    const NUM: usize = 20_000;

    /// Keys rounded to one decimal, so the dataset has plenty of duplicates.
    fn dataset(dist: impl Distribution<f64>) -> Vec<f64> {
        thread_rng()
            .sample_iter(dist)
            .map(|x: f64| (x * 10.0).round() / 10.0)
            // hide a range from the distribution to test for false positives
            .filter(|&x| !(400.0..500.0).contains(&x))
            .take(NUM)
            .collect()
    }

    fn configs() -> [IndexConfig; 3] {
        [
            IndexConfig::default(),
            IndexConfig::piecewise(3),
            IndexConfig::piecewise(64),
        ]
    }

    fn check_index(dataset: &[f64], idx: &LearnedIndex) {
        assert_eq!(idx.len(), dataset.len());

        for (offset, &key) in dataset.iter().enumerate() {
            let found = idx.lookup(key).unwrap();
            assert!(found.contains(&offset), "offset {offset} of key {key}");

            // the oracles are linear, so only compare against a sample
            if offset % 100 == 0 {
                assert_eq!(found, full_scan_lookup(key, idx.table()).unwrap());
                assert_eq!(found, binary_search_lookup(key, idx.table()).unwrap());
            }
        }

        for key in (4_001..5_000).map(|k| k as f64 / 10.0) {
            assert!(idx.lookup(key).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn uniform_keys() {
        let dataset = dataset(Uniform::new(0.0, 1_000.0));

        for config in configs() {
            check_index(&dataset, &LearnedIndex::build_with(&dataset, &config));
        }
    }

    #[test]
    fn normal_keys() {
        let dataset = dataset(Normal::new(450.0, 100.0).unwrap());

        for config in configs() {
            check_index(&dataset, &LearnedIndex::build_with(&dataset, &config));
        }
    }

    #[test]
    fn skewed_keys() {
        let dataset = dataset(LogNormal::new(3.0, 1.5).unwrap());

        for config in configs() {
            check_index(&dataset, &LearnedIndex::build_with(&dataset, &config));
        }
    }

    #[test]
    fn piecewise_bounds_are_tighter_on_skewed_keys() {
        let dataset = dataset(LogNormal::new(3.0, 1.5).unwrap());

        let linear = LearnedIndex::build(&dataset);
        let piecewise = LearnedIndex::build_with(&dataset, &IndexConfig::piecewise(256));

        assert!(piecewise.bounds().width() < linear.bounds().width());
    }

    #[test]
    fn persisted_index() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("index.rmi");
        let dataset = dataset(Normal::new(450.0, 100.0).unwrap());

        for config in configs() {
            {
                let idx = LearnedIndex::build_with(&dataset, &config);
                idx.save(&path)?;
            }

            let idx = LearnedIndex::open(&path)?;
            check_index(&dataset, &idx);
        }

        Ok(())
    }

    #[test]
    fn opening_missing_index_fails() {
        let temp_dir = tempdir().unwrap();

        let err = LearnedIndex::open(temp_dir.path().join("missing.rmi")).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_fatal());
    }
}
