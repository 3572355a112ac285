use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use rmi_core::{search_table, IndexConfig, LearnedIndex};
use serde::Serialize;

pub const DEFAULT_INDEX_PATH: &str = "index.rmi";

/// Parses one finite `f64` key per line. Blank lines are skipped.
pub fn parse_keys(text: &str) -> anyhow::Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| -> anyhow::Result<f64> {
            let key = line
                .parse::<f64>()
                .with_context(|| format!("line {}: invalid key {line:?}", i + 1))?;
            anyhow::ensure!(key.is_finite(), "line {}: key {key} is not finite", i + 1);
            Ok(key)
        })
        .collect()
}

pub fn read_keys(path: impl AsRef<Path>) -> anyhow::Result<Vec<f64>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read keys from {}", path.display()))?;
    parse_keys(&text)
}

/// Reads an [`IndexConfig`] from a JSON file, or the default config.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<IndexConfig> {
    let Some(path) = path else {
        return Ok(IndexConfig::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Half of the queries are keys from the index, the other half are drawn
/// uniformly from its key range and mostly miss.
pub fn sample_queries(idx: &LearnedIndex, count: usize, rng: &mut impl Rng) -> Vec<f64> {
    let keys = idx.table().keys();
    let (Some(&min), Some(&max)) = (keys.first(), keys.last()) else {
        return Vec::new();
    };

    let mut queries: Vec<f64> = (0..count)
        .map(|i| {
            if i % 2 == 0 {
                keys[rng.gen_range(0..keys.len())]
            } else {
                rng.gen_range(min..=max)
            }
        })
        .collect();
    queries.shuffle(rng);
    queries
}

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub keys: usize,
    pub queries: usize,
    pub found: usize,
    pub window: u64,
    pub learned: Duration,
    pub binary: Duration,
}

impl BenchReport {
    /// Times [`LearnedIndex::lookup`] against a plain binary search over the
    /// same table.
    pub fn run(idx: &LearnedIndex, queries: &[f64]) -> Self {
        let start = Instant::now();
        let found = queries.iter().filter(|&&q| idx.lookup(q).is_ok()).count();
        let learned = start.elapsed();

        let keys = idx.table().keys();
        let start = Instant::now();
        let binary_found = queries
            .iter()
            .filter(|&&q| keys.get(search_table(keys, q)) == Some(&q))
            .count();
        let binary = start.elapsed();

        if binary_found != found {
            log::warn!("learned lookup found {found} keys, binary search {binary_found}");
        }

        Self {
            keys: idx.len(),
            queries: queries.len(),
            found,
            window: idx.bounds().width(),
            learned,
            binary,
        }
    }
}

fn per_query(total: Duration, queries: usize) -> humantime::FormattedDuration {
    let queries = u32::try_from(queries.max(1)).unwrap_or(u32::MAX);
    humantime::format_duration(total / queries)
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} queries over {} keys, {} found, window of {} slots",
            self.queries, self.keys, self.found, self.window
        )?;
        writeln!(
            f,
            "learned: {} ({} per query)",
            humantime::format_duration(self.learned),
            per_query(self.learned, self.queries)
        )?;
        write!(
            f,
            "binary:  {} ({} per query)",
            humantime::format_duration(self.binary),
            per_query(self.binary, self.queries)
        )
    }
}
