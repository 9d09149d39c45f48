//! Splitting the URL set into disjoint per-worker partitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::input::UrlSet;

/// URLs owned by a single worker.
pub type Partition = Vec<String>;

/// How the URL set is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionStrategy {
    /// Round-robin into `min(workers, urls)` partitions whose sizes differ by at most one.
    #[default]
    Balanced,
    /// Fixed chunks of `floor(urls / workers)`; leftovers form one extra, smaller partition.
    Chunked,
}

impl FromStr for PartitionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(PartitionStrategy::Balanced),
            "chunked" => Ok(PartitionStrategy::Chunked),
            other => Err(format!(
                "unknown partition strategy '{}' (expected balanced or chunked)",
                other
            )),
        }
    }
}

/// Splits `urls` into disjoint partitions; every URL lands in exactly one.
///
/// `workers` is clamped to at least 1. No partition is ever empty.
pub fn partition(urls: UrlSet, workers: usize, strategy: PartitionStrategy) -> Vec<Partition> {
    let workers = workers.max(1);
    let urls = urls.into_vec();
    match strategy {
        PartitionStrategy::Balanced => balanced(urls, workers),
        PartitionStrategy::Chunked => chunked(urls, workers),
    }
}

fn balanced(urls: Vec<String>, workers: usize) -> Vec<Partition> {
    let count = workers.min(urls.len());
    let mut parts: Vec<Partition> = (0..count)
        .map(|_| Vec::with_capacity(urls.len() / count + 1))
        .collect();
    for (i, url) in urls.into_iter().enumerate() {
        parts[i % count].push(url);
    }
    parts
}

fn chunked(urls: Vec<String>, workers: usize) -> Vec<Partition> {
    // per == 0 would never drain the pool.
    let per = (urls.len() / workers).max(1);
    let mut pool = urls.into_iter().peekable();
    let mut parts: Vec<Partition> = Vec::new();
    while pool.peek().is_some() {
        parts.push(pool.by_ref().take(per).collect());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn urls(n: usize) -> UrlSet {
        UrlSet::new((0..n).map(|i| format!("http://host/{i}"))).unwrap()
    }

    fn assert_exact_cover(parts: &[Partition], n: usize) {
        let all: Vec<&String> = parts.iter().flatten().collect();
        assert_eq!(all.len(), n, "no URL duplicated");
        let unique: HashSet<&String> = all.into_iter().collect();
        assert_eq!(unique.len(), n, "no URL missing");
        assert!(parts.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn balanced_sizes_differ_by_at_most_one() {
        let parts = partition(urls(10), 3, PartitionStrategy::Balanced);
        assert_eq!(parts.len(), 3);
        let sizes: Vec<usize> = parts.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_exact_cover(&parts, 10);
    }

    #[test]
    fn balanced_fewer_urls_than_workers() {
        let parts = partition(urls(2), 32, PartitionStrategy::Balanced);
        assert_eq!(parts.len(), 2);
        assert_exact_cover(&parts, 2);
    }

    #[test]
    fn chunked_remainder_gets_extra_partition() {
        let parts = partition(urls(10), 3, PartitionStrategy::Chunked);
        let sizes: Vec<usize> = parts.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_exact_cover(&parts, 10);
    }

    #[test]
    fn chunked_even_split() {
        let parts = partition(urls(8), 4, PartitionStrategy::Chunked);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn chunked_fewer_urls_than_workers_terminates() {
        let parts = partition(urls(3), 32, PartitionStrategy::Chunked);
        assert_eq!(parts.len(), 3);
        assert_exact_cover(&parts, 3);
    }

    #[test]
    fn zero_workers_is_clamped() {
        let parts = partition(urls(5), 0, PartitionStrategy::Balanced);
        assert_eq!(parts.len(), 1);
        assert_exact_cover(&parts, 5);
    }

    #[test]
    fn exact_cover_for_many_shapes() {
        for n in 1..40 {
            for workers in 1..12 {
                for strategy in [PartitionStrategy::Balanced, PartitionStrategy::Chunked] {
                    let parts = partition(urls(n), workers, strategy);
                    assert_exact_cover(&parts, n);
                }
            }
        }
    }
}
