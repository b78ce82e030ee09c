//! Test fixtures for packing and output tests
//!
//! Provides deterministic item sets (seeded LCG, so failures reproduce) and
//! helpers that lay out a source directory of fake audio files on disk.

#![cfg(test)]

use std::collections::HashMap;
use std::path::Path;

use crate::core::{AudioItem, Partition};

/// Minimal linear congruential generator (Knuth MMIX constants)
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Uniform-ish value in `lo..=hi`
    pub fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

/// Generate `count` items with durations in `lo..=hi`
///
/// Names are `track_{index}` so duplicates in duration stay distinguishable.
pub fn generate_items(seed: u64, count: usize, lo: u64, hi: u64) -> Vec<AudioItem> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|i| AudioItem::new(format!("track_{:03}.mp3", i), rng.range(lo, hi)))
        .collect()
}

/// A handful of item sets covering small, large, duplicate-heavy and
/// exact-fit inputs for capacity 100
pub fn standard_item_sets() -> Vec<Vec<AudioItem>> {
    vec![
        generate_items(1, 20, 1, 100),
        generate_items(2, 60, 5, 60),
        generate_items(3, 40, 30, 70),
        generate_items(4, 25, 1, 10),
        (0..12)
            .map(|i| AudioItem::new(format!("same_{}.mp3", i), 25))
            .collect(),
        vec![
            AudioItem::new("a.mp3", 100),
            AudioItem::new("b.mp3", 0),
            AudioItem::new("c.mp3", 99),
            AudioItem::new("d.mp3", 1),
        ],
    ]
}

/// Count of each (name, duration) pair, for multiset comparisons
pub fn multiset(items: &[AudioItem]) -> HashMap<(String, u64), usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts
            .entry((item.name.clone(), item.duration))
            .or_insert(0) += 1;
    }
    counts
}

/// All items in a partition, folder by folder
pub fn flatten(partition: &Partition) -> Vec<AudioItem> {
    partition
        .iter()
        .flat_map(|f| f.items().iter().cloned())
        .collect()
}

/// Write a fake audio file for each name into `dir`
pub fn create_source_files(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).expect("Failed to create source directory");
    for name in names {
        std::fs::write(dir.join(name), format!("fake audio: {}", name))
            .expect("Failed to write source file");
    }
}
