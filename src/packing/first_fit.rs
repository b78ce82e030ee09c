//! First-fit decreasing over an ordered capacity index.
//!
//! Items are sorted longest first. Open folders are indexed by
//! `(remaining, creation index)` in a `BTreeSet`, so the folder with the
//! least remaining capacity that can still take an item is a single range
//! lookup instead of a scan over every folder.
//!
//! This approximates classic scan-order first-fit: it prefers the tightest
//! folder rather than the earliest one, and only falls back to creation
//! order when remaining capacities tie.

use std::collections::BTreeSet;

use super::{place, validate, PackError, PackingStrategy};
use crate::core::{sort_by_duration_desc, AudioItem, Folder, Partition};

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitDecreasing;

impl PackingStrategy for FirstFitDecreasing {
    fn name(&self) -> &'static str {
        "optimized_first_fit"
    }

    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        validate(items, capacity)?;

        let mut sorted = items.to_vec();
        sort_by_duration_desc(&mut sorted);

        let mut folders: Vec<Folder> = Vec::new();
        let mut index: BTreeSet<(u64, usize)> = BTreeSet::new();

        for item in sorted {
            let candidate = index.range((item.duration, 0)..).next().copied();
            if let Some(key) = candidate {
                index.remove(&key);
            }

            let idx = place(&mut folders, candidate.map(|(_, idx)| idx), capacity, item);
            index.insert((folders[idx].remaining(), idx));
        }

        log::debug!(
            "{}: {} items into {} folders",
            self.name(),
            items.len(),
            folders.len()
        );
        Ok(Partition::new(capacity, folders))
    }
}
