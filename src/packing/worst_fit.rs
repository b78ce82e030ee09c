//! Worst-fit strategies.
//!
//! Worst-fit places each item in the folder with the most room left, which
//! spreads durations evenly across folders. Three variants are offered:
//!
//! - [`WorstFitHeap`]: sorted input; only the single roomiest folder is
//!   examined. If the item does not fit there a new folder is opened.
//! - [`WorstFitLinear`] with `presort = true`: sorted input; every folder is
//!   scanned for the roomiest one that fits (exact worst-fit decreasing).
//! - [`WorstFitLinear`] with `presort = false`: same scan, input order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{place, validate, PackError, PackingStrategy};
use crate::core::{sort_by_duration_desc, AudioItem, Folder, Partition};

/// Worst-fit decreasing that checks only the roomiest folder
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFitHeap;

impl PackingStrategy for WorstFitHeap {
    fn name(&self) -> &'static str {
        "worst_fit_heap"
    }

    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        validate(items, capacity)?;

        let mut sorted = items.to_vec();
        sort_by_duration_desc(&mut sorted);

        let mut folders: Vec<Folder> = Vec::new();
        // Reverse(index) makes the earliest folder win ties on remaining capacity
        let mut heap: BinaryHeap<(u64, Reverse<usize>)> = BinaryHeap::new();

        for item in sorted {
            let roomiest = heap.pop();
            let candidate = match roomiest {
                Some((remaining, Reverse(idx))) if remaining >= item.duration => Some(idx),
                Some(entry) => {
                    heap.push(entry);
                    None
                }
                None => None,
            };

            let idx = place(&mut folders, candidate, capacity, item);
            heap.push((folders[idx].remaining(), Reverse(idx)));
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

/// Worst-fit with a full scan of open folders
#[derive(Debug, Clone, Copy)]
pub struct WorstFitLinear {
    presort: bool,
}

impl WorstFitLinear {
    /// Longest items first (worst-fit decreasing)
    pub fn decreasing() -> Self {
        Self { presort: true }
    }

    /// Items in the order given
    pub fn input_order() -> Self {
        Self { presort: false }
    }
}

impl PackingStrategy for WorstFitLinear {
    fn name(&self) -> &'static str {
        if self.presort {
            "worst_fit_decreasing_linear"
        } else {
            "worst_fit_linear_search"
        }
    }

    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        validate(items, capacity)?;

        let mut ordered = items.to_vec();
        if self.presort {
            sort_by_duration_desc(&mut ordered);
        }

        let mut folders: Vec<Folder> = Vec::new();

        for item in ordered {
            let mut roomiest: Option<(usize, u64)> = None;
            for (idx, folder) in folders.iter().enumerate() {
                let remaining = folder.remaining();
                if !folder.fits(item.duration) {
                    continue;
                }
                if roomiest.is_none_or(|(_, best)| remaining > best) {
                    roomiest = Some((idx, remaining));
                }
            }

            place(&mut folders, roomiest.map(|(idx, _)| idx), capacity, item);
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
