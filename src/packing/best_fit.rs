//! Best-fit over a max-heap of remaining capacity.
//!
//! Items are taken in input order. For each item, folders are popped from the
//! heap while the top still has room; the last one popped is the tightest fit.
//! Every other popped folder goes back unchanged.

use std::collections::BinaryHeap;

use super::{place, validate, PackError, PackingStrategy};
use crate::core::{AudioItem, Folder, Partition};

#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl PackingStrategy for BestFit {
    fn name(&self) -> &'static str {
        "best_fit"
    }

    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        validate(items, capacity)?;

        let mut folders: Vec<Folder> = Vec::new();
        // (remaining, index): among equal remaining, higher indices pop first,
        // so the last candidate popped is the earliest folder.
        let mut heap: BinaryHeap<(u64, usize)> = BinaryHeap::new();
        let mut popped: Vec<(u64, usize)> = Vec::new();

        for item in items.iter().cloned() {
            popped.clear();
            while let Some(&(remaining, _)) = heap.peek() {
                if remaining < item.duration {
                    break;
                }
                if let Some(entry) = heap.pop() {
                    popped.push(entry);
                }
            }

            let tightest = popped.pop().map(|(_, idx)| idx);
            heap.extend(popped.iter().copied());

            let idx = place(&mut folders, tightest, capacity, item);
            heap.push((folders[idx].remaining(), idx));
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
