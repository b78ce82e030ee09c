//! Packing strategies
//!
//! Every strategy takes a list of items and a folder capacity and returns a
//! [`Partition`]. Strategies are purely algorithmic: no I/O, no shared state,
//! and each call runs to completion before returning.
//!
//! | Strategy | Pre-sort | Placement | Cost |
//! |---|---|---|---|
//! | [`FirstFitDecreasing`] | descending | tightest fitting folder (ordered index) | O(n log n) |
//! | [`BestFit`] | none | tightest fitting folder (heap) | O(n·m log m) worst |
//! | [`WorstFitHeap`] | descending | largest-remaining folder only | O(n log m) |
//! | [`WorstFitLinear`] (sorted) | descending | largest-remaining fitting folder | O(n·m) |
//! | [`WorstFitLinear`] (unsorted) | none | largest-remaining fitting folder | O(n·m) |
//! | [`SubsetSum`] | descending per round | densest subset per folder | O(n·C) per folder |

mod best_fit;
mod error;
mod first_fit;
pub mod registry;
mod subset_sum;
mod worst_fit;

pub use best_fit::BestFit;
pub use error::PackError;
pub use first_fit::FirstFitDecreasing;
pub use registry::{compare, dispatch, StrategyKind, StrategyOutcome};
pub use subset_sum::{SubsetSum, MAX_DP_CAPACITY, MAX_DP_TABLE_BITS};
pub use worst_fit::{WorstFitHeap, WorstFitLinear};

use crate::core::{AudioItem, Folder, Partition};

/// A bin-packing algorithm
pub trait PackingStrategy {
    /// Symbolic name used for selection
    fn name(&self) -> &'static str;

    /// Pack `items` into folders of `capacity` seconds each
    ///
    /// Fails without returning any folders if the capacity is invalid or an
    /// item cannot fit into an empty folder.
    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError>;
}

/// Checks shared by every strategy before any packing work starts
pub(crate) fn validate(items: &[AudioItem], capacity: u64) -> Result<(), PackError> {
    if capacity == 0 {
        return Err(PackError::InvalidCapacity {
            capacity,
            reason: "capacity must be positive".to_string(),
        });
    }

    if let Some(item) = items.iter().find(|i| i.duration > capacity) {
        return Err(PackError::ItemTooLarge {
            name: item.name.clone(),
            size: item.duration,
            capacity,
        });
    }

    Ok(())
}

/// Place `item` into the candidate folder, or into a new folder when there is
/// no candidate or it lacks room. Returns the index of the folder used.
pub(crate) fn place(
    folders: &mut Vec<Folder>,
    candidate: Option<usize>,
    capacity: u64,
    item: AudioItem,
) -> usize {
    let item = match candidate {
        Some(idx) => match folders[idx].try_place(item) {
            Ok(()) => return idx,
            Err(item) => item,
        },
        None => item,
    };

    let mut folder = Folder::new(capacity);
    // validate() guarantees every item fits an empty folder
    let opened = folder.try_place(item);
    debug_assert!(opened.is_ok());
    folders.push(folder);
    log::trace!("opened folder {} (capacity {})", folders.len(), capacity);
    folders.len() - 1
}
