//! Exact subset-sum packing.
//!
//! Each round fills one folder with the subset of remaining items whose total
//! duration is the largest value not exceeding the capacity, using a 0/1
//! subset-sum table over whole seconds. The chosen items leave the pool and
//! the table is rebuilt for the next folder, since every round depends on the
//! reduced pool.
//!
//! Cost is `items_remaining × capacity` per folder, so this is meant for
//! small inputs where folder count matters more than runtime. Capacities
//! above [`MAX_DP_CAPACITY`] are rejected, as are inputs whose first-round
//! table would exceed [`MAX_DP_TABLE_BITS`].
//!
//! # Table layout
//!
//! A single rolling row holds the best achievable sum for every capacity.
//! Alongside it, one bit per `(item, capacity)` cell records whether taking
//! that item improved the sum, which is all reconstruction needs:
//!
//! ```text
//! best[j]    = max(best[j], best[j - w_i] + w_i)      for j = C..=w_i
//! take[i][j] = best[j - w_i] + w_i > previous best[j]
//! ```
//!
//! Zero-duration items are always taken; they add nothing to the sum and
//! would otherwise never leave the pool.

use super::{validate, PackError, PackingStrategy};
use crate::core::{sort_by_duration_desc, AudioItem, Folder, Partition};

/// Largest capacity (in seconds) the subset-sum table may be built for
pub const MAX_DP_CAPACITY: u64 = 1 << 20;

/// Largest decision table, in bits (`items × (capacity + 1)`), one round may allocate
pub const MAX_DP_TABLE_BITS: u64 = 1 << 31;

#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetSum;

impl PackingStrategy for SubsetSum {
    fn name(&self) -> &'static str {
        "dynamic_programming"
    }

    fn pack(&self, items: &[AudioItem], capacity: u64) -> Result<Partition, PackError> {
        validate(items, capacity)?;
        if capacity > MAX_DP_CAPACITY {
            return Err(PackError::InvalidCapacity {
                capacity,
                reason: format!(
                    "subset-sum packing supports capacities up to {}",
                    MAX_DP_CAPACITY
                ),
            });
        }
        let table_bits = (items.len() as u64).saturating_mul(capacity + 1);
        if table_bits > MAX_DP_TABLE_BITS {
            return Err(PackError::InvalidCapacity {
                capacity,
                reason: format!(
                    "subset-sum table for {} items would need {} bits (limit {})",
                    items.len(),
                    table_bits,
                    MAX_DP_TABLE_BITS
                ),
            });
        }

        let mut pool = items.to_vec();
        let mut folders: Vec<Folder> = Vec::new();

        while !pool.is_empty() {
            sort_by_duration_desc(&mut pool);

            let selected = select_densest_subset(&pool, capacity as usize);
            debug_assert!(!selected.is_empty());

            let mut slots: Vec<Option<AudioItem>> = pool.into_iter().map(Some).collect();
            let mut folder = Folder::new(capacity);
            for &i in &selected {
                if let Some(item) = slots[i].take() {
                    let placed = folder.try_place(item);
                    debug_assert!(placed.is_ok());
                }
            }
            pool = slots.into_iter().flatten().collect();

            log::trace!(
                "{}: folder {} takes {} items ({}s of {}s), {} left",
                self.name(),
                folders.len() + 1,
                folder.len(),
                folder.total_duration(),
                capacity,
                pool.len()
            );
            folders.push(folder);
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

/// Bit matrix of take decisions, one row per item
struct DecisionTable {
    row_words: usize,
    bits: Vec<u64>,
}

impl DecisionTable {
    fn new(rows: usize, columns: usize) -> Self {
        let row_words = columns.div_ceil(64);
        Self {
            row_words,
            bits: vec![0; rows * row_words],
        }
    }

    fn set(&mut self, row: usize, column: usize) {
        self.bits[row * self.row_words + column / 64] |= 1u64 << (column % 64);
    }

    fn get(&self, row: usize, column: usize) -> bool {
        self.bits[row * self.row_words + column / 64] & (1u64 << (column % 64)) != 0
    }
}

/// Indices into `pool` of the subset with the largest total not exceeding
/// `capacity`, in reconstruction order (last pool position first)
fn select_densest_subset(pool: &[AudioItem], capacity: usize) -> Vec<usize> {
    let mut best = vec![0u64; capacity + 1];
    let mut take = DecisionTable::new(pool.len(), capacity + 1);

    for (i, item) in pool.iter().enumerate() {
        let w = item.duration as usize;
        if w == 0 {
            for j in 0..=capacity {
                take.set(i, j);
            }
            continue;
        }
        for j in (w..=capacity).rev() {
            let candidate = best[j - w] + w as u64;
            if candidate > best[j] {
                best[j] = candidate;
                take.set(i, j);
            }
        }
    }

    let mut selected = Vec::new();
    let mut residual = capacity;
    for i in (0..pool.len()).rev() {
        if take.get(i, residual) {
            selected.push(i);
            residual -= pool[i].duration as usize;
        }
    }
    selected
}
