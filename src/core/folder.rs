//! Folder (bin) model
//!
//! A folder has a fixed capacity set at creation and only ever grows by
//! appending items. `try_place` is the single place where capacity
//! arithmetic happens; every packing strategy goes through it.

use serde::Serialize;

use super::item::AudioItem;

/// A fixed-capacity output folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    capacity: u64,
    remaining: u64,
    items: Vec<AudioItem>,
}

impl Folder {
    /// Create an empty folder with the full capacity available
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            remaining: capacity,
            items: Vec::new(),
        }
    }

    /// Whether an item of the given duration would fit
    pub fn fits(&self, duration: u64) -> bool {
        duration <= self.remaining
    }

    /// Append an item if it fits
    ///
    /// On failure the folder is left untouched and the item is handed back
    /// to the caller.
    pub fn try_place(&mut self, item: AudioItem) -> Result<(), AudioItem> {
        if !self.fits(item.duration) {
            return Err(item);
        }
        self.remaining -= item.duration;
        self.items.push(item);
        Ok(())
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Capacity still available in this folder
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn items(&self) -> &[AudioItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total duration of all items in this folder
    pub fn total_duration(&self) -> u64 {
        self.capacity - self.remaining
    }

    /// Fraction of capacity in use (0.0 - 1.0)
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.total_duration() as f64 / self.capacity as f64
    }

    pub fn into_items(self) -> Vec<AudioItem> {
        self.items
    }
}
