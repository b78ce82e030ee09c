//! Core data model
//!
//! This module contains:
//! - Audio items (name + duration)
//! - Folders: fixed-capacity bins that items are placed into
//! - Partitions: the ordered folders produced by one packing run

mod folder;
mod item;
mod partition;

pub use folder::Folder;
pub use item::{sort_by_duration_desc, total_duration, AudioItem};
pub use partition::{format_duration, Partition};
