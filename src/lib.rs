//! Audio Folder Packer
//!
//! Packs audio files into the fewest fixed-duration folders it can, using
//! one of several interchangeable bin-packing strategies, then writes each
//! folder out as a summary file plus a directory of copied audio.

pub mod core;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod packing;
pub mod report;
pub mod settings;

mod test_fixtures;

pub use crate::core::{AudioItem, Folder, Partition};
pub use packing::{dispatch, PackError, PackingStrategy, StrategyKind};
