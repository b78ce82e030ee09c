//! Partition: the ordered result of one packing run
//!
//! Folder order is creation order, which keeps emitted output stable for the
//! same input.

use serde::Serialize;

use super::folder::Folder;

/// Folders produced by a single strategy invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    capacity: u64,
    folders: Vec<Folder>,
}

impl Partition {
    pub fn new(capacity: u64, folders: Vec<Folder>) -> Self {
        Self { capacity, folders }
    }

    /// A partition with no folders (empty input)
    pub fn empty(capacity: u64) -> Self {
        Self::new(capacity, Vec::new())
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Number of folders
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Folder> {
        self.folders.iter()
    }

    /// Number of items across all folders
    pub fn item_count(&self) -> usize {
        self.folders.iter().map(Folder::len).sum()
    }

    pub fn total_duration(&self) -> u64 {
        self.folders.iter().map(Folder::total_duration).sum()
    }

    /// Mean fill ratio across folders, 0.0 for an empty partition
    pub fn average_fill(&self) -> f64 {
        if self.folders.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.folders.iter().map(Folder::fill_ratio).sum();
        sum / self.folders.len() as f64
    }

    pub fn into_folders(self) -> Vec<Folder> {
        self.folders
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Folder;
    type IntoIter = std::slice::Iter<'a, Folder>;

    fn into_iter(self) -> Self::IntoIter {
        self.folders.iter()
    }
}

/// Format seconds as `HH:MM:SS`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AudioItem;

    fn folder_with(capacity: u64, durations: &[u64]) -> Folder {
        let mut folder = Folder::new(capacity);
        for (i, d) in durations.iter().enumerate() {
            folder
                .try_place(AudioItem::new(format!("t{}", i), *d))
                .unwrap();
        }
        folder
    }

    #[test]
    fn test_partition_totals() {
        let partition = Partition::new(
            100,
            vec![folder_with(100, &[60, 40]), folder_with(100, &[50])],
        );

        assert_eq!(partition.len(), 2);
        assert_eq!(partition.item_count(), 3);
        assert_eq!(partition.total_duration(), 150);
        assert!((partition.average_fill() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::empty(100);
        assert!(partition.is_empty());
        assert_eq!(partition.item_count(), 0);
        assert_eq!(partition.average_fill(), 0.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(36000), "10:00:00");
    }
}
