//! Audio item model
//!
//! An item is a named audio file with a duration in whole seconds. Items are
//! read once from the manifest and never change afterwards.

use serde::{Deserialize, Serialize};

/// A single audio file to be packed into a folder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioItem {
    /// File name, relative to the source directory
    pub name: String,
    /// Duration in seconds
    pub duration: u64,
}

impl AudioItem {
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Stable sort by descending duration
///
/// Items with equal durations keep their input order, so the decreasing
/// strategies are reproducible run to run.
pub fn sort_by_duration_desc(items: &mut [AudioItem]) {
    items.sort_by(|a, b| b.duration.cmp(&a.duration));
}

/// Sum of durations across a slice of items
pub fn total_duration(items: &[AudioItem]) -> u64 {
    items.iter().map(|i| i.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut items = vec![
            AudioItem::new("a", 10),
            AudioItem::new("b", 30),
            AudioItem::new("c", 10),
            AudioItem::new("d", 30),
        ];
        sort_by_duration_desc(&mut items);

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_total_duration() {
        let items = vec![AudioItem::new("a", 60), AudioItem::new("b", 45)];
        assert_eq!(total_duration(&items), 105);
        assert_eq!(total_duration(&[]), 0);
    }
}
