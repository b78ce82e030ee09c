//! Run report
//!
//! A JSON record of one packing run: what was packed, with which strategy,
//! how long it took, and what was skipped along the way.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use crate::core::{AudioItem, Partition};
use crate::manifest::SkippedLine;

/// One folder in the report
#[derive(Debug, Clone, Serialize)]
pub struct FolderReport {
    /// 1-based folder number, matching `folder_{n}.txt`
    pub index: usize,
    pub total_duration: u64,
    pub remaining: u64,
    pub items: Vec<AudioItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Local>,
    pub strategy: String,
    pub capacity: u64,
    pub folder_count: usize,
    pub item_count: usize,
    pub total_duration: u64,
    pub elapsed_ms: u64,
    pub folders: Vec<FolderReport>,
    pub skipped_lines: Vec<SkippedLine>,
    pub missing_files: Vec<String>,
}

impl RunReport {
    pub fn new(
        started_at: DateTime<Local>,
        strategy: &str,
        partition: &Partition,
        elapsed: Duration,
    ) -> Self {
        let folders = partition
            .iter()
            .enumerate()
            .map(|(i, folder)| FolderReport {
                index: i + 1,
                total_duration: folder.total_duration(),
                remaining: folder.remaining(),
                items: folder.items().to_vec(),
            })
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            started_at,
            strategy: strategy.to_string(),
            capacity: partition.capacity(),
            folder_count: partition.len(),
            item_count: partition.item_count(),
            total_duration: partition.total_duration(),
            elapsed_ms: elapsed.as_millis() as u64,
            folders,
            skipped_lines: Vec::new(),
            missing_files: Vec::new(),
        }
    }

    pub fn with_skipped_lines(mut self, skipped: Vec<SkippedLine>) -> Self {
        self.skipped_lines = skipped;
        self
    }

    pub fn with_missing_files(mut self, missing: Vec<String>) -> Self {
        self.missing_files = missing;
        self
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize report: {}", e))
    }

    /// Write the report as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<(), String> {
        std::fs::write(path, self.to_json()?)
            .map_err(|e| format!("Failed to write report {}: {}", path.display(), e))?;
        log::info!("Wrote run report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::dispatch;
    use tempfile::TempDir;

    fn sample_report() -> RunReport {
        let items = vec![
            AudioItem::new("a.mp3", 60),
            AudioItem::new("b.mp3", 50),
            AudioItem::new("c.mp3", 40),
            AudioItem::new("d.mp3", 10),
        ];
        let partition = dispatch("optimized_first_fit", &items, 100).unwrap();
        RunReport::new(
            Local::now(),
            "optimized_first_fit",
            &partition,
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_report_totals() {
        let report = sample_report();
        assert_eq!(report.folder_count, 2);
        assert_eq!(report.item_count, 4);
        assert_eq!(report.total_duration, 160);
        assert_eq!(report.elapsed_ms, 12);
        assert_eq!(report.folders[0].index, 1);
        assert_eq!(report.folders[0].remaining, 0);
        assert_eq!(report.folders[1].total_duration, 60);
    }

    #[test]
    fn test_report_json_fields() {
        let report = sample_report()
            .with_skipped_lines(vec![SkippedLine {
                line_number: 3,
                content: "junk".to_string(),
                reason: "bad".to_string(),
            }])
            .with_missing_files(vec!["d.mp3".to_string()]);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["strategy"], "optimized_first_fit");
        assert_eq!(value["capacity"], 100);
        assert_eq!(value["folders"][0]["items"][0]["name"], "a.mp3");
        assert_eq!(value["skipped_lines"][0]["line_number"], 3);
        assert_eq!(value["missing_files"][0], "d.mp3");
        assert!(value["run_id"].as_str().is_some());
    }

    #[test]
    fn test_write_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        sample_report().write_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"folder_count\": 2"));
    }
}
