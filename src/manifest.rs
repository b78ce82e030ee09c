//! Manifest reading
//!
//! A manifest lists one audio file per line as `name HH:MM:SS`. The name is
//! everything before the last run of whitespace, so names may contain spaces.
//! Bad lines are logged and skipped rather than failing the whole read.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::AudioItem;

/// A manifest line that could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Parsed manifest contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub items: Vec<AudioItem>,
    pub skipped: Vec<SkippedLine>,
}

/// Convert `HH:MM:SS` to seconds
///
/// Hours may be any non-negative number; minutes and seconds must be below 60.
pub fn parse_duration(text: &str) -> Result<u64, String> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Expected HH:MM:SS, got '{}'", text));
    }

    let mut fields = [0u64; 3];
    for (field, part) in fields.iter_mut().zip(&parts) {
        *field = part
            .parse::<u64>()
            .map_err(|e| format!("Invalid number '{}' in duration: {}", part, e))?;
    }

    let [hours, minutes, seconds] = fields;
    if minutes >= 60 || seconds >= 60 {
        return Err(format!("Minutes and seconds must be below 60 in '{}'", text));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| format!("Duration out of range: '{}'", text))
}

/// Parse a single non-empty manifest line
pub fn parse_line(line: &str) -> Result<AudioItem, String> {
    let line = line.trim();
    let (name, duration) = line
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| "Expected '<name> HH:MM:SS'".to_string())?;

    let name = name.trim_end();
    if name.is_empty() {
        return Err("Missing file name".to_string());
    }

    Ok(AudioItem::new(name, parse_duration(duration)?))
}

/// Parse manifest text, skipping empty and malformed lines
pub fn parse_manifest(contents: &str) -> Manifest {
    let mut manifest = Manifest::default();

    for (index, raw) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            log::warn!("Skipping empty line at {}", line_number);
            manifest.skipped.push(SkippedLine {
                line_number,
                content: String::new(),
                reason: "empty line".to_string(),
            });
            continue;
        }

        match parse_line(line) {
            Ok(item) => manifest.items.push(item),
            Err(reason) => {
                log::error!("Invalid format on line {}: {} ({})", line_number, line, reason);
                manifest.skipped.push(SkippedLine {
                    line_number,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    manifest
}

/// Read and parse a manifest file
pub fn read_manifest(path: &Path) -> Result<Manifest, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read manifest {}: {}", path.display(), e))?;

    let manifest = parse_manifest(&contents);
    log::info!(
        "Read {} items from {} ({} lines skipped)",
        manifest.items.len(),
        path.display(),
        manifest.skipped.len()
    );
    Ok(manifest)
}
