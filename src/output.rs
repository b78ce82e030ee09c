//! Result emission
//!
//! Materializes a packed [`Partition`] on disk:
//! - `folder_{n}.txt` summary files with each folder's total duration and listing
//! - `Folder_{n}/` directories holding copies of the source audio files
//!
//! Folder numbers start at 1 and follow partition order.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{Folder, Partition};

/// Outcome of copying source files into folder directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Number of files copied
    pub copied: usize,
    /// Names that were listed but not found in the source directory
    pub missing: Vec<String>,
    /// Names rejected because they are not plain file names
    pub rejected: Vec<String>,
    /// Bytes copied by this run
    pub bytes_written: u64,
}

/// Outcome of a full emit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitReport {
    pub summary_files: Vec<PathBuf>,
    pub folder_dirs: Vec<PathBuf>,
    pub copy: CopyReport,
    /// Size of everything under the destination after emitting
    pub destination_bytes: u64,
}

/// Writes a partition to a destination directory
#[derive(Debug, Clone)]
pub struct ResultEmitter {
    /// Where the audio files listed in the manifest live
    source_dir: PathBuf,
    /// Where summaries and folder directories are written
    destination_dir: PathBuf,
}

impl ResultEmitter {
    pub fn new(source_dir: impl Into<PathBuf>, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    /// Remove previous output from the destination
    pub fn clear(&self) -> Result<(), String> {
        clear_output_directory(&self.destination_dir)
    }

    /// Write summaries, then copy files into per-folder directories
    pub fn emit(&self, partition: &Partition) -> Result<EmitReport, String> {
        let summary_files = write_folder_summaries(partition, &self.destination_dir)?;
        let copy = copy_folder_files(&self.source_dir, partition, &self.destination_dir)?;

        let folder_dirs = (1..=partition.len())
            .map(|n| folder_dir_path(&self.destination_dir, n))
            .collect();
        let destination_bytes = calculate_dir_size(&self.destination_dir)?;

        log::info!(
            "Emitted {} folders to {} ({} files copied, {} missing)",
            partition.len(),
            self.destination_dir.display(),
            copy.copied,
            copy.missing.len()
        );
        log::debug!(
            "Copied {} bytes, destination now holds {} bytes",
            copy.bytes_written,
            destination_bytes
        );

        Ok(EmitReport {
            summary_files,
            folder_dirs,
            copy,
            destination_bytes,
        })
    }
}

/// Path of the summary file for folder `n` (1-based)
pub fn summary_file_path(destination: &Path, n: usize) -> PathBuf {
    destination.join(format!("folder_{}.txt", n))
}

/// Path of the copy directory for folder `n` (1-based)
pub fn folder_dir_path(destination: &Path, n: usize) -> PathBuf {
    destination.join(format!("Folder_{}", n))
}

/// Empty `dir`, or create it if it does not exist
///
/// Entries that cannot be removed are logged and left in place.
pub fn clear_output_directory(dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
        log::info!("Output directory created: {}", dir.display());
        return Ok(());
    }

    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read output directory: {}", e))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Failed to read entry in {}. Reason: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        let result = if is_dir {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match result {
            Ok(()) if is_dir => log::debug!("Deleted directory: {}", path.display()),
            Ok(()) => {}
            Err(e) => log::warn!("Failed to delete {}. Reason: {}", path.display(), e),
        }
    }

    Ok(())
}

/// Render the summary text for one folder
pub fn folder_summary(folder: &Folder) -> String {
    let mut text = format!("Total Duration: {} seconds\nFiles:\n", folder.total_duration());
    for item in folder.items() {
        text.push_str(&format!("{} - {} seconds\n", item.name, item.duration));
    }
    text
}

/// Write `folder_{n}.txt` for each folder in the partition
pub fn write_folder_summaries(
    partition: &Partition,
    destination: &Path,
) -> Result<Vec<PathBuf>, String> {
    fs::create_dir_all(destination)
        .map_err(|e| format!("Failed to create output directory: {}", e))?;

    let mut written = Vec::with_capacity(partition.len());
    for (index, folder) in partition.iter().enumerate() {
        let path = summary_file_path(destination, index + 1);
        let mut file = fs::File::create(&path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        file.write_all(folder_summary(folder).as_bytes())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        written.push(path);
    }

    log::debug!("Wrote {} summary files", written.len());
    Ok(written)
}

/// Copy each folder's files from `source` into `Folder_{n}` under `destination`
///
/// Missing source files and names that would escape the folder directory are
/// skipped with a warning.
pub fn copy_folder_files(
    source: &Path,
    partition: &Partition,
    destination: &Path,
) -> Result<CopyReport, String> {
    let mut report = CopyReport::default();

    for (index, folder) in partition.iter().enumerate() {
        let folder_dir = folder_dir_path(destination, index + 1);
        fs::create_dir_all(&folder_dir)
            .map_err(|e| format!("Failed to create folder {}: {}", folder_dir.display(), e))?;
        log::info!("Created folder: {}", folder_dir.display());

        for item in folder.items() {
            if !is_plain_file_name(&item.name) {
                log::warn!("Refusing to copy {}: not a plain file name", item.name);
                report.rejected.push(item.name.clone());
                continue;
            }

            let src = source.join(&item.name);
            if !src.is_file() {
                log::warn!("File {} not found in source directory!", item.name);
                report.missing.push(item.name.clone());
                continue;
            }

            let dst = folder_dir.join(&item.name);
            let bytes = fs::copy(&src, &dst).map_err(|e| {
                format!("Failed to copy {} to {}: {}", src.display(), dst.display(), e)
            })?;
            log::debug!(
                "Copied: {} ({} seconds) -> {}",
                item.name,
                item.duration,
                folder_dir.display()
            );
            report.copied += 1;
            report.bytes_written += bytes;
        }
    }

    Ok(report)
}

/// Whether `name` is a single normal path component
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Total size of all files under `path`
pub fn calculate_dir_size(path: &Path) -> Result<u64, String> {
    let mut total = 0u64;

    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .map_err(|e| format!("Failed to get metadata: {}", e))?;
            total += metadata.len();
        }
    }

    Ok(total)
}
