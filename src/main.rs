//! Folder Packer - command line front end
//!
//! Reads a manifest of `name HH:MM:SS` lines, packs the files into
//! fixed-duration folders with the chosen strategy, and writes one summary
//! file plus one directory of copied audio per folder.
//!
//! ```bash
//! folder-packer --input AudiosInfo.txt --source Audios --destination out \
//!     --capacity 100 --strategy optimized_first_fit
//!
//! # Compare every strategy without touching disk
//! folder-packer --input AudiosInfo.txt --compare
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Parser;

use folder_packer::core::{format_duration, Partition};
use folder_packer::logging;
use folder_packer::manifest::read_manifest;
use folder_packer::output::ResultEmitter;
use folder_packer::packing::{compare, dispatch, StrategyKind};
use folder_packer::report::RunReport;
use folder_packer::settings::PackerSettings;

#[derive(Parser, Debug)]
#[command(
    name = "folder-packer",
    about = "Pack audio files into fixed-duration folders",
    version
)]
struct Cli {
    /// Manifest file with one `name HH:MM:SS` entry per line.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory containing the audio files named in the manifest.
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output directory for summaries and folder copies.
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Folder capacity in seconds.
    #[arg(short = 'c', long)]
    capacity: Option<u64>,

    /// Packing strategy name; prompts with a menu when omitted.
    #[arg(short = 'a', long)]
    strategy: Option<String>,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Keep existing contents of the destination directory.
    #[arg(long)]
    no_clear: bool,

    /// Persist the effective settings as the new defaults.
    #[arg(long)]
    save_settings: bool,

    /// Pack and print the folders without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Run every strategy and print a comparison table.
    #[arg(long)]
    compare: bool,

    /// List the available strategies and exit.
    #[arg(long)]
    list_strategies: bool,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if cli.list_strategies {
        for (i, kind) in StrategyKind::ALL.iter().enumerate() {
            println!("{}. {:<28} {}", i + 1, kind.name(), kind.label());
        }
        return Ok(());
    }

    let settings = resolve_settings(&cli)?;

    let input = settings
        .input_file
        .clone()
        .ok_or_else(|| "No manifest given (use --input)".to_string())?;
    let manifest = read_manifest(&input)?;
    let capacity = settings.folder_capacity;

    if cli.compare {
        print_comparison(&manifest.items, capacity);
        return Ok(());
    }

    let strategy = match &settings.strategy {
        Some(name) => name.clone(),
        None => prompt_for_strategy()?.name().to_string(),
    };

    let started_at = Local::now();
    let start = Instant::now();
    log::info!(
        "Packing {} items into {}s folders with {}",
        manifest.items.len(),
        capacity,
        strategy
    );

    let partition =
        dispatch(&strategy, &manifest.items, capacity).map_err(|e| e.to_string())?;
    log::info!(
        "Packed into {} folders (average fill {:.1}%)",
        partition.len(),
        partition.average_fill() * 100.0
    );

    let mut missing = Vec::new();
    if cli.dry_run {
        print_partition(&partition);
    } else {
        let source = settings
            .source_dir
            .clone()
            .ok_or_else(|| "No source directory given (use --source)".to_string())?;
        let destination = settings
            .destination_dir
            .clone()
            .ok_or_else(|| "No destination directory given (use --destination)".to_string())?;

        let emitter = ResultEmitter::new(source, destination);
        if settings.clear_destination {
            emitter.clear()?;
        }
        let emitted = emitter.emit(&partition)?;
        missing = emitted.copy.missing;
    }

    let elapsed = start.elapsed();
    log::info!("Total execution time: {:.2} sec", elapsed.as_secs_f64());

    if let Some(path) = &cli.report {
        RunReport::new(started_at, &strategy, &partition, elapsed)
            .with_skipped_lines(manifest.skipped)
            .with_missing_files(missing)
            .write_to(path)?;
    }

    Ok(())
}

/// Load settings, apply flags, and persist them when asked
///
/// A `--config` file that does not exist yet is only acceptable together
/// with `--save-settings`, which creates it.
fn resolve_settings(cli: &Cli) -> Result<PackerSettings, String> {
    let settings = match &cli.config {
        Some(path) if cli.save_settings && !path.exists() => {
            log::info!("Creating new settings file {}", path.display());
            PackerSettings::default()
        }
        Some(path) => PackerSettings::load_from(path)?,
        None => PackerSettings::load(),
    };
    let settings = apply_overrides(settings, cli);

    if cli.save_settings {
        let path = match &cli.config {
            Some(path) => settings.save_to(path).map(|_| path.clone())?,
            None => settings.save()?,
        };
        log::info!("Saved settings to {}", path.display());
    }

    Ok(settings)
}

/// Layer command-line flags over loaded settings
fn apply_overrides(mut settings: PackerSettings, cli: &Cli) -> PackerSettings {
    if let Some(input) = &cli.input {
        settings.input_file = Some(input.clone());
    }
    if let Some(source) = &cli.source {
        settings.source_dir = Some(source.clone());
    }
    if let Some(destination) = &cli.destination {
        settings.destination_dir = Some(destination.clone());
    }
    if let Some(capacity) = cli.capacity {
        settings.folder_capacity = capacity;
    }
    if let Some(strategy) = &cli.strategy {
        settings.strategy = Some(strategy.clone());
    }
    if cli.no_clear {
        settings.clear_destination = false;
    }
    settings
}

/// Show the numbered strategy menu and read a choice from stdin
fn prompt_for_strategy() -> Result<StrategyKind, String> {
    println!("Choose an algorithm:");
    for (i, kind) in StrategyKind::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, kind.label());
    }
    print!("Enter the number corresponding to your choice: ");
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to write prompt: {}", e))?;

    let mut choice = String::new();
    io::stdin()
        .lock()
        .read_line(&mut choice)
        .map_err(|e| format!("Failed to read choice: {}", e))?;

    StrategyKind::from_menu_choice(&choice)
        .ok_or_else(|| format!("Invalid choice '{}'. Exiting...", choice.trim()))
}

fn print_partition(partition: &Partition) {
    for (i, folder) in partition.iter().enumerate() {
        println!(
            "Folder {} - {} ({} files, {}s free)",
            i + 1,
            format_duration(folder.total_duration()),
            folder.len(),
            folder.remaining()
        );
        for item in folder.items() {
            println!("    {} - {} seconds", item.name, item.duration);
        }
    }
}

fn print_comparison(items: &[folder_packer::AudioItem], capacity: u64) {
    println!(
        "{:<28} {:>8} {:>10} {:>10}",
        "Strategy", "Folders", "Avg fill", "Time (ms)"
    );
    for outcome in compare(items, capacity) {
        let ms = outcome.elapsed.as_secs_f64() * 1000.0;
        match &outcome.result {
            Ok(partition) => println!(
                "{:<28} {:>8} {:>9.1}% {:>10.2}",
                outcome.kind.name(),
                partition.len(),
                partition.average_fill() * 100.0,
                ms
            ),
            Err(e) => println!("{:<28} failed: {}", outcome.kind.name(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("AudiosInfo.txt");
        std::fs::write(
            &path,
            "a.mp3 00:01:00\nb.mp3 00:00:50\nc.mp3 00:00:40\nd.mp3 00:00:10\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_cli_parses_full_run() {
        let cli = Cli::try_parse_from([
            "folder-packer",
            "--input",
            "AudiosInfo.txt",
            "--source",
            "Audios",
            "--destination",
            "out",
            "--capacity",
            "4800",
            "--strategy",
            "best_fit",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.capacity, Some(4800));
        assert_eq!(cli.strategy.as_deref(), Some("best_fit"));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_non_numeric_capacity() {
        let result = Cli::try_parse_from(["folder-packer", "--capacity", "1.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_settings() {
        let settings = PackerSettings {
            folder_capacity: 100,
            strategy: Some("worst_fit_heap".to_string()),
            input_file: Some(PathBuf::from("old.txt")),
            source_dir: Some(PathBuf::from("old_src")),
            destination_dir: None,
            clear_destination: true,
        };
        let cli = Cli::try_parse_from([
            "folder-packer",
            "--input",
            "new.txt",
            "--capacity",
            "300",
            "--no-clear",
        ])
        .unwrap();

        let merged = apply_overrides(settings, &cli);
        assert_eq!(merged.input_file, Some(PathBuf::from("new.txt")));
        assert_eq!(merged.source_dir, Some(PathBuf::from("old_src")));
        assert_eq!(merged.folder_capacity, 300);
        assert_eq!(merged.strategy.as_deref(), Some("worst_fit_heap"));
        assert!(!merged.clear_destination);
    }

    #[test]
    fn test_save_settings_creates_new_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("new.json");
        let cli = Cli::try_parse_from([
            "folder-packer",
            "--config",
            config.to_str().unwrap(),
            "--save-settings",
            "--capacity",
            "300",
        ])
        .unwrap();

        let settings = resolve_settings(&cli).unwrap();
        assert_eq!(settings.folder_capacity, 300);

        let saved = PackerSettings::load_from(&config).unwrap();
        assert_eq!(saved.folder_capacity, 300);
        assert!(saved.clear_destination);
    }

    #[test]
    fn test_missing_config_without_save_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("absent.json");
        let cli =
            Cli::try_parse_from(["folder-packer", "--config", config.to_str().unwrap()]).unwrap();

        assert!(resolve_settings(&cli).unwrap_err().contains("not found"));
        assert!(!config.exists());
    }

    #[test]
    fn test_dry_run_packs_through_registry() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = write_manifest(temp_dir.path());
        let config = temp_dir.path().join("settings.json");
        let report = temp_dir.path().join("report.json");
        let cli = Cli::try_parse_from([
            "folder-packer",
            "--config",
            config.to_str().unwrap(),
            "--save-settings",
            "--input",
            manifest.to_str().unwrap(),
            "--strategy",
            "optimized_first_fit",
            "--report",
            report.to_str().unwrap(),
            "--dry-run",
        ])
        .unwrap();

        run(cli).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(value["strategy"], "optimized_first_fit");
        assert_eq!(value["folder_count"], 2);
    }

    #[test]
    fn test_unknown_strategy_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = write_manifest(temp_dir.path());
        let config = temp_dir.path().join("settings.json");
        let cli = Cli::try_parse_from([
            "folder-packer",
            "--config",
            config.to_str().unwrap(),
            "--save-settings",
            "--input",
            manifest.to_str().unwrap(),
            "--strategy",
            "no_such_strategy",
            "--dry-run",
        ])
        .unwrap();

        let err = run(cli).unwrap_err();
        assert!(err.contains("unknown strategy 'no_such_strategy'"));
        assert!(err.contains("best_fit"));
    }
}
