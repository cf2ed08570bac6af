//! pdfmerge - Combine PDF files into a single document.
//!
//! Command-line front-end: collects a selection, settles the output name and
//! runs the merge job with a progress bar.

mod cli;

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ListArgs, MergeArgs, PrefsCommand};
use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::discovery::{expand_inputs, find_pdfs};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::io::{PdfReader, WriteOptions};
use pdfmerge::merge::{MergeEvent, MergeRequest, MergeRunner};
use pdfmerge::naming::{SmartDefaults, normalize_file_name};
use pdfmerge::output::{self, OutputFormatter, ProgressBar, ProgressStyle};
use pdfmerge::preferences::Preferences;
use pdfmerge::selection::Selection;
use pdfmerge::utils::open_in_default_app;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "PDFMERGE_LOG";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.is_verbose());

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,pdfmerge=debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let prefs_path = cli.preferences_path()?;
    tracing::debug!(path = %prefs_path.display(), "using preferences file");

    match cli.command {
        Command::Merge(args) => {
            let prefs = Preferences::load(&prefs_path)?;
            run_merge(&args, &prefs).await
        }
        Command::List(args) => {
            let prefs = Preferences::load(&prefs_path)?;
            run_list(&args, &prefs).await
        }
        Command::Prefs(command) => run_prefs(command, &prefs_path),
    }
}

async fn run_merge(args: &MergeArgs, prefs: &Preferences) -> Result<()> {
    // A dry run always reports its plan, even with --quiet.
    let formatter = OutputFormatter::new(args.quiet && !args.dry_run, args.verbose);

    if args.jobs == Some(0) {
        return Err(PdfMergeError::invalid_config(
            "Number of jobs must be at least 1",
        ));
    }

    let mut operands = args.inputs.clone();
    if let Some(list) = &args.input_list {
        operands.extend(read_input_list(list).await?);
    }
    if operands.is_empty() {
        return Err(PdfMergeError::NoFilesToMerge);
    }

    let files = expand_inputs(&operands, args.include_subfolders(prefs))?;
    formatter.info(&format!("Checking {} file(s)...", files.len()));

    let results = PdfReader::new()
        .inspect_all(&files, worker_count(args.jobs))
        .await;

    let mut selection = Selection::new();
    let report = match single_folder(&operands) {
        Some(folder) => selection.replace_with_folder(folder, results),
        None => selection.add_inspected(results),
    };
    output::display_add_report(&formatter, &report);

    if selection.is_empty() {
        return Err(PdfMergeError::NoFilesToMerge);
    }

    for spec in &args.moves {
        spec.apply(&mut selection)
            .map_err(|e| PdfMergeError::invalid_config(format!("{e:#}")))?;
    }

    let output = resolve_output(args, &selection, prefs)?;
    let config = args.to_config(selection.paths(), output, prefs)?;

    if formatter.is_verbose() || config.dry_run {
        formatter.blank_line();
        formatter.section("Merge order");
        output::display_selection(&formatter, &selection, output::terminal_columns());
        formatter.blank_line();
    }
    formatter.info(&format!(
        "Selected {}",
        output::selection_summary(&selection)
    ));

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        if config.output.exists() {
            formatter.warning("  The output file already exists");
        }
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    let overwrite_mode = handle_output_overwrite(&config, &formatter)?;

    let request = MergeRequest {
        inputs: config.inputs.clone(),
        output: config.output.clone(),
        overwrite_mode,
        write_options: WriteOptions {
            compress: !args.no_compress,
            ..Default::default()
        },
    };

    let runner = MergeRunner::new();
    let mut handle = runner.start(request)?;

    let mut progress = if formatter.is_quiet() {
        ProgressBar::disabled()
    } else {
        ProgressBar::new(selection.len(), ProgressStyle::Bar)
    };

    while let Some(event) = handle.next_event().await {
        match event {
            MergeEvent::Started { total } => progress.set_total(total),
            MergeEvent::Adding { index, name, .. } => {
                if !progress.is_enabled() {
                    formatter.debug(&format!("Adding {name}"));
                }
                progress.set_message(format!("Adding {name}"));
                progress.update(index);
            }
            MergeEvent::Saving { path } => {
                progress.finish_with_message(format!("Saving {}", path.display()));
            }
            MergeEvent::Finished { .. } => {}
        }
    }

    let outcome = match handle.wait().await {
        Ok(outcome) => outcome,
        Err(err) => {
            progress.clear();
            return Err(err);
        }
    };

    if prefs.show_summary || formatter.is_verbose() {
        formatter.blank_line();
        output::display_merge_summary(&formatter, &outcome);
    } else {
        formatter.success(&format!(
            "Created {} ({})",
            outcome.write.output_path.display(),
            outcome.write.format_file_size()
        ));
    }

    if config.open_after
        && let Err(err) = open_in_default_app(&outcome.write.output_path)
    {
        formatter.warning(&err.to_string());
    }

    Ok(())
}

async fn run_list(args: &ListArgs, prefs: &Preferences) -> Result<()> {
    if args.jobs == Some(0) {
        return Err(PdfMergeError::invalid_config(
            "Number of jobs must be at least 1",
        ));
    }

    let files = find_pdfs(&args.dir, args.recursive || prefs.include_subfolders)?;
    let results = PdfReader::new()
        .inspect_all(&files, worker_count(args.jobs))
        .await;

    let mut selection = Selection::new();
    let report = selection.replace_with_folder(&args.dir, results);

    let formatter = OutputFormatter::default();
    output::display_add_report(&formatter, &report);

    if args.json {
        println!("{}", serde_json::to_string_pretty(selection.entries())?);
        return Ok(());
    }

    if selection.is_empty() {
        formatter.info(&format!("No PDF files found in {}", args.dir.display()));
        return Ok(());
    }

    let columns = args.width.unwrap_or_else(output::terminal_columns);
    output::display_selection(&formatter, &selection, columns);
    formatter.blank_line();
    formatter.info(&output::selection_summary(&selection));

    Ok(())
}

fn run_prefs(command: PrefsCommand, path: &Path) -> Result<()> {
    let formatter = OutputFormatter::default();

    match command {
        PrefsCommand::Show => {
            let prefs = Preferences::load(path)?;
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
        PrefsCommand::Path => println!("{}", path.display()),
        PrefsCommand::Set { key, value } => {
            let mut prefs = Preferences::load(path)?;
            prefs.set(&key, &value)?;
            prefs.save(path)?;
            formatter.success(&format!("Saved {key} to {}", path.display()));
        }
        PrefsCommand::Reset => {
            Preferences::default().save(path)?;
            formatter.success(&format!("Restored defaults in {}", path.display()));
        }
    }

    Ok(())
}

/// Read extra inputs from a list file, skipping blank lines and `#` comments.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(path).await.map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            PdfMergeError::file_not_found(path)
        } else {
            PdfMergeError::from(err)
        }
    })?;

    let mut lines = BufReader::new(file).lines();
    let mut inputs = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        inputs.push(PathBuf::from(line));
    }

    tracing::debug!(count = inputs.len(), list = %path.display(), "read input list");
    Ok(inputs)
}

/// A lone folder operand replaces the selection with that folder's PDFs.
fn single_folder(operands: &[PathBuf]) -> Option<&Path> {
    match operands {
        [only] if only.is_dir() => Some(only.as_path()),
        _ => None,
    }
}

fn worker_count(jobs: Option<usize>) -> usize {
    jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// Settle the output path from `-o`, `--output-dir`, `--name` and the
/// generated defaults.
fn resolve_output(args: &MergeArgs, selection: &Selection, prefs: &Preferences) -> Result<PathBuf> {
    if let Some(output) = &args.output {
        return Ok(output.clone());
    }

    let mut defaults = SmartDefaults::current(selection, prefs);

    if let Some(dir) = &args.output_dir {
        if !dir.is_dir() {
            return Err(PdfMergeError::not_a_directory(dir));
        }
        defaults.output_dir = dir.clone();
    }

    if let Some(name) = &args.name {
        defaults.file_name = normalize_file_name(name)?;
    }

    Ok(defaults.output_path())
}

/// Handle output file overwrite scenarios.
///
/// Resolves `Prompt` by asking on the terminal, so the job only ever sees
/// `Force` or `NoClobber`.
fn handle_output_overwrite(config: &Config, formatter: &OutputFormatter) -> Result<OverwriteMode> {
    if !config.output.exists() {
        return Ok(OverwriteMode::NoClobber);
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(OverwriteMode::Force),
        OverwriteMode::NoClobber => Err(PdfMergeError::output_exists(&config.output)),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfMergeError::output_exists(&config.output));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfMergeError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(OverwriteMode::Force)
            } else {
                Err(PdfMergeError::Cancelled)
            }
        }
    }
}
