//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by `build.rs` to render the man page, so it only
//! depends on `clap` and the `pdfmerge` library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfmerge::config::{Config, MoveSpec, OverwriteMode};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::preferences::{self, Preferences};

/// Combine PDF files into a single document.
///
/// pdfmerge collects PDFs from files, folders or glob patterns, lets you
/// reorder them, and writes one merged PDF. Without an explicit output path
/// the result is named after the selection and placed next to the first
/// input.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Combine PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Preferences file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE", env = preferences::ENV_VAR)]
    pub preferences: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files into one document
    ///
    /// Examples:
    ///   pdfmerge merge a.pdf b.pdf -o book.pdf
    ///   pdfmerge merge scans/ --move 3:1
    ///   pdfmerge merge 'chapter*.pdf' --name book
    Merge(MergeArgs),

    /// List the PDFs of a folder in merge order
    List(ListArgs),

    /// Show or change saved preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

/// Arguments of `pdfmerge merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files, folders or glob patterns (in order)
    ///
    /// Folders contribute their PDFs sorted by name. Inputs are merged in
    /// the order given.
    #[arg(value_name = "INPUT", required_unless_present = "input_list")]
    pub inputs: Vec<PathBuf>,

    /// Read more inputs from a file (one path per line, '#' comments)
    ///
    /// Paths from the file are appended after direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Output PDF file path
    ///
    /// Defaults to a name derived from the selection, in the folder of the
    /// first input.
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["output_dir", "name"])]
    pub output: Option<PathBuf>,

    /// Directory for the merged file (keeps the generated name)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name for the merged file (".pdf" is appended if missing)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Include PDFs in subfolders of folder inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// Move the file at position FROM to position TO (1-based, repeatable)
    ///
    /// Moves are applied in the order given, after all inputs are
    /// collected. Use `pdfmerge list` to see positions.
    #[arg(long = "move", value_name = "FROM:TO", value_parser = parse_move)]
    pub moves: Vec<MoveSpec>,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Dry run - validate inputs and show the plan without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show each input and merge statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Open the merged file in the default viewer
    #[arg(long)]
    pub open: bool,

    /// Write the output without stream compression
    #[arg(long)]
    pub no_compress: bool,

    /// Number of files inspected concurrently (default: CPU cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Arguments of `pdfmerge list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Folder to scan
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Include PDFs in subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,

    /// Fit labels to this many columns (default: $COLUMNS or 80)
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Number of files inspected concurrently (default: CPU cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// `pdfmerge prefs` subcommands.
#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Print the current preferences as JSON
    Show,

    /// Print the location of the preferences file
    Path,

    /// Change one preference
    Set {
        /// Preference name
        #[arg(value_parser = preferences::KEYS)]
        key: String,

        /// New value (true/false for switches, a path or "" for
        /// default-output-dir)
        value: String,
    },

    /// Restore the defaults
    Reset,
}

fn parse_move(s: &str) -> std::result::Result<MoveSpec, String> {
    MoveSpec::parse(s).map_err(|e| format!("{e:#}"))
}

impl Cli {
    /// Whether verbose diagnostics were requested.
    pub fn is_verbose(&self) -> bool {
        matches!(&self.command, Command::Merge(args) if args.verbose)
    }

    /// Preferences file this invocation reads and writes.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when no location can be determined.
    pub fn preferences_path(&self) -> Result<PathBuf> {
        Preferences::resolve_path(self.preferences.as_deref()).ok_or_else(|| {
            PdfMergeError::invalid_config(
                "Cannot determine the preferences location; use --preferences",
            )
        })
    }
}

impl MergeArgs {
    /// Resolve `--force` / `--no-clobber` into an overwrite mode.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Whether folder inputs are scanned recursively, by flag or preference.
    pub fn include_subfolders(&self, prefs: &Preferences) -> bool {
        self.recursive || prefs.include_subfolders
    }

    /// Build the validated configuration once inputs and output are known.
    ///
    /// Saved preferences fill in switches the command line left off.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the combination is invalid.
    pub fn to_config(
        &self,
        inputs: Vec<PathBuf>,
        output: PathBuf,
        prefs: &Preferences,
    ) -> Result<Config> {
        let config = Config {
            inputs,
            output,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode: self.overwrite_mode(),
            recursive: self.include_subfolders(prefs),
            open_after: self.open || prefs.auto_open,
            jobs: self.jobs,
        };

        config.validate().map_err(|e| {
            PdfMergeError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
