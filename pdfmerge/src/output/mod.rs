//! Output formatting and display for pdfmerge.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The merge progress bar
//! - Selection listings that fit the terminal width
//! - Summary reports
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::output::OutputFormatter;
//! use pdfmerge::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod display;
pub mod formatter;
pub mod progress;

pub use display::{fit_label, full_label};
pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressStyle};

use crate::merge::MergeOutcome;
use crate::selection::{AddReport, Selection};
use crate::utils::format_file_size;

/// Terminal width used when it cannot be detected.
pub const DEFAULT_COLUMNS: usize = 80;

/// Best guess at the terminal width, from `COLUMNS`.
pub fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .filter(|&columns: &usize| columns > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Print the selection as a numbered list sized for `columns`.
pub fn display_selection(formatter: &OutputFormatter, selection: &Selection, columns: usize) {
    for (index, entry) in selection.entries().iter().enumerate() {
        formatter.list_item(
            index + 1,
            &fit_label(&entry.display_name, entry.page_count, columns),
        );
    }
}

/// One-line description of a selection, e.g. `3 files, 12 pages`.
pub fn selection_summary(selection: &Selection) -> String {
    let files = selection.len();
    let pages = selection.total_pages();
    format!(
        "{files} file{}, {pages} page{}",
        if files == 1 { "" } else { "s" },
        if pages == 1 { "" } else { "s" }
    )
}

/// Report files that could not be added to a selection.
pub fn display_add_report(formatter: &OutputFormatter, report: &AddReport) {
    for rejected in &report.rejected {
        formatter.warning(&format!("Skipping: {}", rejected.reason));
    }

    if report.only_duplicates() {
        formatter.info("All of those files are already selected");
    } else if report.duplicates > 0 {
        formatter.debug(&format!(
            "Ignored {} file(s) already in the selection",
            report.duplicates
        ));
    }
}

/// Display the result of a finished merge.
pub fn display_merge_summary(formatter: &OutputFormatter, outcome: &MergeOutcome) {
    let stats = &outcome.statistics;

    formatter.success(&format!(
        "Merged {} file{} into {}",
        stats.files_merged,
        if stats.files_merged == 1 { "" } else { "s" },
        outcome.write.output_path.display()
    ));
    formatter.info(&format!(
        "  {} page{}, {}",
        stats.total_pages,
        if stats.total_pages == 1 { "" } else { "s" },
        format_file_size(outcome.write.file_size)
    ));

    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", outcome.write.write_time.as_secs_f64()),
    );
    formatter.detail(
        "Compressed",
        if outcome.write.compressed { "yes" } else { "no" },
    );
}
