//! Configuration module for pdfmerge.
//!
//! This module holds the validated, normalized settings of a single merge
//! run. The CLI builds a [`Config`] from its arguments; the library only
//! consumes it. It covers:
//! - Validation of argument combinations
//! - Reordering instructions (`--move FROM:TO`)
//! - The output overwrite policy

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::selection::Selection;
use crate::utils::same_file;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// A single reorder instruction: move the file at position `from` to
/// position `to`.
///
/// Positions are 1-indexed, the way they are printed by `pdfmerge list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSpec {
    /// 1-indexed source position.
    pub from: usize,
    /// 1-indexed destination position.
    pub to: usize,
}

impl MoveSpec {
    /// Parse a `FROM:TO` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not two positive integers separated
    /// by a colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfmerge::config::MoveSpec;
    ///
    /// let spec = MoveSpec::parse("3:1").unwrap();
    /// assert_eq!((spec.from, spec.to), (3, 1));
    /// assert!(MoveSpec::parse("0:1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let Some((from, to)) = s.split_once(':') else {
            bail!("Invalid move: {s}. Expected format like '3:1'");
        };

        let from: usize = from
            .trim()
            .parse()
            .with_context(|| format!("Invalid position: {from}"))?;
        let to: usize = to
            .trim()
            .parse()
            .with_context(|| format!("Invalid position: {to}"))?;

        if from == 0 || to == 0 {
            bail!("Positions must be positive (1-indexed)");
        }

        Ok(Self { from, to })
    }

    /// Apply the move to `selection`.
    ///
    /// # Errors
    ///
    /// Returns an error if either position is past the end of the selection.
    pub fn apply(&self, selection: &mut Selection) -> Result<()> {
        let len = selection.len();
        if self.from > len || self.to > len {
            bail!(
                "Cannot move {}:{}: the selection has {len} file(s)",
                self.from,
                self.to
            );
        }
        selection.move_item(self.from - 1, self.to - 1);
        Ok(())
    }
}

/// Complete configuration for a merge run.
///
/// This structure contains all settings needed to perform a merge,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Descend into subfolders when an input is a directory.
    pub recursive: bool,

    /// Open the merged file in the default viewer afterwards.
    pub open_after: bool,

    /// Number of files inspected concurrently (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.inputs.iter().any(|input| same_file(input, &self.output)) {
            bail!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            );
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PdfInfo;
    use rstest::rstest;

    fn base_config() -> Config {
        Config {
            inputs: vec![PathBuf::from("a.pdf")],
            output: PathBuf::from("out.pdf"),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::Prompt,
            recursive: false,
            open_after: false,
            jobs: None,
        }
    }

    fn selection_of(names: &[&str]) -> Selection {
        let mut selection = Selection::new();
        selection.add_inspected(names.iter().map(|name| {
            Ok(PdfInfo {
                path: PathBuf::from(format!("{name}.pdf")),
                page_count: 1,
                file_size: 1,
            })
        }));
        selection
    }

    fn names(selection: &Selection) -> Vec<String> {
        selection
            .entries()
            .iter()
            .map(|e| e.display_name.trim_end_matches(".pdf").to_string())
            .collect()
    }

    #[rstest]
    #[case("3:1", 3, 1)]
    #[case("1:2", 1, 2)]
    #[case(" 10 : 4 ", 10, 4)]
    fn test_move_spec_parse(#[case] input: &str, #[case] from: usize, #[case] to: usize) {
        assert_eq!(MoveSpec::parse(input).unwrap(), MoveSpec { from, to });
    }

    #[rstest]
    #[case("")]
    #[case("3")]
    #[case("0:1")]
    #[case("1:0")]
    #[case("a:b")]
    #[case("1:2:3")]
    #[case("-1:2")]
    fn test_move_spec_parse_invalid(#[case] input: &str) {
        assert!(MoveSpec::parse(input).is_err());
    }

    #[test]
    fn test_move_spec_apply() {
        let mut selection = selection_of(&["a", "b", "c"]);

        MoveSpec { from: 3, to: 1 }.apply(&mut selection).unwrap();
        assert_eq!(names(&selection), ["c", "a", "b"]);

        MoveSpec { from: 1, to: 1 }.apply(&mut selection).unwrap();
        assert_eq!(names(&selection), ["c", "a", "b"]);
    }

    #[test]
    fn test_move_spec_apply_out_of_range() {
        let mut selection = selection_of(&["a", "b"]);
        assert!(MoveSpec { from: 3, to: 1 }.apply(&mut selection).is_err());
        assert_eq!(names(&selection), ["a", "b"]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        // Test no inputs
        config.inputs.clear();
        assert!(config.validate().is_err());
        config.inputs = vec![PathBuf::from("a.pdf")];

        // Test verbose + quiet conflict
        config.verbose = true;
        config.quiet = true;
        assert!(config.validate().is_err());
        config.verbose = false;
        config.quiet = false;

        // Test zero jobs
        config.jobs = Some(0);
        assert!(config.validate().is_err());
        config.jobs = None;

        // Test output same as input
        config.output = PathBuf::from("a.pdf");
        assert!(config.validate().is_err());

        // Same file, different spelling
        config.output = PathBuf::from("./a.pdf");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_jobs() {
        let config = Config {
            jobs: Some(4),
            ..base_config()
        };
        assert_eq!(config.effective_jobs(), 4);

        let auto_config = Config {
            jobs: None,
            ..config
        };
        assert!(auto_config.effective_jobs() >= 1);
    }

    #[test]
    fn test_should_print() {
        let mut config = base_config();
        assert!(config.should_print());

        config.quiet = true;
        assert!(!config.should_print());

        config.dry_run = true;
        assert!(config.should_print()); // Dry run always prints
    }

    #[test]
    fn test_overwrite_mode_default() {
        assert_eq!(OverwriteMode::default(), OverwriteMode::Prompt);
    }
}
