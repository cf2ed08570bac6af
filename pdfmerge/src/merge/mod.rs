//! PDF merging operations.
//!
//! This module provides the core PDF merging functionality with:
//! - Page-tree concatenation in selection order
//! - Per-file progress reporting
//! - A single-slot background job runner
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::merge::{MergeRequest, MergeRunner};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = MergeRunner::new();
//! let request = MergeRequest::new(
//!     vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     "merged.pdf",
//! );
//!
//! let mut handle = runner.start(request)?;
//! while let Some(event) = handle.next_event().await {
//!     println!("{event:?}");
//! }
//! let outcome = handle.wait().await?;
//! println!("Merged {} pages", outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod job;
pub mod merger;

pub use job::{MergeEvent, MergeHandle, MergeOutcome, MergeRequest, MergeRunner};
pub use merger::{MergeProgress, MergeResult, MergeStatistics, Merger};

use crate::error::Result;
use lopdf::Document;
use std::path::Path;

/// Merge `paths` in order without progress reporting.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if any input cannot be loaded or joined.
pub fn merge_pdfs<P: AsRef<Path>>(paths: &[P]) -> Result<(Document, MergeStatistics)> {
    let result = Merger::new().merge(paths, |_| {})?;
    Ok((result.document, result.statistics))
}
