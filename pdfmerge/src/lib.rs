//! pdfmerge - Combine PDF files into a single document.
//!
//! This library provides everything a PDF merging front-end needs:
//!
//! - Discovery of PDF files in folders and glob patterns
//! - Validation of inputs (page counts, encryption, corruption)
//! - An ordered, reorderable selection of files
//! - Smart defaults for the output name and location
//! - Page-tree concatenation that preserves page order
//! - A background merge job with progress events
//! - Persistent JSON preferences
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerge::merge;
//! use pdfmerge::io::PdfWriter;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = [PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (mut document, stats) = merge::merge_pdfs(&inputs)?;
//! PdfWriter::new().write(&mut document, Path::new("merged.pdf"))?;
//! println!("Created {} page document", stats.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Building a Selection
//!
//! ```no_run
//! use pdfmerge::discovery::find_pdfs;
//! use pdfmerge::io::PdfReader;
//! use pdfmerge::naming::SmartDefaults;
//! use pdfmerge::preferences::Preferences;
//! use pdfmerge::selection::Selection;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let folder = Path::new("scans");
//! let files = find_pdfs(folder, false)?;
//! let results = PdfReader::new().inspect_all(&files, 4).await;
//!
//! let mut selection = Selection::new();
//! let report = selection.replace_with_folder(folder, results);
//! selection.move_to_top(selection.len() - 1);
//!
//! let defaults = SmartDefaults::for_selection(
//!     &selection,
//!     &Preferences::default(),
//!     &chrono::Local::now(),
//! );
//! println!("{} files -> {}", report.added, defaults.output_path().display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod io;
pub mod merge;
pub mod naming;
pub mod output;
pub mod preferences;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfMergeError, Result};
pub use merge::{MergeEvent, MergeRequest, MergeRunner};
pub use preferences::Preferences;
pub use selection::Selection;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
