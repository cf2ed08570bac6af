//! PDF reading and inspection.
//!
//! Two levels of access are provided:
//! - [`PdfReader::load`] keeps the parsed document for merging
//! - [`PdfReader::inspect`] only reports what a selection needs to know
//!   (page count, size) and drops the document
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let info = reader.inspect(Path::new("a.pdf"))?;
//! println!("{} has {} pages", info.path.display(), info.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergeError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,

    /// Time taken to parse the document.
    pub load_time: Duration,
}

/// Lightweight facts about a PDF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfInfo {
    /// Path to the file.
    pub path: PathBuf,

    /// Number of pages.
    pub page_count: usize,

    /// File size in bytes.
    pub file_size: u64,
}

/// Outcome of inspecting one file.
pub type InspectResult = Result<PdfInfo>;

/// PDF reader with configurable verification.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents without pages.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load and parse a PDF document.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` / `NotAFile` for bad paths
    /// - `EncryptedPdf` for password-protected documents
    /// - `CorruptedPdf` for documents without pages (when verifying)
    /// - `FailedToLoadPdf` for anything the parser rejects
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        check_file(path)?;

        let start = Instant::now();

        let document = Document::load(path).map_err(|err| {
            let message = err.to_string();
            let lowered = message.to_lowercase();
            let mentions_encryption = ["encrypt", "decrypt", "password"]
                .iter()
                .any(|word| lowered.contains(word));
            if mentions_encryption || declares_encryption(path) {
                PdfMergeError::encrypted_pdf(path)
            } else {
                PdfMergeError::failed_to_load_pdf(path, message)
            }
        })?;

        // Documents that could not be opened with an empty password keep
        // their Encrypt entry.
        if document.is_encrypted() {
            return Err(PdfMergeError::encrypted_pdf(path));
        }

        let page_count = document.get_pages().len();
        if self.verify && page_count == 0 {
            return Err(PdfMergeError::corrupted_pdf(path, "PDF has no pages"));
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let load_time = start.elapsed();

        tracing::trace!(
            path = %path.display(),
            page_count,
            ?load_time,
            "loaded PDF"
        );

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            file_size,
            load_time,
        })
    }

    /// Validate a PDF and report its page count and size.
    pub fn inspect(&self, path: &Path) -> InspectResult {
        let loaded = self.load(path)?;
        Ok(PdfInfo {
            path: loaded.path,
            page_count: loaded.page_count,
            file_size: loaded.file_size,
        })
    }

    /// Inspect many files concurrently.
    ///
    /// Parsing runs on tokio's blocking pool with at most `workers` files in
    /// flight. Results come back in the same order as `paths`.
    pub async fn inspect_all(&self, paths: &[PathBuf], workers: usize) -> Vec<InspectResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);
        let reader = *self;

        let tasks = paths.iter().cloned().map(|path| async move {
            let fallback = path.clone();
            tokio::task::spawn_blocking(move || reader.inspect(&path))
                .await
                .unwrap_or_else(|err| {
                    Err(PdfMergeError::failed_to_load_pdf(
                        fallback,
                        format!("inspection task failed: {err}"),
                    ))
                })
        });

        stream::iter(tasks).buffered(workers).collect().await
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

fn check_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfMergeError::file_not_found(path));
    }
    if !path.is_file() {
        return Err(PdfMergeError::not_a_file(path));
    }
    Ok(())
}

/// Whether the raw file carries an `/Encrypt` entry, for parse failures
/// that do not say why.
fn declares_encryption(path: &Path) -> bool {
    std::fs::read(path)
        .map(|bytes| bytes.windows(b"/Encrypt".len()).any(|w| w == b"/Encrypt"))
        .unwrap_or(false)
}
