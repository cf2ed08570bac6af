//! The ordered list of files to merge.
//!
//! A [`Selection`] is what the user builds before merging: files are added
//! individually or by folder, validated on the way in, and reordered freely.
//! The order of the entries is the order of the pages in the output.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfReader;
//! use pdfmerge::selection::Selection;
//! use std::path::PathBuf;
//!
//! let reader = PdfReader::new();
//! let paths = [PathBuf::from("b.pdf"), PathBuf::from("a.pdf")];
//!
//! let mut selection = Selection::new();
//! let report = selection.add_inspected(paths.iter().map(|p| reader.inspect(p)));
//! println!("added {}, rejected {}", report.added, report.rejected.len());
//!
//! // Drag the last file to the front.
//! selection.move_item(1, 0);
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::discovery::{display_name, is_pdf_path};
use crate::error::PdfMergeError;
use crate::io::InspectResult;
use crate::utils::identity_path;

/// One file in the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfEntry {
    /// Location on disk.
    pub path: PathBuf,
    /// Name shown to the user.
    pub display_name: String,
    /// Number of pages, known from validation.
    pub page_count: usize,
}

/// Where the current entries came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionSource {
    /// Files picked one by one (or nothing yet).
    #[default]
    Files,
    /// Every PDF of a folder.
    Folder(PathBuf),
}

/// A file that could not be added.
#[derive(Debug)]
pub struct RejectedFile {
    /// The offending path, when known.
    pub path: Option<PathBuf>,
    /// Why it was rejected.
    pub reason: PdfMergeError,
}

/// Summary of an add operation.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Files appended to the selection.
    pub added: usize,
    /// Files skipped because they were already selected.
    pub duplicates: usize,
    /// Files that failed validation.
    pub rejected: Vec<RejectedFile>,
}

impl AddReport {
    /// True when nothing was added and nothing failed, i.e. every file was
    /// already selected.
    pub fn only_duplicates(&self) -> bool {
        self.added == 0 && self.rejected.is_empty() && self.duplicates > 0
    }
}

/// Ordered, duplicate-free list of PDFs to merge.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<PdfEntry>,
    source: SelectionSource,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append validated files.
    ///
    /// Successful inspections become entries unless the path is already
    /// selected or lacks a `.pdf` extension. Failed inspections are collected
    /// in the report. The source switches to [`SelectionSource::Files`]
    /// while existing entries are kept.
    pub fn add_inspected<I>(&mut self, results: I) -> AddReport
    where
        I: IntoIterator<Item = InspectResult>,
    {
        self.source = SelectionSource::Files;
        self.extend(results, None)
    }

    /// Replace the selection with the files of `folder`.
    ///
    /// Display names are relative to the folder so that files found in
    /// subfolders stay distinguishable.
    pub fn replace_with_folder<I>(&mut self, folder: &Path, results: I) -> AddReport
    where
        I: IntoIterator<Item = InspectResult>,
    {
        self.entries.clear();
        self.source = SelectionSource::Folder(folder.to_path_buf());
        self.extend(results, Some(folder))
    }

    fn extend<I>(&mut self, results: I, root: Option<&Path>) -> AddReport
    where
        I: IntoIterator<Item = InspectResult>,
    {
        let mut report = AddReport::default();

        for result in results {
            match result {
                Ok(info) if !is_pdf_path(&info.path) => {
                    report.rejected.push(RejectedFile {
                        path: Some(info.path.clone()),
                        reason: PdfMergeError::not_a_pdf(info.path),
                    });
                }
                Ok(info) if self.contains(&info.path) => {
                    report.duplicates += 1;
                }
                Ok(info) => {
                    self.entries.push(PdfEntry {
                        display_name: display_name(&info.path, root),
                        path: info.path,
                        page_count: info.page_count,
                    });
                    report.added += 1;
                }
                Err(reason) => {
                    report.rejected.push(RejectedFile {
                        path: error_path(&reason),
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            added = report.added,
            duplicates = report.duplicates,
            rejected = report.rejected.len(),
            total = self.entries.len(),
            "updated selection"
        );

        report
    }

    /// Whether `path` is already selected, under this or any other spelling.
    pub fn contains(&self, path: &Path) -> bool {
        let key = identity_path(path);
        self.entries
            .iter()
            .any(|entry| entry.path == path || identity_path(&entry.path) == key)
    }

    /// Remove the entry for `path`. Returns true if it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        let key = identity_path(path);
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.path != path && identity_path(&entry.path) != key);
        self.entries.len() != before
    }

    /// Remove and return the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<PdfEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Swap the entry at `index` with its predecessor.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        true
    }

    /// Swap the entry at `index` with its successor.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Move the entry at `index` to the front.
    pub fn move_to_top(&mut self, index: usize) -> bool {
        self.move_item(index, 0)
    }

    /// Move the entry at `index` to the end.
    pub fn move_to_bottom(&mut self, index: usize) -> bool {
        match self.entries.len() {
            0 => false,
            len => self.move_item(index, len - 1),
        }
    }

    /// Drag-and-drop reorder: take the entry at `from` out and insert it at
    /// `to`. Entries in between shift by one.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Drop all entries and forget the folder.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.source = SelectionSource::Files;
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in merge order.
    pub fn entries(&self) -> &[PdfEntry] {
        &self.entries
    }

    /// Paths in merge order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    /// Sum of page counts.
    pub fn total_pages(&self) -> usize {
        self.entries.iter().map(|entry| entry.page_count).sum()
    }

    /// Where the entries came from.
    pub fn source(&self) -> &SelectionSource {
        &self.source
    }
}

fn error_path(err: &PdfMergeError) -> Option<PathBuf> {
    match err {
        PdfMergeError::FileNotFound { path }
        | PdfMergeError::NotAFile { path }
        | PdfMergeError::NotAPdf { path }
        | PdfMergeError::FailedToLoadPdf { path, .. }
        | PdfMergeError::EncryptedPdf { path }
        | PdfMergeError::CorruptedPdf { path, .. } => Some(path.clone()),
        _ => None,
    }
}
