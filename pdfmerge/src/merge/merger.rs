//! Core PDF merging implementation.
//!
//! Documents are concatenated at the page-tree level: every input keeps its
//! own page tree (and the attributes its pages inherit from it), and those
//! trees become children of a fresh root. Page order is input order, then
//! page order within each input.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::discovery::display_name;
use crate::error::{PdfMergeError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::utils::format_file_size;

/// Progress notifications emitted while merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeProgress {
    /// About to add the input at `index` (0-based, so it also counts the
    /// inputs already added).
    Adding {
        /// Position of the input.
        index: usize,
        /// Number of inputs.
        total: usize,
        /// File name shown to the user.
        name: String,
    },
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total size of input files.
    pub input_size: u64,

    /// Total time taken for merge.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged.
    pub merged_files: Vec<PathBuf>,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    reader: PdfReader,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `paths`, in order, into a single document.
    ///
    /// `on_progress` is called before each input is loaded. The first input
    /// that fails to load aborts the whole merge; nothing is written by this
    /// function in any case.
    ///
    /// # Errors
    ///
    /// - `NoFilesToMerge` if `paths` is empty
    /// - the failing input's load error
    /// - `MergeFailed` if a document's structure cannot be joined
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::Merger;
    /// # use std::path::PathBuf;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let inputs = [PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let result = Merger::new().merge(&inputs, |_| {})?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge<P, F>(&self, paths: &[P], mut on_progress: F) -> Result<MergeResult>
    where
        P: AsRef<Path>,
        F: FnMut(MergeProgress),
    {
        if paths.is_empty() {
            return Err(PdfMergeError::NoFilesToMerge);
        }

        let merge_start = Instant::now();
        let total = paths.len();

        let mut merged: Option<Document> = None;
        let mut input_size = 0;
        let mut merged_files = Vec::with_capacity(total);

        for (index, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            on_progress(MergeProgress::Adding {
                index,
                total,
                name: display_name(path, None),
            });

            let LoadedPdf {
                document,
                path,
                page_count,
                file_size,
                ..
            } = self.reader.load(path)?;

            tracing::debug!(path = %path.display(), page_count, "adding document");

            merged = Some(match merged {
                None => document,
                Some(mut base) => {
                    append_document(&mut base, document, page_count)?;
                    base
                }
            });
            input_size += file_size;
            merged_files.push(path);
        }

        let mut document = merged.ok_or(PdfMergeError::NoFilesToMerge)?;

        if merged_files.len() > 1 {
            document.prune_objects();
            document.renumber_objects();
        }

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            total_pages: document.get_pages().len(),
            input_size,
            merge_time: merge_start.elapsed(),
        };

        tracing::debug!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            merge_time = ?statistics.merge_time,
            "merge complete"
        );

        Ok(MergeResult {
            document,
            statistics,
            merged_files,
        })
    }
}

/// Object id of a document's page-tree root.
fn pages_root(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages reference: {e}")))
}

/// Make sure the base document's catalog points at a page-tree root that
/// carries no inheritable attributes of its own, creating one above the
/// current root if needed. Returns the root's id.
fn ensure_merge_root(base: &mut Document) -> Result<ObjectId> {
    let current = pages_root(base)?;

    let is_plain = base
        .get_dictionary(current)
        .map(|dict| {
            dict.iter()
                .all(|(key, _)| matches!(key.as_slice(), b"Type" | b"Kids" | b"Count"))
        })
        .unwrap_or(false);
    if is_plain {
        return Ok(current);
    }

    let count = base.get_pages().len() as i64;
    let root = base.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(current)],
        "Count" => count,
    });

    base.get_dictionary_mut(current)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages object: {e}")))?
        .set("Parent", Object::Reference(root));
    base.catalog_mut()
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get catalog: {e}")))?
        .set("Pages", Object::Reference(root));

    Ok(root)
}

/// Move every object of `doc` into `base` and hang its page tree under the
/// base root.
fn append_document(base: &mut Document, mut doc: Document, page_count: usize) -> Result<()> {
    let root = ensure_merge_root(base)?;

    doc.renumber_objects_with(base.max_id + 1);
    let child = pages_root(&doc)?;

    if doc.version > base.version {
        base.version = doc.version.clone();
    }
    base.max_id = base.max_id.max(doc.max_id);
    base.objects.extend(doc.objects);

    base.get_dictionary_mut(child)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages object: {e}")))?
        .set("Parent", Object::Reference(root));

    let root_dict = base
        .get_dictionary_mut(root)
        .map_err(|e| PdfMergeError::merge_failed(format!("Failed to get pages object: {e}")))?;

    match root_dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.push(Object::Reference(child)),
        _ => return Err(PdfMergeError::merge_failed("Pages dictionary missing Kids array")),
    }

    let current_count = root_dict
        .get(b"Count")
        .and_then(Object::as_i64)
        .unwrap_or(0);
    root_dict.set("Count", Object::Integer(current_count + page_count as i64));

    Ok(())
}
