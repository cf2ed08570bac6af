//! Locating PDF files on disk.
//!
//! Turns directories, glob patterns and plain paths into an ordered list of
//! candidate PDF files. Nothing here opens the files; validation happens when
//! they are added to a [`Selection`](crate::selection::Selection).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PdfMergeError, Result};

/// Check whether a path names a PDF file by extension (case-insensitive).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// List the PDF files of a directory, sorted by path.
///
/// With `recursive` unset only direct children are listed. Hidden files are
/// not treated specially. Recursive listings do not follow directory links
/// and skip subfolders that cannot be read.
///
/// # Errors
///
/// - `FileNotFound` if `dir` does not exist
/// - `NotADirectory` if `dir` is not a directory
/// - `Io` if the directory cannot be read
pub fn find_pdfs(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(PdfMergeError::file_not_found(dir));
    }
    if !dir.is_dir() {
        return Err(PdfMergeError::not_a_directory(dir));
    }

    let mut found = Vec::new();

    if recursive {
        // Directory links are not descended into; linked files still count.
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file && is_pdf_path(entry.path()) {
                found.push(entry.into_path());
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_pdf_path(&path) {
                found.push(path);
            }
        }
    }

    found.sort();
    tracing::debug!(
        dir = %dir.display(),
        recursive,
        count = found.len(),
        "scanned directory for PDFs"
    );

    Ok(found)
}

/// Expand command-line operands into an ordered list of files.
///
/// - directories expand to their PDFs via [`find_pdfs`]
/// - operands with glob metacharacters that do not name an existing file
///   expand to their matches, sorted
/// - anything else is passed through as-is
///
/// Operand order is preserved; a pattern that matches nothing is an error so
/// that typos do not silently shrink the output.
pub fn expand_inputs<T>(inputs: T, recursive: bool) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<Path>,
{
    let mut resolved = Vec::new();

    for input in inputs {
        let input = input.as_ref();

        if input.is_dir() {
            resolved.extend(find_pdfs(input, recursive)?);
        } else if !input.exists() && is_glob_pattern(input) {
            let matches = collect_paths_for_pattern(input)?;
            if matches.is_empty() {
                return Err(PdfMergeError::file_not_found(input));
            }
            resolved.extend(matches);
        } else {
            resolved.push(input.to_path_buf());
        }
    }

    Ok(resolved)
}

/// Name to show for a file: its path relative to `root` when it lives below
/// it, otherwise just the file name.
pub fn display_name(path: &Path, root: Option<&Path>) -> String {
    if let Some(root) = root
        && let Ok(relative) = path.strip_prefix(root)
        && !relative.as_os_str().is_empty()
    {
        return relative.to_string_lossy().into_owned();
    }

    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn is_glob_pattern(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|s| s.contains(['*', '?', '[']))
}

fn collect_paths_for_pattern(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern = pattern.to_string_lossy();

    let paths = glob::glob(&pattern).map_err(|err| {
        PdfMergeError::invalid_config(format!("Invalid glob pattern '{pattern}': {err}"))
    })?;

    let mut resolved = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfMergeError::other(err.to_string()))?;
        if path.is_file() {
            resolved.push(path);
        }
    }
    resolved.sort();

    Ok(resolved)
}
