//! Output file names and locations.
//!
//! Validation of user-supplied names plus the "smart defaults" that pick an
//! output name and directory from the current selection when the user has
//! not chosen one.

use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};

use crate::error::{PdfMergeError, Result};
use crate::preferences::Preferences;
use crate::selection::Selection;

/// Longest accepted output file name, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 200;

/// Characters rejected in output file names on every platform.
pub const INVALID_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Check a user-supplied output file name.
///
/// # Errors
///
/// `InvalidFileName` when the name is blank, longer than
/// [`MAX_FILE_NAME_LENGTH`] characters, or contains one of [`INVALID_CHARS`].
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PdfMergeError::invalid_file_name(
            name,
            "the file name cannot be empty",
        ));
    }

    if name.chars().count() > MAX_FILE_NAME_LENGTH {
        return Err(PdfMergeError::invalid_file_name(
            name,
            format!("the file name is too long (maximum {MAX_FILE_NAME_LENGTH} characters)"),
        ));
    }

    if let Some(bad) = name.chars().find(|c| INVALID_CHARS.contains(c) || c.is_control()) {
        return Err(PdfMergeError::invalid_file_name(
            name,
            format!(
                "contains invalid character {bad:?}; avoid < > : \" / \\ | ? *"
            ),
        ));
    }

    Ok(())
}

/// Append `.pdf` unless the name already ends with it (any case).
pub fn ensure_pdf_extension(name: &str) -> String {
    let name = name.trim();
    if name.to_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Validate a user-supplied name and normalise its extension.
pub fn normalize_file_name(name: &str) -> Result<String> {
    let name = ensure_pdf_extension(name);
    validate_file_name(&name)?;
    Ok(name)
}

/// Date-stamped default name, e.g. `merged_pdf_20240131.pdf`.
pub fn default_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("merged_pdf_{}.pdf", now.format("%Y%m%d"))
}

/// Name reflecting the selection, e.g. `merged_3files_20240131_0915.pdf`.
///
/// Falls back to [`default_file_name`] for zero or one file.
pub fn smart_file_name<Tz>(count: usize, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if count > 1 {
        format!("merged_{count}files_{}.pdf", now.format("%Y%m%d_%H%M"))
    } else {
        default_file_name(now)
    }
}

/// Output directory used when nothing else applies: the Desktop if it
/// exists, then Documents, then the home directory, then the working
/// directory.
pub fn fallback_output_dir() -> PathBuf {
    [dirs::desktop_dir(), dirs::document_dir(), dirs::home_dir()]
        .into_iter()
        .flatten()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Output location derived from the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartDefaults {
    /// Directory the merged file goes to.
    pub output_dir: PathBuf,
    /// File name of the merged file.
    pub file_name: String,
}

impl SmartDefaults {
    /// Compute defaults for `selection`.
    ///
    /// The directory is the first selected file's folder when it exists,
    /// otherwise the preferred output directory, otherwise
    /// [`fallback_output_dir`].
    pub fn for_selection<Tz>(
        selection: &Selection,
        preferences: &Preferences,
        now: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let output_dir = selection
            .entries()
            .first()
            .and_then(|entry| entry.path.parent())
            .filter(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
            .map(Path::to_path_buf)
            .or_else(|| preferences.existing_output_dir().map(Path::to_path_buf))
            .unwrap_or_else(fallback_output_dir);

        Self {
            output_dir,
            file_name: smart_file_name(selection.len(), now),
        }
    }

    /// [`SmartDefaults::for_selection`] at the current local time.
    pub fn current(selection: &Selection, preferences: &Preferences) -> Self {
        Self::for_selection(selection, preferences, &Local::now())
    }

    /// Full output path.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}
