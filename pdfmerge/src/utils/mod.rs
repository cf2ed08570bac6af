//! Small helpers shared across modules.

use crate::error::{PdfMergeError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Path used to decide whether two spellings name the same file.
///
/// Existing paths are canonicalised. For a path that does not exist yet the
/// parent is canonicalised and the file name re-attached, so an output path
/// compares equal to the input it would replace. Falls back to the absolute
/// path when nothing can be resolved.
pub fn identity_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let (Ok(parent), Some(name)) = (parent.canonicalize(), path.file_name()) {
        return parent.join(name);
    }

    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether `a` and `b` name the same file, however they are spelled.
pub fn same_file(a: &Path, b: &Path) -> bool {
    a == b || identity_path(a) == identity_path(b)
}

/// Open a file with the desktop's default application.
///
/// The launcher is detached: this returns once the opener process has been
/// spawned, not when the viewer exits.
pub fn open_in_default_app(path: &Path) -> Result<()> {
    let mut command = opener_command(path);

    tracing::debug!(path = %path.display(), "opening file with default application");

    command.spawn().map(|_| ()).map_err(|err| {
        PdfMergeError::other(format!(
            "Could not open {}: {err}\n  You can find it at: {}",
            path.display(),
            path.display()
        ))
    })
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builders for throwaway PDF files used across unit tests.

    use lopdf::{Document, Object, dictionary};
    use std::path::{Path, PathBuf};

    /// Build an in-memory document with `pages` blank Letter pages.
    pub fn blank_document(pages: usize) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::with_capacity(pages);
        for number in 0..pages {
            let content_id = doc.add_object(lopdf::Stream::new(
                dictionary! {},
                format!("% page {}", number + 1).into_bytes(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    /// Write a blank `pages`-page PDF named `name` into `dir`.
    pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        blank_document(pages).save(&path).unwrap();
        path
    }

    /// Write a one-page PDF protected by the standard security handler
    /// with a user password, so it cannot be opened without one.
    pub fn write_encrypted_pdf(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut doc = blank_document(1);

        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "Length" => 40,
            "P" => -44,
            "O" => Object::string_literal(vec![0x4f_u8; 32]),
            "U" => Object::string_literal(vec![0x55_u8; 32]),
        });
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            vec![
                Object::string_literal(vec![0x01_u8; 16]),
                Object::string_literal(vec![0x01_u8; 16]),
            ],
        );

        doc.save(&path).unwrap();
        path
    }
}
