//! PDF writing.
//!
//! Output is written atomically by default: the document goes to a hidden
//! sibling file first and is renamed over the target once fully flushed, so
//! a failed merge never leaves a truncated PDF behind.

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergeError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temporary file, then rename.
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            buffer_size: 64 * 1024,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Writer options in effect.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Save `doc` to `path` and report what was written.
    ///
    /// The document is modified in place when compression is enabled.
    ///
    /// # Errors
    ///
    /// - `FailedToCreateOutput` if the file (or its temporary) cannot be created
    /// - `FailedToWrite` if serialisation, flushing or the final rename fails
    pub fn write(&self, doc: &mut Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.compress {
            doc.compress();
        }

        let write_path = if self.options.atomic {
            temporary_path_for(path)
        } else {
            path.to_path_buf()
        };

        let file = std::fs::File::create(&write_path).map_err(|source| {
            PdfMergeError::FailedToCreateOutput {
                path: write_path.clone(),
                source,
            }
        })?;

        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        let written = doc
            .save_to(&mut writer)
            .map_err(std::io::Error::other)
            .and_then(|()| writer.flush());

        if let Err(source) = written {
            drop(writer);
            if self.options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(PdfMergeError::FailedToWrite {
                path: write_path,
                source,
            });
        }
        drop(writer);

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|source| {
                let _ = std::fs::remove_file(&write_path);
                PdfMergeError::FailedToWrite {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let write_time = start.elapsed();

        tracing::debug!(
            path = %path.display(),
            file_size,
            ?write_time,
            "wrote PDF"
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
            output_path: path.to_path_buf(),
            compressed: self.options.compress,
        })
    }
}

/// Hidden sibling used for atomic writes, e.g. `dir/.out.pdf.partial`.
fn temporary_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(".{name}.partial"))
}
