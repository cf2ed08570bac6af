//! Error types for pdfmerge.
//!
//! Errors are designed to be informative and actionable: each variant carries
//! the path or value that caused it, and where a fix is obvious the message
//! includes a hint.
//!
//! # Error Categories
//!
//! - **Input errors**: missing files, directories where files were expected
//! - **PDF errors**: unreadable, encrypted or empty documents
//! - **Output errors**: existing output, creation and write failures
//! - **Usage errors**: invalid file names, preferences or configuration

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Input path does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A file was expected but the path is something else.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// A directory was expected but the path is something else.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// File does not carry a `.pdf` extension.
    #[error("Not a PDF file: {}\n  Only .pdf files are accepted", path.display())]
    NotAPdf {
        /// Offending path.
        path: PathBuf,
    },

    /// Failed to parse a PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the parser.
        reason: String,
    },

    /// PDF is password protected.
    #[error(
        "PDF is encrypted and cannot be merged: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// PDF parsed but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the PDF.
        path: PathBuf,
        /// What is wrong with it.
        details: String,
    },

    /// Nothing was selected.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// Output file exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output name",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output.
        path: PathBuf,
    },

    /// Output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the output failed midway.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output file name was rejected.
    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Preferences file exists but cannot be used.
    #[error("Invalid preferences file: {}\n  Reason: {reason}", path.display())]
    InvalidPreferences {
        /// Preferences file path.
        path: PathBuf,
        /// Parse or validation failure.
        reason: String,
    },

    /// A merge job is already running.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration or arguments.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// User declined to continue.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfMergeError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl From<serde_json::Error> for PdfMergeError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(format!("JSON error: {err}"))
    }
}

impl PdfMergeError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// Create a NotADirectory error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: impl Into<PathBuf>) -> Self {
        Self::NotAPdf { path: path.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: impl Into<PathBuf>) -> Self {
        Self::EncryptedPdf { path: path.into() }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an InvalidFileName error.
    pub fn invalid_file_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFileName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidPreferences error.
    pub fn invalid_preferences(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPreferences {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether a selection can skip the offending file and keep going.
    ///
    /// True for errors tied to a single input file; such files are reported
    /// as rejected instead of aborting the whole selection.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::NotAPdf { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::CorruptedPdf { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::NotADirectory { .. } => 2,
            Self::NotAPdf { .. } => 3,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidFileName { .. } => 1,
            Self::InvalidPreferences { .. } => 1,
            Self::MergeInProgress => 6,
            Self::MergeFailed { .. } => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_file_not_found_display() {
        let err = PdfMergeError::file_not_found("/tmp/missing.pdf");
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("missing.pdf"));
    }

    #[test]
    fn test_encrypted_pdf_display_has_hint() {
        let msg = PdfMergeError::encrypted_pdf("secret.pdf").to_string();
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("secret.pdf"));
        assert!(msg.contains("Decrypt"));
    }

    #[test]
    fn test_output_exists_display_has_hint() {
        let msg = PdfMergeError::output_exists("existing.pdf").to_string();
        assert!(msg.contains("already exists"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_invalid_file_name_display() {
        let msg = PdfMergeError::invalid_file_name("a?b.pdf", "contains '?'").to_string();
        assert!(msg.contains("a?b.pdf"));
        assert!(msg.contains("contains '?'"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(PdfMergeError::failed_to_load_pdf("bad.pdf", "header").is_recoverable());
        assert!(PdfMergeError::encrypted_pdf("secret.pdf").is_recoverable());
        assert!(PdfMergeError::not_a_pdf("notes.txt").is_recoverable());

        assert!(!PdfMergeError::NoFilesToMerge.is_recoverable());
        assert!(!PdfMergeError::MergeInProgress.is_recoverable());
        assert!(!PdfMergeError::Cancelled.is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PdfMergeError::file_not_found("x").exit_code(), 2);
        assert_eq!(PdfMergeError::failed_to_load_pdf("x", "e").exit_code(), 3);
        assert_eq!(PdfMergeError::NoFilesToMerge.exit_code(), 1);
        assert_eq!(PdfMergeError::output_exists("x").exit_code(), 4);
        assert_eq!(PdfMergeError::MergeInProgress.exit_code(), 6);
        assert_eq!(PdfMergeError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: PdfMergeError = io_err.into();
        assert!(matches!(err, PdfMergeError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source() {
        let err = PdfMergeError::FailedToWrite {
            path: PathBuf::from("out.pdf"),
            source: io::Error::new(io::ErrorKind::StorageFull, "disk full"),
        };
        assert!(err.source().is_some());
        assert!(PdfMergeError::NoFilesToMerge.source().is_none());
    }
}
