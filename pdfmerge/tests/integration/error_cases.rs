//! Integration tests for error handling and edge cases.

use pdfmerge::config::OverwriteMode;
use pdfmerge::discovery::{expand_inputs, find_pdfs};
use pdfmerge::error::PdfMergeError;
use pdfmerge::io::PdfReader;
use pdfmerge::merge::{MergeRequest, MergeRunner, merge_pdfs};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{write_garbage, write_pdf};

#[test]
fn test_error_nonexistent_input() {
    let result = merge_pdfs(&[PathBuf::from("/nonexistent/file.pdf")]);
    let err = result.err().expect("Should fail with nonexistent file");
    assert!(matches!(err, PdfMergeError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_error_empty_input_list() {
    let inputs: Vec<PathBuf> = Vec::new();
    let err = merge_pdfs(&inputs).err().expect("Should fail with no inputs");
    assert!(matches!(err, PdfMergeError::NoFilesToMerge));
}

#[test]
fn test_error_directory_as_input() {
    let dir = TempDir::new().unwrap();
    let err = PdfReader::new().inspect(dir.path()).unwrap_err();
    assert!(matches!(err, PdfMergeError::NotAFile { .. }));
}

#[test]
fn test_error_corrupted_input() {
    let dir = TempDir::new().unwrap();
    let bad = write_garbage(dir.path(), "bad.pdf");

    let err = PdfReader::new().inspect(&bad).unwrap_err();
    assert!(
        matches!(
            err,
            PdfMergeError::FailedToLoadPdf { .. } | PdfMergeError::CorruptedPdf { .. }
        ),
        "unexpected error: {err}"
    );
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_failed_job_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(dir.path(), "good.pdf", 2);
    let bad = write_garbage(dir.path(), "bad.pdf");
    let output = dir.path().join("out.pdf");

    let runner = MergeRunner::new();
    let result = runner
        .start(MergeRequest::new(vec![good, bad], &output))
        .unwrap()
        .wait()
        .await;

    assert!(result.is_err());
    assert!(!output.exists());
    assert!(!runner.is_merging());

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_no_clobber_keeps_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let output = dir.path().join("out.pdf");
    std::fs::write(&output, b"precious").unwrap();

    let err = MergeRunner::new()
        .start(MergeRequest::new(vec![a], &output).with_overwrite_mode(OverwriteMode::NoClobber))
        .unwrap()
        .wait()
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::OutputExists { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(std::fs::read(&output).unwrap(), b"precious");
}

#[tokio::test]
async fn test_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let output = dir.path().join("missing").join("out.pdf");

    let err = MergeRunner::new()
        .start(MergeRequest::new(vec![a], &output))
        .unwrap()
        .wait()
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::FailedToCreateOutput { .. }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn test_discovery_errors() {
    let dir = TempDir::new().unwrap();
    let file = write_pdf(dir.path(), "a.pdf", 1);

    assert!(matches!(
        find_pdfs(&dir.path().join("nope"), false).unwrap_err(),
        PdfMergeError::FileNotFound { .. }
    ));
    assert!(matches!(
        find_pdfs(&file, false).unwrap_err(),
        PdfMergeError::NotADirectory { .. }
    ));
    assert!(expand_inputs([dir.path().join("*.docx")], false).is_err());
}

#[test]
fn test_empty_folder_has_nothing_to_merge() {
    let dir = TempDir::new().unwrap();
    assert!(find_pdfs(dir.path(), true).unwrap().is_empty());
}
