//! Integration tests for the select, reorder, name and merge flow.

use chrono::{Local, TimeZone};
use pdfmerge::config::{MoveSpec, OverwriteMode};
use pdfmerge::discovery::{expand_inputs, find_pdfs};
use pdfmerge::io::PdfReader;
use pdfmerge::merge::{MergeRequest, MergeRunner};
use pdfmerge::naming::SmartDefaults;
use pdfmerge::preferences::Preferences;
use pdfmerge::selection::{Selection, SelectionSource};
use tempfile::TempDir;

use crate::common::{page_markers, write_garbage, write_pdf};

#[tokio::test]
async fn test_folder_selection_reorder_and_merge() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "b.pdf", 1);
    write_pdf(dir.path(), "a.pdf", 2);
    write_pdf(dir.path(), "c.PDF", 1);
    std::fs::write(dir.path().join("notes.txt"), b"not a pdf").unwrap();

    let files = find_pdfs(dir.path(), false).unwrap();
    let results = PdfReader::new().inspect_all(&files, 2).await;

    let mut selection = Selection::new();
    let report = selection.replace_with_folder(dir.path(), results);
    assert_eq!(report.added, 3);
    assert_eq!(
        selection.source(),
        &SelectionSource::Folder(dir.path().to_path_buf())
    );
    assert_eq!(selection.total_pages(), 4);

    // c to the front, then b above a.
    MoveSpec::parse("3:1").unwrap().apply(&mut selection).unwrap();
    assert!(selection.move_up(2));
    let order: Vec<_> = selection
        .entries()
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    assert_eq!(order, ["c.PDF", "b.pdf", "a.pdf"]);

    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
    let defaults = SmartDefaults::for_selection(&selection, &Preferences::default(), &now);
    assert_eq!(defaults.output_dir, dir.path());
    assert_eq!(defaults.file_name, "merged_3files_20240309_1430.pdf");

    let request = MergeRequest::new(selection.paths(), defaults.output_path())
        .with_overwrite_mode(OverwriteMode::NoClobber);
    let outcome = MergeRunner::new()
        .start(request)
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert_eq!(outcome.statistics.total_pages, 4);
    assert_eq!(
        page_markers(&defaults.output_path()),
        ["% c page 1", "% b page 1", "% a page 1", "% a page 2"]
    );
}

#[tokio::test]
async fn test_recursive_folder_names_are_relative() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "top.pdf", 1);
    write_pdf(dir.path(), "chapter1/part.pdf", 1);
    write_pdf(dir.path(), "chapter2/part.pdf", 1);

    let flat = find_pdfs(dir.path(), false).unwrap();
    assert_eq!(flat.len(), 1);

    let files = find_pdfs(dir.path(), true).unwrap();
    let results = PdfReader::new().inspect_all(&files, 4).await;
    let mut selection = Selection::new();
    selection.replace_with_folder(dir.path(), results);

    let names: Vec<_> = selection
        .entries()
        .iter()
        .map(|e| e.display_name.replace('\\', "/"))
        .collect();
    assert_eq!(names, ["chapter1/part.pdf", "chapter2/part.pdf", "top.pdf"]);
}

#[tokio::test]
async fn test_adding_files_skips_duplicates_and_bad_inputs() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let bad = write_garbage(dir.path(), "bad.pdf");
    let reader = PdfReader::new();

    let mut selection = Selection::new();
    let report = selection.add_inspected(reader.inspect_all(&[a.clone(), bad.clone()], 2).await);
    assert_eq!(report.added, 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].path.as_deref(), Some(bad.as_path()));
    assert!(report.rejected[0].reason.is_recoverable());

    let report = selection.add_inspected(reader.inspect_all(&[a.clone(), b.clone()], 2).await);
    assert_eq!(report.added, 1);
    assert_eq!(report.duplicates, 1);

    let report = selection.add_inspected(reader.inspect_all(&[a.clone()], 1).await);
    assert!(report.only_duplicates());

    assert_eq!(selection.paths(), vec![a, b]);
}

#[tokio::test]
async fn test_folder_replaces_previous_selection() {
    let dir = TempDir::new().unwrap();
    let loose = write_pdf(dir.path(), "loose.pdf", 1);
    let folder = dir.path().join("folder");
    write_pdf(&folder, "x.pdf", 1);

    let reader = PdfReader::new();
    let mut selection = Selection::new();
    selection.add_inspected(reader.inspect_all(&[loose.clone()], 1).await);

    let files = find_pdfs(&folder, false).unwrap();
    selection.replace_with_folder(&folder, reader.inspect_all(&files, 1).await);
    assert!(!selection.contains(&loose));
    assert_eq!(selection.len(), 1);

    // Adding single files afterwards keeps the folder's files.
    selection.add_inspected(reader.inspect_all(&[loose.clone()], 1).await);
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.source(), &SelectionSource::Files);
}

#[test]
fn test_expand_inputs_keeps_operand_order() {
    let dir = TempDir::new().unwrap();
    let z = write_pdf(dir.path(), "z.pdf", 1);
    let sub = dir.path().join("sub");
    let s1 = write_pdf(&sub, "1.pdf", 1);
    let s2 = write_pdf(&sub, "2.pdf", 1);
    let g1 = write_pdf(dir.path(), "g1.pdf", 1);
    let g2 = write_pdf(dir.path(), "g2.pdf", 1);

    let pattern = dir.path().join("g*.pdf");
    let expanded = expand_inputs([z.clone(), sub, pattern], false).unwrap();

    assert_eq!(expanded, vec![z, s1, s2, g1, g2]);
}

#[test]
fn test_smart_defaults_fall_back_to_preferences() {
    let preferred = TempDir::new().unwrap();
    let prefs = Preferences {
        default_output_dir: Some(preferred.path().to_path_buf()),
        ..Default::default()
    };

    let now = Local.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap();
    let defaults = SmartDefaults::for_selection(&Selection::new(), &prefs, &now);

    assert_eq!(defaults.output_dir, preferred.path());
    assert_eq!(defaults.file_name, "merged_pdf_20241201.pdf");
}
