//! Integration tests for basic PDF merging operations.

use pdfmerge::io::{PdfReader, PdfWriter, WriteOptions};
use pdfmerge::merge::{MergeEvent, MergeRequest, MergeRunner, merge_pdfs};
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf};

#[test]
fn test_merge_preserves_page_order() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let b = write_pdf(dir.path(), "b.pdf", 1);
    let c = write_pdf(dir.path(), "c.pdf", 3);
    let output = dir.path().join("merged.pdf");

    let (mut document, stats) = merge_pdfs(&[&c, &a, &b]).unwrap();
    PdfWriter::new().write(&mut document, &output).unwrap();

    assert_eq!(stats.files_merged, 3);
    assert_eq!(stats.total_pages, 6);
    assert_eq!(
        page_markers(&output),
        [
            "% c page 1",
            "% c page 2",
            "% c page 3",
            "% a page 1",
            "% a page 2",
            "% b page 1",
        ]
    );
}

#[test]
fn test_merged_output_can_be_merged_again() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1);
    let b = write_pdf(dir.path(), "b.pdf", 2);
    let first = dir.path().join("first.pdf");
    let second = dir.path().join("second.pdf");

    let (mut document, _) = merge_pdfs(&[&a, &b]).unwrap();
    PdfWriter::new().write(&mut document, &first).unwrap();

    let (mut document, stats) = merge_pdfs(&[&first, &a]).unwrap();
    PdfWriter::new().write(&mut document, &second).unwrap();

    assert_eq!(stats.total_pages, 4);
    assert_eq!(
        page_markers(&second),
        ["% a page 1", "% b page 1", "% b page 2", "% a page 1"]
    );
    assert_eq!(PdfReader::new().inspect(&second).unwrap().page_count, 4);
}

#[test]
fn test_uncompressed_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 2);
    let output = dir.path().join("plain.pdf");

    let (mut document, _) = merge_pdfs(&[&a]).unwrap();
    let writer = PdfWriter::with_options(WriteOptions {
        compress: false,
        ..Default::default()
    });
    let stats = writer.write(&mut document, &output).unwrap();

    assert!(!stats.compressed);
    assert_eq!(page_markers(&output), ["% a page 1", "% a page 2"]);
}

#[tokio::test]
async fn test_background_job_end_to_end() {
    let dir = TempDir::new().unwrap();
    let inputs = vec![
        write_pdf(dir.path(), "one.pdf", 1),
        write_pdf(dir.path(), "two.pdf", 2),
        write_pdf(dir.path(), "three.pdf", 3),
    ];
    let output = dir.path().join("job.pdf");

    let runner = MergeRunner::new();
    let mut handle = runner.start(MergeRequest::new(inputs, &output)).unwrap();

    let mut names = Vec::new();
    let mut finished = None;
    while let Some(event) = handle.next_event().await {
        match event {
            MergeEvent::Adding { name, .. } => names.push(name),
            MergeEvent::Finished { pages, .. } => finished = Some(pages),
            _ => {}
        }
    }
    let outcome = handle.wait().await.unwrap();

    assert!(!runner.is_merging());
    assert_eq!(finished, Some(6));
    assert_eq!(outcome.statistics.files_merged, 3);
    assert_eq!(outcome.write.output_path, output);
    assert_eq!(page_markers(&output).len(), 6);
    assert_eq!(names, ["one.pdf", "two.pdf", "three.pdf"]);
}
