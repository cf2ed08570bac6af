//! Shared helpers for the integration tests.
//!
//! Inputs are generated on the fly with lopdf: every page carries a content
//! stream `% <file> page <n>` so tests can check the final page order.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Write a PDF called `name` with `pages` pages into `dir`, creating parent
/// directories as needed.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }

    let label = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (1..=pages)
        .map(|number| {
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                format!("% {label} page {number}").into_bytes(),
            ));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

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

    doc.save(&path).expect("Failed to write fixture PDF");
    path
}

/// Write a file with a `.pdf` name that is not a PDF.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4\nthis is not really a pdf\n")
        .expect("Failed to write garbage file");
    path
}

/// The page markers of a PDF on disk, in page order.
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to reload output");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("page has content");
            String::from_utf8_lossy(&content).trim().to_string()
        })
        .collect()
}
