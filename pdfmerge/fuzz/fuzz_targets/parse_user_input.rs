#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfmerge::config::MoveSpec;
use pdfmerge::naming::{MAX_FILE_NAME_LENGTH, normalize_file_name};

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");

    if let Ok(spec) = MoveSpec::parse(s) {
        assert!(spec.from >= 1 && spec.to >= 1);
    }

    // Accepted names always end up as non-blank .pdf names within the limit
    if let Ok(name) = normalize_file_name(s) {
        assert!(name.to_lowercase().ends_with(".pdf"));
        assert!(!name.trim().is_empty());
        assert!(name.chars().count() <= MAX_FILE_NAME_LENGTH);
    }
});
