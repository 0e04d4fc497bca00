//! Upload file handling and local validation
//!
//! Everything here runs before any network call: a file rejected by
//! `validate_upload` never reaches the API.

use crate::error::{Error, Result};
use crate::notify::Notifier;
use std::sync::Mutex;

/// Extensions accepted for knowledge ingestion
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "md", "docx", "doc", "jpg", "jpeg", "png", "csv", "xlsx", "xls",
];

/// A file selected for upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, extension included
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// File content; may be empty when only metadata is known
    pub content: Vec<u8>,
}

impl UploadFile {
    /// Build an upload from in-memory content.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Build a metadata-only upload with a declared size and no content.
    pub fn sized(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content: Vec::new(),
        }
    }

    /// Extension, the substring after the last `.`; empty when there is none.
    pub fn extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => "",
        }
    }
}

/// Handle onto the file-input element that produced an upload.
///
/// Clearing the value lets the user re-select the same file name; the
/// handler clears it on both the success and the failure path.
#[derive(Debug, Default)]
pub struct UploadInput {
    value: Mutex<String>,
}

impl UploadInput {
    /// Create a handle holding the selected file name.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
        }
    }

    /// Current input value.
    pub fn value(&self) -> String {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Reset the input so the same file can be picked again.
    pub fn clear(&self) {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Validate a file for knowledge ingestion.
///
/// Unknown extensions are rejected; pdf/doc/docx and txt/md are
/// additionally capped at `max_file_size_mb` megabytes (strictly greater
/// than the ceiling is rejected, the exact boundary is accepted). Images
/// and spreadsheets carry no size cap here. Rejections come back as
/// [`Error::Validation`] with the user-facing message.
pub fn validate_upload(file: &UploadFile, max_file_size_mb: u64) -> Result<()> {
    let ext = file.extension();
    if !ALLOWED_EXTENSIONS.contains(&ext) {
        return Err(Error::Validation("Unsupported file format".to_string()));
    }

    let max_bytes = max_file_size_mb * 1024 * 1024;
    if matches!(ext, "pdf" | "docx" | "doc") && file.size > max_bytes {
        return Err(Error::Validation(format!(
            "pdf/doc files must not exceed {}MB",
            max_file_size_mb
        )));
    }
    if matches!(ext, "txt" | "md") && file.size > max_bytes {
        return Err(Error::Validation(format!(
            "txt/md files must not exceed {}MB",
            max_file_size_mb
        )));
    }

    Ok(())
}

/// Check whether a file is invalid for knowledge ingestion.
///
/// Returns `true` when [`validate_upload`] rejects the file, surfacing the
/// rejection message through `notifier` unless `silent` is set.
pub fn is_invalid_upload(
    file: &UploadFile,
    silent: bool,
    notifier: &impl Notifier,
    max_file_size_mb: u64,
) -> bool {
    match validate_upload(file, max_file_size_mb) {
        Ok(()) => false,
        Err(err) => {
            if !silent {
                let message = match err {
                    Error::Validation(message) => message,
                    other => other.to_string(),
                };
                notifier.error(message);
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_unknown_extension_rejected() {
        let notifier = MemoryNotifier::new();
        let file = UploadFile::sized("malware.exe", 10);
        assert!(is_invalid_upload(&file, false, &notifier, 50));
        assert_eq!(notifier.errors(), vec!["Unsupported file format"]);
    }

    #[test]
    fn test_unknown_extension_rejected_silently() {
        let notifier = MemoryNotifier::new();
        let file = UploadFile::sized("no_extension", 10);
        assert!(is_invalid_upload(&file, true, &notifier, 50));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_pdf_over_ceiling_rejected() {
        let notifier = MemoryNotifier::new();
        let file = UploadFile::sized("report.pdf", 60 * MB);
        assert!(is_invalid_upload(&file, false, &notifier, 50));
        assert_eq!(notifier.errors(), vec!["pdf/doc files must not exceed 50MB"]);
    }

    #[test]
    fn test_boundary_size_accepted() {
        let notifier = MemoryNotifier::new();
        for name in ["exact.pdf", "exact.docx", "exact.txt", "exact.md"] {
            let file = UploadFile::sized(name, 50 * MB);
            assert!(!is_invalid_upload(&file, false, &notifier, 50));
        }
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_text_over_ceiling_gets_text_message() {
        let notifier = MemoryNotifier::new();
        let file = UploadFile::sized("notes.md", 50 * MB + 1);
        assert!(is_invalid_upload(&file, false, &notifier, 50));
        assert_eq!(notifier.errors(), vec!["txt/md files must not exceed 50MB"]);
    }

    #[test]
    fn test_images_and_spreadsheets_have_no_size_cap() {
        let notifier = MemoryNotifier::new();
        for name in ["scan.png", "photo.jpg", "data.xlsx", "data.csv"] {
            let file = UploadFile::sized(name, 500 * MB);
            assert!(!is_invalid_upload(&file, false, &notifier, 50));
        }
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let notifier = MemoryNotifier::new();
        let file = UploadFile::sized("REPORT.PDF", 10);
        assert!(is_invalid_upload(&file, true, &notifier, 50));
    }

    #[test]
    fn test_validate_upload_returns_validation_error() {
        let file = UploadFile::sized("report.pdf", 60 * MB);
        match validate_upload(&file, 50) {
            Err(Error::Validation(message)) => {
                assert_eq!(message, "pdf/doc files must not exceed 50MB");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(validate_upload(&UploadFile::sized("scan.png", 500 * MB), 50).is_ok());
    }

    #[test]
    fn test_upload_input_clears() {
        let input = UploadInput::new("report.pdf");
        assert_eq!(input.value(), "report.pdf");
        input.clear();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_from_bytes_sets_size() {
        let file = UploadFile::from_bytes("notes.txt", vec![0u8; 42]);
        assert_eq!(file.size, 42);
        assert_eq!(file.extension(), "txt");
    }
}
