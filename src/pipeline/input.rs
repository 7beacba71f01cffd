//! Document intake: validate a selected file and load its bytes.
//!
//! Both checks run before any parsing starts: the declared type (the `.pdf`
//! extension) and the `%PDF` magic bytes. Rejecting early gives the user a
//! meaningful error instead of a parser failure on, say, a renamed Word
//! document.

use crate::error::BriefError;
use std::path::Path;
use tracing::debug;

/// PDF magic bytes every conforming file starts with.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Fallback record title when the source carries no usable file name.
pub const UNTITLED: &str = "Document";

/// An uploaded document: its display title and raw bytes.
///
/// Created once per selection; replaced wholesale when the user starts over.
/// The derived text lives separately (see [`crate::pipeline::extract`]); the
/// bytes are never persisted.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Display title, normally the source file name.
    pub title: String,
    /// The raw PDF payload.
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    /// Wrap an in-memory PDF payload, validating the magic bytes.
    ///
    /// This is the entry point for callers whose PDF never touches disk.
    pub fn from_bytes(title: impl Into<String>, bytes: Vec<u8>) -> Result<Self, BriefError> {
        let title = title.into();
        let title = if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        if !has_pdf_magic(&bytes) {
            return Err(BriefError::InvalidFileType {
                name: title,
                detail: "missing %PDF header".into(),
            });
        }
        Ok(Self { title, bytes })
    }
}

/// Check the `%PDF` file signature.
pub fn has_pdf_magic(bytes: &[u8]) -> bool {
    bytes.len() >= PDF_MAGIC.len() && &bytes[..PDF_MAGIC.len()] == PDF_MAGIC
}

/// Read and validate a PDF from disk.
///
/// Checks, in order: extension is `.pdf` (case-insensitive), the file exists
/// and is readable, and the payload starts with `%PDF`. The record title is
/// the file name.
pub async fn read_document(path: impl AsRef<Path>) -> Result<SourceDocument, BriefError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| UNTITLED.to_string());

    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !extension_ok {
        return Err(BriefError::InvalidFileType {
            name,
            detail: "extension is not .pdf".into(),
        });
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(BriefError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(BriefError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    SourceDocument::from_bytes(name, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_check() {
        assert!(has_pdf_magic(b"%PDF-1.7\n..."));
        assert!(!has_pdf_magic(b"%PD"));
        assert!(!has_pdf_magic(b"PK\x03\x04"));
        assert!(!has_pdf_magic(b""));
    }

    #[test]
    fn from_bytes_rejects_non_pdf_payload() {
        let err = SourceDocument::from_bytes("fake.pdf", b"MZ not a pdf".to_vec()).unwrap_err();
        assert!(matches!(err, BriefError::InvalidFileType { .. }));
    }

    #[test]
    fn from_bytes_defaults_empty_title() {
        let doc = SourceDocument::from_bytes("", b"%PDF-1.4".to_vec()).unwrap();
        assert_eq!(doc.title, UNTITLED);
    }

    #[tokio::test]
    async fn read_document_rejects_wrong_extension() {
        let err = read_document("/tmp/whatever.txt").await.unwrap_err();
        assert!(matches!(err, BriefError::InvalidFileType { .. }));
    }

    #[tokio::test]
    async fn read_document_missing_file() {
        let err = read_document("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, BriefError::FileNotFound { .. }));
    }
}
