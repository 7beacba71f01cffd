//! Error types for the pdfbrief library.
//!
//! A single fatal enum, [`BriefError`], covers every failure the pipeline can
//! surface. Failures fall into three bands:
//!
//! * **Intake** — the selected file is missing, unreadable, or not a PDF.
//!   Checked before any parsing starts.
//! * **Extraction** — the PDF parsed but yielded no usable text, or did not
//!   parse at all. Terminal for that attempt; the user must pick another file.
//! * **Generation** — the remote API could not produce a summary: missing
//!   credential (failed fast, no network I/O), retries exhausted, or a 2xx
//!   response with no readable payload.
//!
//! Corrupt persisted history is deliberately *not* surfaced here as an error
//! callers must handle: [`crate::history::HistoryStore::load`] recovers to an
//! empty history and logs the detail. The [`BriefError::StorageCorrupt`]
//! variant exists for the internal decode step that detects the condition.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfbrief library.
#[derive(Debug, Error)]
pub enum BriefError {
    // ── Intake errors ─────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input is not a PDF (wrong extension or missing `%PDF` magic).
    #[error("'{name}' is not a PDF file: {detail}\nOnly PDF documents are supported.")]
    InvalidFileType { name: String, detail: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// Fewer than 50 characters of text were extracted after trimming.
    ///
    /// Almost always a scanned or image-only document. There is no OCR
    /// fallback; the document cannot be summarized from its embedded text.
    #[error(
        "Document contains almost no extractable text ({chars} characters).\n\
         It is probably a scanned or image-only PDF, which is not supported."
    )]
    EmptyOrScannedDocument { chars: usize },

    /// The PDF could not be parsed at all.
    #[error("Failed to parse PDF '{name}': {detail}\nThe file may be corrupt or truncated.")]
    ParseFailure { name: String, detail: String },

    // ── Generation errors ─────────────────────────────────────────────────
    /// No API credential is configured; no request was attempted.
    #[error(
        "No API key configured.\n\
         Set the GEMINI_API_KEY environment variable or supply a key via the configuration."
    )]
    MissingCredential,

    /// Every attempt against the generation API failed.
    #[error("Summary generation failed after {attempts} attempts.\nLast error: {last_error}")]
    GenerationFailed { attempts: u32, last_error: String },

    /// The API returned success but no generated text could be read from it.
    #[error("The generation API returned an empty or unreadable response.")]
    EmptyResponse,

    // ── Presentation errors ───────────────────────────────────────────────
    /// The system clipboard rejected the copy.
    #[error("Failed to copy to clipboard: {detail}")]
    ClipboardFailure { detail: String },

    // ── State errors ──────────────────────────────────────────────────────
    /// Persisted state did not decode. Recovered internally; see module docs.
    #[error("Stored state at '{path}' is corrupt: {detail}")]
    StorageCorrupt { path: PathBuf, detail: String },

    /// Could not write a state file (history, theme).
    #[error("Failed to write state file '{path}': {source}")]
    StateWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write an exported summary.
    #[error("Failed to write export file '{path}': {source}")]
    ExportWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
