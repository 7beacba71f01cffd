//! Top-level summarization entry points.
//!
//! This is the eager API: read the document, extract its text, call the
//! generation API, and hand back one finished [`SummaryRecord`]. There is no
//! partial result; any stage failing returns its error and leaves nothing
//! behind. Recording the result in history is the caller's explicit step.

use crate::config::SummaryConfig;
use crate::error::BriefError;
use crate::pipeline::generate::SummaryClient;
use crate::pipeline::extract;
use crate::pipeline::input::{self, SourceDocument};
use crate::prompts;
use crate::record::{word_count, SummaryRecord};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Summarize a PDF file.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Any variant of [`BriefError`] from intake, extraction, or generation; see
/// the crate-level docs for the taxonomy. The credential check runs first, so
/// a missing key fails before any parsing or network I/O.
pub async fn summarize(
    path: impl AsRef<Path>,
    config: &SummaryConfig,
) -> Result<SummaryRecord, BriefError> {
    let path = path.as_ref();
    info!("Starting summarization: {}", path.display());
    let client = SummaryClient::from_config(config)?;
    let document = input::read_document(path).await?;
    run_pipeline(client, document, config).await
}

/// Summarize an in-memory PDF payload.
///
/// `title` becomes the record title (the empty string falls back to
/// "Document"). Recommended when the PDF arrives from a network stream or
/// buffer rather than a file on disk.
pub async fn summarize_bytes(
    title: impl Into<String>,
    bytes: Vec<u8>,
    config: &SummaryConfig,
) -> Result<SummaryRecord, BriefError> {
    let client = SummaryClient::from_config(config)?;
    let document = SourceDocument::from_bytes(title, bytes)?;
    run_pipeline(client, document, config).await
}

/// Synchronous wrapper around [`summarize`].
///
/// Creates a temporary tokio runtime internally.
pub fn summarize_sync(
    path: impl AsRef<Path>,
    config: &SummaryConfig,
) -> Result<SummaryRecord, BriefError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BriefError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(summarize(path, config))
}

async fn run_pipeline(
    client: SummaryClient,
    document: SourceDocument,
    config: &SummaryConfig,
) -> Result<SummaryRecord, BriefError> {
    let start = Instant::now();

    // ── Step 1: Extract text ─────────────────────────────────────────────
    let text = extract::extract_text(&document).await?;
    let original_size = word_count(&text);
    info!(
        "Extracted {} words from '{}' in {}ms",
        original_size,
        document.title,
        start.elapsed().as_millis()
    );

    // ── Step 2: Generate the summary ─────────────────────────────────────
    let system_prompt = prompts::build_system_prompt(config.tone, config.length, &config.language);
    let content = client.generate(&system_prompt, &text).await?;

    // ── Step 3: Assemble the record ──────────────────────────────────────
    let record = SummaryRecord::new(document.title, content, original_size);
    info!(
        "Summary ready: {} words from {} in {}ms",
        record.summary_size,
        record.original_size,
        start.elapsed().as_millis()
    );
    Ok(record)
}

/// Write the record's content verbatim to `<dir>/<title>_Summary.md`.
///
/// Uses atomic write (temp file + rename) to prevent partial files. Returns
/// the path written.
pub async fn export_record(
    record: &SummaryRecord,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, BriefError> {
    let path = dir.as_ref().join(record.export_file_name());

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BriefError::ExportWriteFailed {
                path: path.clone(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, &record.content)
        .await
        .map_err(|e| BriefError::ExportWriteFailed {
            path: path.clone(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| BriefError::ExportWriteFailed {
            path: path.clone(),
            source: e,
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn export_writes_content_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let record = SummaryRecord::new("paper.pdf", "# Summary\n\n* raw content\n", 10);

        let path = export_record(&record, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "paper_Summary.md");

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, record.content);
    }

    #[tokio::test]
    async fn missing_credential_fails_before_reading_the_file() {
        // No api_key in config and (in the test environment) no env key: the
        // nonexistent path must never be touched.
        std::env::remove_var("GEMINI_API_KEY");
        let config = SummaryConfig::default();
        let err = summarize("/no/such/file.pdf", &config).await.unwrap_err();
        assert!(matches!(err, BriefError::MissingCredential));
    }
}
