//! # pdfbrief
//!
//! Summarize PDF documents with a hosted large-language-model API.
//!
//! ## What this crate does
//!
//! It extracts the embedded text of a PDF locally, sends it to a hosted
//! generation API with the user's tone/length/language preferences, and
//! returns the generated Markdown-like summary as a [`SummaryRecord`] with
//! source and summary word counts. A small bounded history of past summaries
//! and a dark/light theme flag persist as JSON state files; everything else
//! is per-run.
//!
//! Scanned or image-only PDFs are rejected (no OCR), and documents longer
//! than 25,000 characters are truncated before transmission.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF file
//!  │
//!  ├─ 1. Input     validate extension + %PDF magic, load bytes
//!  ├─ 2. Extract   embedded text via lopdf (CPU-bound, spawn_blocking)
//!  ├─ 3. Generate  API call with the constructed system instruction,
//!  │               5 attempts, exponential backoff (2s → 16s)
//!  └─ 4. Record    summary text + word-count metrics, ready for history
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfbrief::{summarize, HistoryStore, SummaryConfig, SummaryLength, Tone};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential from GEMINI_API_KEY unless set on the config.
//!     let config = SummaryConfig::builder()
//!         .tone(Tone::Academic)
//!         .length(SummaryLength::Short)
//!         .build()?;
//!
//!     let record = summarize("paper.pdf", &config).await?;
//!     println!("{}", record.content);
//!
//!     let history = HistoryStore::open_default();
//!     history.record(record).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfbrief` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfbrief = { version = "0.4", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clipboard;
pub mod config;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod render;
pub mod retry;
pub mod summarize;
pub mod theme;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use clipboard::copy_to_clipboard;
pub use config::{SummaryConfig, SummaryConfigBuilder, SummaryLength, Tone};
pub use error::BriefError;
pub use history::{HistoryStore, MAX_HISTORY};
pub use pipeline::generate::SummaryClient;
pub use pipeline::input::SourceDocument;
pub use record::{word_count, SummaryRecord};
pub use render::{classify, RenderLine};
pub use retry::RetryPolicy;
pub use summarize::{export_record, summarize, summarize_bytes, summarize_sync};
pub use theme::{Theme, ThemeStore};
