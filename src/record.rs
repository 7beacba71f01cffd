//! The summary record: the persisted result of one successful run.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

/// One completed summarization, as kept in history.
///
/// Immutable after creation; history only ever reads these back. The `id` is
/// the creation time in milliseconds since the epoch, which doubles as a
/// stable sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Millisecond creation timestamp, used as the record identifier.
    pub id: i64,
    /// Source file name, or "Document" when none was available.
    pub title: String,
    /// The generated Markdown-like summary text, verbatim.
    pub content: String,
    /// Human-readable creation date, e.g. "August 7, 2026".
    pub date: String,
    /// Word count of the full extracted source text.
    pub original_size: usize,
    /// Word count of the generated summary.
    pub summary_size: usize,
}

impl SummaryRecord {
    /// Assemble a record for a freshly generated summary.
    ///
    /// Stamps the id and date from the current clock and derives
    /// `summary_size` from `content`.
    pub fn new(title: impl Into<String>, content: impl Into<String>, original_size: usize) -> Self {
        let content = content.into();
        let summary_size = word_count(&content);
        Self {
            id: Utc::now().timestamp_millis(),
            title: title.into(),
            content,
            date: Local::now().format("%B %-d, %Y").to_string(),
            original_size,
            summary_size,
        }
    }

    /// File name for a Markdown export of this record:
    /// the title minus any `.pdf` suffix, plus `_Summary.md`.
    pub fn export_file_name(&self) -> String {
        let stem = self
            .title
            .strip_suffix(".pdf")
            .or_else(|| self.title.strip_suffix(".PDF"))
            .unwrap_or(&self.title);
        format!("{stem}_Summary.md")
    }
}

/// Count words by splitting on runs of whitespace.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
