//! Configuration types for summary generation.
//!
//! All pipeline behaviour is controlled through [`SummaryConfig`], built via
//! its [`SummaryConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across calls, serialise it for logging, and diff
//! two runs to understand why their outputs differ.

use crate::error::BriefError;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default endpoint prefix for the generation API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Hard cap on the number of characters transmitted to the API.
///
/// Longer documents are truncated, not rejected; callers must not assume
/// full-document coverage past this point.
pub const MAX_INPUT_CHARS: usize = 25_000;

/// Configuration for one summarization run.
///
/// Built via [`SummaryConfig::builder()`] or [`SummaryConfig::default()`].
///
/// # Example
/// ```rust
/// use pdfbrief::{SummaryConfig, SummaryLength, Tone};
///
/// let config = SummaryConfig::builder()
///     .tone(Tone::Academic)
///     .length(SummaryLength::Short)
///     .language("German")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Writing tone requested from the model. Default: [`Tone::Neutral`].
    pub tone: Tone,

    /// Summary length tier. Default: [`SummaryLength::Medium`].
    ///
    /// Each tier carries a fixed instruction sentence; see
    /// [`SummaryLength::instruction`].
    pub length: SummaryLength,

    /// Output language, free-form. Default: "English".
    ///
    /// Passed verbatim into the system instruction, so any language name the
    /// model understands works ("Brazilian Portuguese", "Klingon", ...).
    pub language: String,

    /// Maximum characters of source text sent to the API. Default: 25,000.
    pub max_input_chars: usize,

    /// Retry schedule for the generation call. Default: 5 attempts,
    /// exponential backoff from 2 s.
    pub retry: RetryPolicy,

    /// API credential. Falls back to the `GEMINI_API_KEY` environment
    /// variable when unset; construction fails with
    /// [`BriefError::MissingCredential`] if neither is available.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Endpoint prefix override, mainly for tests. Default:
    /// [`DEFAULT_API_BASE_URL`].
    pub api_base_url: Option<String>,

    /// Generation model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Per-request HTTP timeout in seconds. Default: 60.
    pub request_timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            tone: Tone::default(),
            length: SummaryLength::default(),
            language: "English".to_string(),
            max_input_chars: MAX_INPUT_CHARS,
            retry: RetryPolicy::default(),
            api_key: None,
            api_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("tone", &self.tone)
            .field("length", &self.length)
            .field("language", &self.language)
            .field("max_input_chars", &self.max_input_chars)
            .field("retry", &self.retry)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl SummaryConfig {
    /// Create a new builder for `SummaryConfig`.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder {
            config: Self::default(),
        }
    }

    /// The endpoint prefix in effect (override or default).
    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}

/// Builder for [`SummaryConfig`].
#[derive(Debug)]
pub struct SummaryConfigBuilder {
    config: SummaryConfig,
}

impl SummaryConfigBuilder {
    pub fn tone(mut self, tone: Tone) -> Self {
        self.config.tone = tone;
        self
    }

    pub fn length(mut self, length: SummaryLength) -> Self {
        self.config.length = length;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    pub fn max_input_chars(mut self, chars: usize) -> Self {
        self.config.max_input_chars = chars.max(1);
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummaryConfig, BriefError> {
        let c = &self.config;
        if c.language.trim().is_empty() {
            return Err(BriefError::InvalidConfig(
                "Output language must not be empty".into(),
            ));
        }
        if c.retry.max_attempts == 0 {
            return Err(BriefError::InvalidConfig(
                "Retry attempts must be ≥ 1".into(),
            ));
        }
        if c.model.trim().is_empty() {
            return Err(BriefError::InvalidConfig("Model must not be empty".into()));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Writing tone requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Balanced, unopinionated register. (default)
    #[default]
    Neutral,
    /// Business-report register.
    Professional,
    /// Scholarly register with precise terminology.
    Academic,
    /// Relaxed, conversational register.
    Casual,
}

impl Tone {
    /// The adjective spliced into the system instruction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Professional => "professional",
            Tone::Academic => "academic",
            Tone::Casual => "casual",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary length tier.
///
/// Exactly three tiers exist, each bound to a fixed instruction sentence.
/// The tier changes only the instruction; it is not a token limit and the
/// model may over- or under-shoot it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    /// A paragraph plus a handful of bullets.
    Short,
    /// Section-by-section coverage. (default)
    #[default]
    Medium,
    /// Thorough walk-through with sub-headings.
    Long,
}

impl SummaryLength {
    /// The fixed instruction sentence for this tier.
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryLength::Short => {
                "Keep the summary very short: one opening paragraph followed by \
                 3-5 bullet points covering only the most important findings."
            }
            SummaryLength::Medium => {
                "Produce a medium-length summary: an overview paragraph, then a \
                 bulleted section for each major topic of the document."
            }
            SummaryLength::Long => {
                "Produce a detailed summary: use headings for each section of the \
                 document, with bullet points capturing every substantive argument, \
                 result, and conclusion."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
