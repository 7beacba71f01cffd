//! Prompt construction for the generation API.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing how tone, language, or the
//!    closing section requirement are phrased requires editing exactly one
//!    place.
//!
//! 2. **Testability** — unit tests can inspect the constructed instruction
//!    directly without a live API call, so prompt regressions are caught
//!    cheaply.

use crate::config::{SummaryLength, Tone};

/// Literal prefix prepended to the (truncated) source text in the user
/// payload. The model sees `"Text to summarize: <document text>"`.
pub const USER_PROMPT_PREFIX: &str = "Text to summarize: ";

/// Heading of the mandatory closing section every summary must carry.
pub const KEY_TERMS_HEADING: &str = "Key Terms";

/// Build the system instruction from the user's preferences.
///
/// The instruction fixes, in order: the persona, the output language, the
/// tone, the length-tier sentence, the output format, and the mandatory
/// trailing "Key Terms" section.
pub fn build_system_prompt(tone: Tone, length: SummaryLength, language: &str) -> String {
    format!(
        "You are an expert document analyst. Summarize the document provided by the user.\n\
         Write the entire summary in {language}.\n\
         The tone of the summary must be {tone} throughout.\n\
         {length_instruction}\n\
         Format the output as plain Markdown: '#' headings and '*' bullet points only, \
         no tables, no links, no nested lists.\n\
         End the summary with a section titled '# {key_terms}' listing the most \
         important terms of the document, each with a one-line explanation.",
        language = language,
        tone = tone.as_str(),
        length_instruction = length.instruction(),
        key_terms = KEY_TERMS_HEADING,
    )
}

/// Build the user payload: the fixed prefix plus the already-truncated text.
pub fn build_user_prompt(truncated_text: &str) -> String {
    format!("{USER_PROMPT_PREFIX}{truncated_text}")
}
