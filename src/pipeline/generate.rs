//! Generation API interaction: build the request, call with retry, read the
//! generated text.
//!
//! This module is intentionally thin: all prompt wording lives in
//! [`crate::prompts`] so it can change without touching retry or
//! error-handling logic here.
//!
//! ## Retry strategy
//!
//! Transport failures and non-success HTTP statuses are transient often
//! enough to be worth retrying; the schedule comes from
//! [`crate::retry::RetryPolicy`] (sequential, exponential, no jitter). A 2xx
//! response whose payload carries no generated text is a different failure
//! class (the endpoint answered; another identical request would not help)
//! and fails immediately with [`BriefError::EmptyResponse`].

use crate::config::SummaryConfig;
use crate::error::BriefError;
use crate::prompts;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the hosted generation API.
///
/// Cheap to construct per run; holds the resolved credential and a pooled
/// HTTP client. Purely functional given its inputs; no state is mutated
/// between calls.
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_input_chars: usize,
    retry: RetryPolicy,
}

impl SummaryClient {
    /// Build a client from the run configuration.
    ///
    /// Resolves the credential from `config.api_key`, then the
    /// `GEMINI_API_KEY` environment variable. Fails fast with
    /// [`BriefError::MissingCredential`] before any network I/O when neither
    /// is set.
    pub fn from_config(config: &SummaryConfig) -> Result<Self, BriefError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(BriefError::MissingCredential)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BriefError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_input_chars: config.max_input_chars,
            retry: config.retry,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate a summary of `source_text` under `system_prompt`.
    ///
    /// The text is truncated to the configured character budget before
    /// transmission. Returns the generated text verbatim.
    pub async fn generate(
        &self,
        system_prompt: &str,
        source_text: &str,
    ) -> Result<String, BriefError> {
        let truncated = truncate_chars(source_text, self.max_input_chars);
        if truncated.len() < source_text.len() {
            debug!(
                "Source text truncated from {} to {} bytes for transmission",
                source_text.len(),
                truncated.len()
            );
        }
        let request = build_request(system_prompt, truncated);
        let url = self.endpoint();

        let mut last_error: Option<String> = None;

        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 {
                let backoff = self.retry.delay_after(attempt - 1);
                debug!("Waiting {:?} before attempt {attempt}", backoff);
                tokio::time::sleep(backoff).await;
            }

            match self
                .http
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    // A decodable 2xx body with no text is not retried: the
                    // endpoint answered, repeating the request won't help.
                    let payload: GenerateResponse =
                        response.json().await.map_err(|_| BriefError::EmptyResponse)?;
                    debug!("Generation succeeded on attempt {attempt}");
                    return candidate_text(payload).ok_or(BriefError::EmptyResponse);
                }
                Ok(response) => {
                    let detail = format!("HTTP {}", response.status());
                    warn!(
                        "Generation attempt {attempt}/{} failed — {detail}",
                        self.retry.max_attempts
                    );
                    last_error = Some(detail);
                }
                Err(e) => {
                    warn!(
                        "Generation attempt {attempt}/{} failed — {e}",
                        self.retry.max_attempts
                    );
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(BriefError::GenerationFailed {
            attempts: self.retry.max_attempts,
            last_error: last_error.unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_request(system_prompt: &str, truncated_text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompts::build_user_prompt(truncated_text),
            }],
        }],
        system_instruction: Content {
            parts: vec![Part {
                text: system_prompt.to_string(),
            }],
        },
    }
}

/// Read the generated text at its fixed path:
/// first candidate → content → first part → text.
fn candidate_text(payload: GenerateResponse) -> Option<String> {
    payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
}

/// Truncate to at most `max_chars` characters, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_boundary_safe() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        // Multi-byte characters count as one char each.
        assert_eq!(truncate_chars("äöüß", 2), "äö");
    }

    #[test]
    fn request_shape_matches_wire_format() {
        let request = build_request("be brief", "the document");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            "Text to summarize: the document"
        );
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be brief");
    }

    #[test]
    fn candidate_text_reads_fixed_path() {
        let payload: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "# Summary" } ] } }
            ]
        }))
        .unwrap();
        assert_eq!(candidate_text(payload).as_deref(), Some("# Summary"));
    }

    #[test]
    fn empty_candidates_yield_none() {
        let payload: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(candidate_text(payload).is_none());

        let blank: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [ { "content": { "parts": [ { "text": "   " } ] } } ]
        }))
        .unwrap();
        assert!(candidate_text(blank).is_none());
    }

    #[test]
    fn endpoint_includes_model() {
        let config = SummaryConfig::builder()
            .api_key("k")
            .api_base_url("http://localhost:9/v1beta")
            .build()
            .unwrap();
        let client = SummaryClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            format!("http://localhost:9/v1beta/models/{}:generateContent", config.model)
        );
    }
}
