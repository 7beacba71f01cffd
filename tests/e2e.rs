//! End-to-end test against the live generation API.
//!
//! Gated behind the `E2E_ENABLED` environment variable so it does not run in
//! CI unless explicitly requested, and it needs a real `GEMINI_API_KEY`.
//!
//! Run with:
//!   E2E_ENABLED=1 GEMINI_API_KEY=... cargo test --test e2e -- --nocapture

mod common;

use common::fixture_pdf;
use pdfbrief::{summarize_bytes, SummaryConfig, SummaryLength, Tone};

/// Skip this test unless E2E_ENABLED and a credential are present.
macro_rules! e2e_skip_unless_ready {
    () => {
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        if std::env::var("GEMINI_API_KEY").is_err() {
            println!("SKIP — set GEMINI_API_KEY to run e2e tests");
            return;
        }
    };
}

#[tokio::test]
async fn summarize_live() {
    e2e_skip_unless_ready!();

    let page = "The annual migration of the Arctic tern covers roughly seventy thousand \
                kilometres, the longest of any animal. Researchers tracking the birds with \
                geolocators found that individuals follow looping routes over the Atlantic, \
                exploiting prevailing winds to cut energy costs on both legs of the journey.";
    let pdf = fixture_pdf(&[page]);

    let config = SummaryConfig::builder()
        .tone(Tone::Neutral)
        .length(SummaryLength::Short)
        .build()
        .expect("valid config");

    let record = summarize_bytes("terns.pdf", pdf, &config)
        .await
        .expect("live summarization should succeed");

    assert_eq!(record.title, "terns.pdf");
    assert!(record.original_size > 0);
    assert!(record.summary_size > 0);
    assert!(!record.content.trim().is_empty());
    assert!(
        record.content.lines().any(|l| l.starts_with('#')),
        "expected at least one heading"
    );

    println!(
        "--- BEGIN OUTPUT ---\n{}\n--- END OUTPUT ---",
        record.content
    );
}
